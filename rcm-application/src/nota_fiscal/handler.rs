use super::commands::{AddNotaFiscalCommand, RemoveNotaFiscalCommand, UpdateNotaFiscalCommand};
use super::validators;
use crate::{
    command_handler::CommandHandler, context::CommandScope, error::AppResult,
    lifecycle::CommandLifecycle, mediator::Mediator,
};
use async_trait::async_trait;
use rcm_domain::models::{NotaFiscal, NotaFiscalVendaIdSpecification, Venda};
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::{Repository, UnitOfWork};
use rcm_domain::specification::Specification;
use rcm_domain::validation::RuleSet;

fn nao_encontrada() -> DomainNotification {
    DomainNotification::new("Id", "Nota fiscal não encontrada")
}

pub struct NotaFiscalCommandHandler {
    add: RuleSet<AddNotaFiscalCommand>,
    update: RuleSet<UpdateNotaFiscalCommand>,
    remove: RuleSet<RemoveNotaFiscalCommand>,
}

impl Default for NotaFiscalCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl NotaFiscalCommandHandler {
    pub fn new() -> Self {
        Self {
            add: validators::add(),
            update: validators::update(),
            remove: validators::remove(),
        }
    }
}

#[async_trait]
impl<U> CommandHandler<AddNotaFiscalCommand, CommandScope<U>> for NotaFiscalCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AddNotaFiscalCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AddNotaFiscalCommand>(mediator, scope);
        if !lc.validate(&self.add, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let Some(venda) = uow.repository::<Venda>().get(&cmd.venda_id).await? else {
            return lc.reject([DomainNotification::new("VendaId", "Venda não encontrada")]);
        };
        if !venda.is_fechada() {
            return lc.reject([DomainNotification::new(
                "Venda",
                "A nota fiscal só pode ser emitida para uma venda finalizada",
            )]);
        }

        let notas = uow.repository::<NotaFiscal>();
        let existentes = notas
            .find(&NotaFiscalVendaIdSpecification::new(Some(cmd.venda_id)).into_composite())
            .await?;
        if !existentes.is_empty() {
            return lc.reject([DomainNotification::new(
                "VendaId",
                "A venda já possui nota fiscal",
            )]);
        }
        if notas.get(&cmd.id).await?.is_some() {
            return lc.reject([DomainNotification::new("Id", "Nota fiscal já cadastrada")]);
        }
        notas.add(cmd.into_nota_fiscal()).await?;
        // 经由销售的版本串行化同一笔销售上的并发开票
        uow.repository::<Venda>().update(venda).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<UpdateNotaFiscalCommand, CommandScope<U>> for NotaFiscalCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: UpdateNotaFiscalCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<UpdateNotaFiscalCommand>(mediator, scope);
        if !lc.validate(&self.update, &cmd)? {
            return Ok(());
        }

        let notas = scope.uow().repository::<NotaFiscal>();
        let Some(mut nota) = notas.get(&cmd.id).await? else {
            return lc.reject([nao_encontrada()]);
        };
        nota.atualizar(cmd.numero, cmd.data_emissao, cmd.observacoes);
        notas.update(nota).await?;

        lc.commit(scope.uow()).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveNotaFiscalCommand, CommandScope<U>> for NotaFiscalCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveNotaFiscalCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveNotaFiscalCommand>(mediator, scope);
        if !lc.validate(&self.remove, &cmd)? {
            return Ok(());
        }

        let notas = scope.uow().repository::<NotaFiscal>();
        if notas.get(&cmd.id).await?.is_none() {
            return lc.reject([nao_encontrada()]);
        }
        notas.remove(&cmd.id).await?;

        lc.commit(scope.uow()).await
    }
}
