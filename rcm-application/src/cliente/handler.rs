use super::commands::{AddClienteCommand, RemoveClienteCommand, UpdateClienteCommand};
use super::validators;
use crate::{
    command_handler::CommandHandler, context::CommandScope, error::AppResult,
    lifecycle::CommandLifecycle, mediator::Mediator,
};
use async_trait::async_trait;
use rcm_domain::models::{Cliente, Venda, VendaClienteIdSpecification};
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::{Repository, UnitOfWork};
use rcm_domain::specification::Specification;
use rcm_domain::validation::RuleSet;

fn nao_encontrado() -> DomainNotification {
    DomainNotification::new("Id", "Cliente não encontrado")
}

pub struct ClienteCommandHandler {
    add: RuleSet<AddClienteCommand>,
    update: RuleSet<UpdateClienteCommand>,
    remove: RuleSet<RemoveClienteCommand>,
}

impl Default for ClienteCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ClienteCommandHandler {
    pub fn new() -> Self {
        Self {
            add: validators::cliente(),
            update: validators::cliente(),
            remove: validators::remove(),
        }
    }
}

#[async_trait]
impl<U> CommandHandler<AddClienteCommand, CommandScope<U>> for ClienteCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AddClienteCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AddClienteCommand>(mediator, scope);
        if !lc.validate(&self.add, &cmd)? {
            return Ok(());
        }

        let clientes = scope.uow().repository::<Cliente>();
        if clientes.get(&cmd.id).await?.is_some() {
            return lc.reject([DomainNotification::new("Id", "Cliente já cadastrado")]);
        }
        clientes.add(cmd.into_cliente()).await?;

        lc.commit(scope.uow()).await
    }
}

#[async_trait]
impl<U> CommandHandler<UpdateClienteCommand, CommandScope<U>> for ClienteCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: UpdateClienteCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<UpdateClienteCommand>(mediator, scope);
        if !lc.validate(&self.update, &cmd)? {
            return Ok(());
        }

        let clientes = scope.uow().repository::<Cliente>();
        let Some(mut cliente) = clientes.get(&cmd.id).await? else {
            return lc.reject([nao_encontrado()]);
        };
        cliente.atualizar(
            cmd.nome,
            cmd.descricao,
            cmd.contato,
            cmd.endereco,
            cmd.documento,
        );
        clientes.update(cliente).await?;

        lc.commit(scope.uow()).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveClienteCommand, CommandScope<U>> for ClienteCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveClienteCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveClienteCommand>(mediator, scope);
        if !lc.validate(&self.remove, &cmd)? {
            return Ok(());
        }

        let clientes = scope.uow().repository::<Cliente>();
        if clientes.get(&cmd.id).await?.is_none() {
            return lc.reject([nao_encontrado()]);
        }

        let vendas = scope
            .uow()
            .repository::<Venda>()
            .find(&VendaClienteIdSpecification::new(Some(cmd.id)).into_composite())
            .await?;
        if !vendas.is_empty() {
            return lc.reject([DomainNotification::new(
                "Cliente",
                format!("Cliente possui {} venda(s) cadastrada(s)", vendas.len()),
            )]);
        }
        clientes.remove(&cmd.id).await?;

        lc.commit(scope.uow()).await
    }
}
