use super::commands::{AddProdutoCommand, RemoveProdutoCommand, UpdateProdutoCommand};
use super::validators;
use crate::{
    command_handler::CommandHandler, context::CommandScope, error::AppResult,
    lifecycle::CommandLifecycle, mediator::Mediator,
};
use async_trait::async_trait;
use rcm_domain::models::{Produto, Venda, VendaStatus, VendaStatusSpecification};
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::{Repository, UnitOfWork};
use rcm_domain::specification::Specification;
use rcm_domain::validation::RuleSet;

fn nao_encontrado() -> DomainNotification {
    DomainNotification::new("Id", "Produto não encontrado")
}

pub struct ProdutoCommandHandler {
    add: RuleSet<AddProdutoCommand>,
    update: RuleSet<UpdateProdutoCommand>,
    remove: RuleSet<RemoveProdutoCommand>,
}

impl Default for ProdutoCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProdutoCommandHandler {
    pub fn new() -> Self {
        Self {
            add: validators::produto(),
            update: validators::produto(),
            remove: validators::remove(),
        }
    }
}

#[async_trait]
impl<U> CommandHandler<AddProdutoCommand, CommandScope<U>> for ProdutoCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AddProdutoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AddProdutoCommand>(mediator, scope);
        if !lc.validate(&self.add, &cmd)? {
            return Ok(());
        }

        let produtos = scope.uow().repository::<Produto>();
        if produtos.get(&cmd.id).await?.is_some() {
            return lc.reject([DomainNotification::new("Id", "Produto já cadastrado")]);
        }
        produtos.add(cmd.into_produto()).await?;

        lc.commit(scope.uow()).await
    }
}

#[async_trait]
impl<U> CommandHandler<UpdateProdutoCommand, CommandScope<U>> for ProdutoCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: UpdateProdutoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<UpdateProdutoCommand>(mediator, scope);
        if !lc.validate(&self.update, &cmd)? {
            return Ok(());
        }

        let produtos = scope.uow().repository::<Produto>();
        let Some(mut produto) = produtos.get(&cmd.id).await? else {
            return lc.reject([nao_encontrado()]);
        };
        produto.atualizar(cmd.nome, cmd.valor, cmd.quantidade);
        produtos.update(produto).await?;

        lc.commit(scope.uow()).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveProdutoCommand, CommandScope<U>> for ProdutoCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveProdutoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveProdutoCommand>(mediator, scope);
        if !lc.validate(&self.remove, &cmd)? {
            return Ok(());
        }

        let produtos = scope.uow().repository::<Produto>();
        if produtos.get(&cmd.id).await?.is_none() {
            return lc.reject([nao_encontrado()]);
        }

        // 仍在未结算销售中的商品不可删除
        let abertas = scope
            .uow()
            .repository::<Venda>()
            .find(&VendaStatusSpecification::new(Some(VendaStatus::Aberta)).into_composite())
            .await?;
        if abertas
            .iter()
            .any(|v| v.produtos().iter().any(|p| p.produto_id == cmd.id))
        {
            return lc.reject([DomainNotification::new(
                "Produto",
                "Produto está em uma venda em aberto",
            )]);
        }
        produtos.remove(&cmd.id).await?;

        lc.commit(scope.uow()).await
    }
}
