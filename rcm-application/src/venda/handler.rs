use super::commands::*;
use super::validators;
use crate::{
    command_handler::CommandHandler,
    context::{CommandScope, NotificationScope},
    error::AppResult,
    lifecycle::CommandLifecycle,
    mediator::Mediator,
};
use async_trait::async_trait;
use rcm_domain::models::{Cliente, CondicaoPagamento, Produto, Servico, Venda};
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::{Repository, UnitOfWork};
use rcm_domain::validation::RuleSet;
use uuid::Uuid;

/// 读取销售；不存在时以 `key` 拒绝命令并返回 `None`
async fn carregar_venda<S, R>(
    lc: &mut CommandLifecycle<'_, S>,
    vendas: &R,
    key: &'static str,
    id: Uuid,
) -> AppResult<Option<Venda>>
where
    S: NotificationScope + 'static,
    R: Repository<Venda>,
{
    match vendas.get(&id).await? {
        Some(venda) => Ok(Some(venda)),
        None => {
            lc.reject([DomainNotification::new(key, "Venda não encontrada")])?;
            Ok(None)
        }
    }
}

async fn carregar_produto<S, R>(
    lc: &mut CommandLifecycle<'_, S>,
    produtos: &R,
    id: Uuid,
) -> AppResult<Option<Produto>>
where
    S: NotificationScope + 'static,
    R: Repository<Produto>,
{
    match produtos.get(&id).await? {
        Some(produto) => Ok(Some(produto)),
        None => {
            lc.reject([DomainNotification::new("ProdutoId", "Produto não encontrado")])?;
            Ok(None)
        }
    }
}

pub struct VendaCommandHandler {
    add: RuleSet<AddVendaCommand>,
    update: RuleSet<UpdateVendaCommand>,
    remove: RuleSet<RemoveVendaCommand>,
    attach_produto: RuleSet<AttachProdutoCommand>,
    remove_produto: RuleSet<RemoveProdutoVendaCommand>,
    attach_servico: RuleSet<AttachServicoCommand>,
    remove_servico: RuleSet<RemoveServicoCommand>,
    finalizar: RuleSet<FinalizarVendaCommand>,
    pagar_parcela: RuleSet<PagarParcelaCommand>,
}

impl Default for VendaCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl VendaCommandHandler {
    pub fn new() -> Self {
        Self {
            add: validators::add(),
            update: validators::update(),
            remove: validators::remove(),
            attach_produto: validators::attach_produto(),
            remove_produto: validators::remove_produto(),
            attach_servico: validators::attach_servico(),
            remove_servico: validators::remove_servico(),
            finalizar: validators::finalizar(),
            pagar_parcela: validators::pagar_parcela(),
        }
    }
}

#[async_trait]
impl<U> CommandHandler<AddVendaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AddVendaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AddVendaCommand>(mediator, scope);
        if !lc.validate(&self.add, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let clientes = uow.repository::<Cliente>();
        let Some(cliente) = clientes.get(&cmd.cliente_id).await? else {
            return lc.reject([DomainNotification::new("ClienteId", "Cliente não encontrado")]);
        };
        let vendas = uow.repository::<Venda>();
        if vendas.get(&cmd.id).await?.is_some() {
            return lc.reject([DomainNotification::new("Id", "Venda já cadastrada")]);
        }
        vendas
            .add(Venda::new(cmd.id, cmd.cliente_id, cmd.data))
            .await?;
        // 与并发的客户删除互斥
        clientes.update(cliente).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<UpdateVendaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: UpdateVendaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<UpdateVendaCommand>(mediator, scope);
        if !lc.validate(&self.update, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "Id", cmd.id).await? else {
            return Ok(());
        };
        let novo_cliente = if venda.cliente_id() != cmd.cliente_id {
            let Some(cliente) = uow.repository::<Cliente>().get(&cmd.cliente_id).await? else {
                return lc.reject([DomainNotification::new("ClienteId", "Cliente não encontrado")]);
            };
            Some(cliente)
        } else {
            None
        };
        if lc
            .check(venda.atualizar(cmd.cliente_id, cmd.data, cmd.status))?
            .is_none()
        {
            return Ok(());
        }
        vendas.update(venda).await?;
        if let Some(cliente) = novo_cliente {
            uow.repository::<Cliente>().update(cliente).await?;
        }

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveVendaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveVendaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveVendaCommand>(mediator, scope);
        if !lc.validate(&self.remove, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(venda) = carregar_venda(&mut lc, &vendas, "Id", cmd.id).await? else {
            return Ok(());
        };
        if venda.is_fechada() {
            return lc.reject([DomainNotification::new(
                "Venda",
                "Não é possível remover uma venda fechada",
            )]);
        }

        // 未结算销售占用的库存归还
        let produtos = uow.repository::<Produto>();
        for linha in venda.produtos() {
            if let Some(mut produto) = produtos.get(&linha.produto_id).await? {
                produto.repor_estoque(linha.quantidade);
                produtos.update(produto).await?;
            }
        }
        vendas.remove(&cmd.id).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<AttachProdutoCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AttachProdutoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AttachProdutoCommand>(mediator, scope);
        if !lc.validate(&self.attach_produto, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let produtos = uow.repository::<Produto>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        let Some(mut produto) = carregar_produto(&mut lc, &produtos, cmd.produto_id).await? else {
            return Ok(());
        };

        if lc
            .check(venda.adicionar_produto(&produto, cmd.quantidade))?
            .is_none()
        {
            return Ok(());
        }
        if lc.check(produto.baixar_estoque(cmd.quantidade))?.is_none() {
            return Ok(());
        }
        vendas.update(venda).await?;
        produtos.update(produto).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveProdutoVendaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveProdutoVendaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveProdutoVendaCommand>(mediator, scope);
        if !lc.validate(&self.remove_produto, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        let Some(quantidade) = lc.check(venda.remover_produto(cmd.produto_id))? else {
            return Ok(());
        };

        let produtos = uow.repository::<Produto>();
        if let Some(mut produto) = produtos.get(&cmd.produto_id).await? {
            produto.repor_estoque(quantidade);
            produtos.update(produto).await?;
        }
        vendas.update(venda).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<AttachServicoCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: AttachServicoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<AttachServicoCommand>(mediator, scope);
        if !lc.validate(&self.attach_servico, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        let servico = Servico {
            id: cmd.servico_id,
            descricao: cmd.descricao,
            valor: cmd.valor,
        };
        if lc.check(venda.adicionar_servico(servico))?.is_none() {
            return Ok(());
        }
        vendas.update(venda).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<RemoveServicoCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: RemoveServicoCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<RemoveServicoCommand>(mediator, scope);
        if !lc.validate(&self.remove_servico, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        if lc.check(venda.remover_servico(cmd.servico_id))?.is_none() {
            return Ok(());
        }
        vendas.update(venda).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<FinalizarVendaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: FinalizarVendaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<FinalizarVendaCommand>(mediator, scope);
        if !lc.validate(&self.finalizar, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        let condicao = CondicaoPagamento::new(
            cmd.quantidade_parcelas,
            cmd.data_primeira_parcela,
            cmd.intervalo_dias,
        );
        if lc.check(venda.finalizar(condicao))?.is_none() {
            return Ok(());
        }
        vendas.update(venda).await?;

        lc.commit(uow).await
    }
}

#[async_trait]
impl<U> CommandHandler<PagarParcelaCommand, CommandScope<U>> for VendaCommandHandler
where
    U: UnitOfWork + 'static,
{
    async fn handle(
        &self,
        mediator: &Mediator<CommandScope<U>>,
        scope: &CommandScope<U>,
        cmd: PagarParcelaCommand,
    ) -> AppResult<()> {
        let mut lc = CommandLifecycle::start::<PagarParcelaCommand>(mediator, scope);
        if !lc.validate(&self.pagar_parcela, &cmd)? {
            return Ok(());
        }

        let uow = scope.uow();
        let vendas = uow.repository::<Venda>();
        let Some(mut venda) = carregar_venda(&mut lc, &vendas, "VendaId", cmd.venda_id).await?
        else {
            return Ok(());
        };
        if lc
            .check(venda.pagar_parcela(cmd.numero, cmd.data_pagamento))?
            .is_none()
        {
            return Ok(());
        }
        vendas.update(venda).await?;

        lc.commit(uow).await
    }
}
