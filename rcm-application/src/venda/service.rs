use super::commands::*;
use crate::{
    dispatcher::{CommandDispatcher, CommandResult},
    error::AppResult,
};
use chrono::NaiveDate;
use rcm_domain::models::{Venda, VendaFilter, VendaStatus};
use rcm_domain::persist::UnitOfWorkFactory;
use rcm_domain::specification::CompositeSpecification;
use rcm_domain::value_object::Money;
use uuid::Uuid;

pub struct VendaApplicationService<F>
where
    F: UnitOfWorkFactory,
{
    dispatcher: CommandDispatcher<F>,
}

impl<F> VendaApplicationService<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(dispatcher: CommandDispatcher<F>) -> Self {
        Self { dispatcher }
    }

    #[tracing::instrument(skip(self))]
    pub async fn add(&self, id: Uuid, cliente_id: Uuid, data: NaiveDate) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(AddVendaCommand {
                id,
                cliente_id,
                data,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        cliente_id: Uuid,
        data: NaiveDate,
        status: VendaStatus,
    ) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(UpdateVendaCommand {
                id,
                cliente_id,
                data,
                status,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(RemoveVendaCommand { id }).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn attach_produto(
        &self,
        venda_id: Uuid,
        produto_id: Uuid,
        quantidade: u32,
    ) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(AttachProdutoCommand {
                venda_id,
                produto_id,
                quantidade,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_produto(&self, venda_id: Uuid, produto_id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(RemoveProdutoVendaCommand {
                venda_id,
                produto_id,
            })
            .await
    }

    #[tracing::instrument(skip(self, descricao))]
    pub async fn attach_servico(
        &self,
        venda_id: Uuid,
        servico_id: Uuid,
        descricao: impl Into<String>,
        valor: Money,
    ) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(AttachServicoCommand {
                venda_id,
                servico_id,
                descricao: descricao.into(),
                valor,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_servico(&self, venda_id: Uuid, servico_id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(RemoveServicoCommand {
                venda_id,
                servico_id,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn finalizar(
        &self,
        venda_id: Uuid,
        quantidade_parcelas: u32,
        data_primeira_parcela: NaiveDate,
        intervalo_dias: u32,
    ) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(FinalizarVendaCommand {
                venda_id,
                quantidade_parcelas,
                data_primeira_parcela,
                intervalo_dias,
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn pagar_parcela(
        &self,
        venda_id: Uuid,
        numero: u32,
        data_pagamento: NaiveDate,
    ) -> AppResult<CommandResult> {
        self.dispatcher
            .dispatch(PagarParcelaCommand {
                venda_id,
                numero,
                data_pagamento,
            })
            .await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Venda>> {
        self.dispatcher.get::<Venda>(&id).await
    }

    pub async fn get(&self, spec: &CompositeSpecification<Venda>) -> AppResult<Vec<Venda>> {
        self.dispatcher.find(spec).await
    }

    /// 以原始过滤参数搜索；无法解析的参数视为不过滤
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, filter: &VendaFilter) -> AppResult<Vec<Venda>> {
        self.get(&filter.to_specification()).await
    }
}
