use super::commands::{AddNotaFiscalCommand, RemoveNotaFiscalCommand, UpdateNotaFiscalCommand};
use crate::{
    dispatcher::{CommandDispatcher, CommandResult},
    error::AppResult,
};
use rcm_domain::models::{NotaFiscal, NotaFiscalVendaIdSpecification};
use rcm_domain::persist::UnitOfWorkFactory;
use rcm_domain::specification::{CompositeSpecification, Specification};
use uuid::Uuid;

pub struct NotaFiscalApplicationService<F>
where
    F: UnitOfWorkFactory,
{
    dispatcher: CommandDispatcher<F>,
}

impl<F> NotaFiscalApplicationService<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(dispatcher: CommandDispatcher<F>) -> Self {
        Self { dispatcher }
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id, venda_id = %cmd.venda_id))]
    pub async fn add(&self, cmd: AddNotaFiscalCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    pub async fn update(&self, cmd: UpdateNotaFiscalCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(RemoveNotaFiscalCommand { id }).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<NotaFiscal>> {
        self.dispatcher.get::<NotaFiscal>(&id).await
    }

    pub async fn get(
        &self,
        spec: &CompositeSpecification<NotaFiscal>,
    ) -> AppResult<Vec<NotaFiscal>> {
        self.dispatcher.find(spec).await
    }

    pub async fn get_by_venda(&self, venda_id: Uuid) -> AppResult<Option<NotaFiscal>> {
        let spec = NotaFiscalVendaIdSpecification::new(Some(venda_id)).into_composite();
        Ok(self.get(&spec).await?.into_iter().next())
    }
}
