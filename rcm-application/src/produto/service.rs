use super::commands::{AddProdutoCommand, RemoveProdutoCommand, UpdateProdutoCommand};
use crate::{
    dispatcher::{CommandDispatcher, CommandResult},
    error::AppResult,
};
use rcm_domain::models::{Produto, ProdutoNomeSpecification};
use rcm_domain::persist::UnitOfWorkFactory;
use rcm_domain::specification::{CompositeSpecification, Specification};
use uuid::Uuid;

pub struct ProdutoApplicationService<F>
where
    F: UnitOfWorkFactory,
{
    dispatcher: CommandDispatcher<F>,
}

impl<F> ProdutoApplicationService<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(dispatcher: CommandDispatcher<F>) -> Self {
        Self { dispatcher }
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    pub async fn add(&self, cmd: AddProdutoCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    pub async fn update(&self, cmd: UpdateProdutoCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(RemoveProdutoCommand { id }).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Produto>> {
        self.dispatcher.get::<Produto>(&id).await
    }

    pub async fn get(&self, spec: &CompositeSpecification<Produto>) -> AppResult<Vec<Produto>> {
        self.dispatcher.find(spec).await
    }

    pub async fn search(&self, nome: Option<&str>) -> AppResult<Vec<Produto>> {
        let spec = ProdutoNomeSpecification::from_input(nome).into_composite();
        self.get(&spec).await
    }
}
