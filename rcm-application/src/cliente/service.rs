use super::commands::{AddClienteCommand, RemoveClienteCommand, UpdateClienteCommand};
use crate::{
    dispatcher::{CommandDispatcher, CommandResult},
    error::AppResult,
};
use rcm_domain::models::{Cliente, ClienteNomeSpecification};
use rcm_domain::persist::UnitOfWorkFactory;
use rcm_domain::specification::{CompositeSpecification, Specification};
use uuid::Uuid;

pub struct ClienteApplicationService<F>
where
    F: UnitOfWorkFactory,
{
    dispatcher: CommandDispatcher<F>,
}

impl<F> ClienteApplicationService<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(dispatcher: CommandDispatcher<F>) -> Self {
        Self { dispatcher }
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    pub async fn add(&self, cmd: AddClienteCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    pub async fn update(&self, cmd: UpdateClienteCommand) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(cmd).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> AppResult<CommandResult> {
        self.dispatcher.dispatch(RemoveClienteCommand { id }).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Cliente>> {
        self.dispatcher.get::<Cliente>(&id).await
    }

    pub async fn get(&self, spec: &CompositeSpecification<Cliente>) -> AppResult<Vec<Cliente>> {
        self.dispatcher.find(spec).await
    }

    /// 按名称搜索；空白输入返回全部
    pub async fn search(&self, nome: Option<&str>) -> AppResult<Vec<Cliente>> {
        let spec = ClienteNomeSpecification::from_input(nome).into_composite();
        self.get(&spec).await
    }
}
