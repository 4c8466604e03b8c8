//! 应用装配：构建中介者并组装各聚合的应用服务
//!
use crate::{
    cliente::{self, ClienteApplicationService},
    config::ApplicationConfig,
    context::CommandScope,
    dispatcher::CommandDispatcher,
    error::AppResult,
    mediator::Mediator,
    nota_fiscal::{self, NotaFiscalApplicationService},
    produto::{self, ProdutoApplicationService},
    venda::{self, VendaApplicationService},
};
use rcm_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use std::sync::Arc;

/// 登记全部 RCM 命令处理器；任一命令缺少处理器时构建失败
pub fn build_mediator<U>(config: ApplicationConfig) -> AppResult<Mediator<CommandScope<U>>>
where
    U: UnitOfWork + 'static,
{
    let mut builder = Mediator::builder();
    builder.config(config);
    cliente::register(&mut builder)?;
    produto::register(&mut builder)?;
    venda::register(&mut builder)?;
    nota_fiscal::register(&mut builder)?;
    builder.build()
}

/// 共享同一中介者与工作单元工厂的应用服务集合
pub struct RcmApplication<F>
where
    F: UnitOfWorkFactory,
{
    pub dispatcher: CommandDispatcher<F>,
    pub clientes: ClienteApplicationService<F>,
    pub produtos: ProdutoApplicationService<F>,
    pub vendas: VendaApplicationService<F>,
    pub notas_fiscais: NotaFiscalApplicationService<F>,
}

impl<F> RcmApplication<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(factory: F, config: ApplicationConfig) -> AppResult<Self> {
        let mediator = Arc::new(build_mediator::<F::UnitOfWork>(config)?);
        let dispatcher = CommandDispatcher::new(mediator, Arc::new(factory));
        tracing::info!(
            commands = dispatcher.mediator().registered_commands().len(),
            "rcm application ready"
        );

        Ok(Self {
            clientes: ClienteApplicationService::new(dispatcher.clone()),
            produtos: ProdutoApplicationService::new(dispatcher.clone()),
            vendas: VendaApplicationService::new(dispatcher.clone()),
            notas_fiscais: NotaFiscalApplicationService::new(dispatcher.clone()),
            dispatcher,
        })
    }
}
