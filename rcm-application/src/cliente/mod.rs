//! 客户（Cliente）用例：命令、校验规则、处理器与应用服务
//!
mod commands;
mod handler;
mod service;
mod validators;

pub use commands::{AddClienteCommand, RemoveClienteCommand, UpdateClienteCommand};
pub use handler::ClienteCommandHandler;
pub use service::ClienteApplicationService;

use crate::{context::CommandScope, error::AppResult, mediator::MediatorBuilder};
use rcm_domain::persist::UnitOfWork;
use std::sync::Arc;

/// 登记全部客户命令并声明为必需
pub fn register<U>(builder: &mut MediatorBuilder<CommandScope<U>>) -> AppResult<()>
where
    U: UnitOfWork + 'static,
{
    let handler = Arc::new(ClienteCommandHandler::new());
    builder
        .register::<AddClienteCommand, _>(handler.clone())?
        .register::<UpdateClienteCommand, _>(handler.clone())?
        .register::<RemoveClienteCommand, _>(handler)?;
    builder
        .require::<AddClienteCommand>()
        .require::<UpdateClienteCommand>()
        .require::<RemoveClienteCommand>();
    Ok(())
}
