//! 发票（NotaFiscal）用例
//!
//! 发票只能为已结算的销售开具，每笔销售至多一张。
//!
mod commands;
mod handler;
mod service;
mod validators;

pub use commands::{AddNotaFiscalCommand, RemoveNotaFiscalCommand, UpdateNotaFiscalCommand};
pub use handler::NotaFiscalCommandHandler;
pub use service::NotaFiscalApplicationService;

use crate::{context::CommandScope, error::AppResult, mediator::MediatorBuilder};
use rcm_domain::persist::UnitOfWork;
use std::sync::Arc;

pub fn register<U>(builder: &mut MediatorBuilder<CommandScope<U>>) -> AppResult<()>
where
    U: UnitOfWork + 'static,
{
    let handler = Arc::new(NotaFiscalCommandHandler::new());
    builder
        .register::<AddNotaFiscalCommand, _>(handler.clone())?
        .register::<UpdateNotaFiscalCommand, _>(handler.clone())?
        .register::<RemoveNotaFiscalCommand, _>(handler)?;
    builder
        .require::<AddNotaFiscalCommand>()
        .require::<UpdateNotaFiscalCommand>()
        .require::<RemoveNotaFiscalCommand>();
    Ok(())
}
