//! 商品（Produto）用例
//!
mod commands;
mod handler;
mod service;
mod validators;

pub use commands::{AddProdutoCommand, RemoveProdutoCommand, UpdateProdutoCommand};
pub use handler::ProdutoCommandHandler;
pub use service::ProdutoApplicationService;

use crate::{context::CommandScope, error::AppResult, mediator::MediatorBuilder};
use rcm_domain::persist::UnitOfWork;
use std::sync::Arc;

pub fn register<U>(builder: &mut MediatorBuilder<CommandScope<U>>) -> AppResult<()>
where
    U: UnitOfWork + 'static,
{
    let handler = Arc::new(ProdutoCommandHandler::new());
    builder
        .register::<AddProdutoCommand, _>(handler.clone())?
        .register::<UpdateProdutoCommand, _>(handler.clone())?
        .register::<RemoveProdutoCommand, _>(handler)?;
    builder
        .require::<AddProdutoCommand>()
        .require::<UpdateProdutoCommand>()
        .require::<RemoveProdutoCommand>();
    Ok(())
}
