//! 销售（Venda）用例
//!
//! 除销售本身的增删改外，还包括挂接/移除商品与服务、按结算条件结算、支付分期。
//! 挂接商品会同时扣减商品库存，两个聚合的变更在同一工作单元中提交。
//!
mod commands;
mod handler;
mod service;
mod validators;

pub use commands::{
    AddVendaCommand, AttachProdutoCommand, AttachServicoCommand, FinalizarVendaCommand,
    PagarParcelaCommand, RemoveProdutoVendaCommand, RemoveServicoCommand, RemoveVendaCommand,
    UpdateVendaCommand,
};
pub use handler::VendaCommandHandler;
pub use service::VendaApplicationService;

use crate::{context::CommandScope, error::AppResult, mediator::MediatorBuilder};
use rcm_domain::persist::UnitOfWork;
use std::sync::Arc;

pub fn register<U>(builder: &mut MediatorBuilder<CommandScope<U>>) -> AppResult<()>
where
    U: UnitOfWork + 'static,
{
    let handler = Arc::new(VendaCommandHandler::new());
    builder
        .register::<AddVendaCommand, _>(handler.clone())?
        .register::<UpdateVendaCommand, _>(handler.clone())?
        .register::<RemoveVendaCommand, _>(handler.clone())?
        .register::<AttachProdutoCommand, _>(handler.clone())?
        .register::<RemoveProdutoVendaCommand, _>(handler.clone())?
        .register::<AttachServicoCommand, _>(handler.clone())?
        .register::<RemoveServicoCommand, _>(handler.clone())?
        .register::<FinalizarVendaCommand, _>(handler.clone())?
        .register::<PagarParcelaCommand, _>(handler)?;
    builder
        .require::<AddVendaCommand>()
        .require::<UpdateVendaCommand>()
        .require::<RemoveVendaCommand>()
        .require::<AttachProdutoCommand>()
        .require::<RemoveProdutoVendaCommand>()
        .require::<AttachServicoCommand>()
        .require::<RemoveServicoCommand>()
        .require::<FinalizarVendaCommand>()
        .require::<PagarParcelaCommand>();
    Ok(())
}
