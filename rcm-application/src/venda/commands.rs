use crate::command::Command;
use chrono::NaiveDate;
use rcm_domain::models::VendaStatus;
use rcm_domain::value_object::Money;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddVendaCommand {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub data: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UpdateVendaCommand {
    pub id: Uuid,
    pub cliente_id: Uuid,
    pub data: NaiveDate,
    pub status: VendaStatus,
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveVendaCommand {
    pub id: Uuid,
}

/// 向销售添加商品（同一商品再次添加时累加数量）
#[derive(Debug, Clone, Copy)]
pub struct AttachProdutoCommand {
    pub venda_id: Uuid,
    pub produto_id: Uuid,
    pub quantidade: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveProdutoVendaCommand {
    pub venda_id: Uuid,
    pub produto_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct AttachServicoCommand {
    pub venda_id: Uuid,
    pub servico_id: Uuid,
    pub descricao: String,
    pub valor: Money,
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveServicoCommand {
    pub venda_id: Uuid,
    pub servico_id: Uuid,
}

/// 结算：按分期数、首期日期与间隔天数生成分期并关闭销售
#[derive(Debug, Clone, Copy)]
pub struct FinalizarVendaCommand {
    pub venda_id: Uuid,
    pub quantidade_parcelas: u32,
    pub data_primeira_parcela: NaiveDate,
    pub intervalo_dias: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PagarParcelaCommand {
    pub venda_id: Uuid,
    pub numero: u32,
    pub data_pagamento: NaiveDate,
}

macro_rules! impl_command {
    ($($ty:ident),* $(,)?) => {$(
        impl Command for $ty {
            const NAME: &'static str = stringify!($ty);
        }
    )*};
}

impl_command!(
    AddVendaCommand,
    UpdateVendaCommand,
    RemoveVendaCommand,
    AttachProdutoCommand,
    RemoveProdutoVendaCommand,
    AttachServicoCommand,
    RemoveServicoCommand,
    FinalizarVendaCommand,
    PagarParcelaCommand,
);
