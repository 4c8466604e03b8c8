use crate::command::Command;
use chrono::NaiveDate;
use rcm_domain::models::NotaFiscal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AddNotaFiscalCommand {
    pub id: Uuid,
    pub venda_id: Uuid,
    pub numero: String,
    pub data_emissao: NaiveDate,
    pub observacoes: String,
}

impl Command for AddNotaFiscalCommand {
    const NAME: &'static str = "AddNotaFiscalCommand";
}

impl AddNotaFiscalCommand {
    pub(crate) fn into_nota_fiscal(self) -> NotaFiscal {
        NotaFiscal::new(
            self.id,
            self.venda_id,
            self.numero,
            self.data_emissao,
            self.observacoes,
        )
    }
}

/// 修改发票号、开具日期与备注（所属销售不可变更）
#[derive(Debug, Clone)]
pub struct UpdateNotaFiscalCommand {
    pub id: Uuid,
    pub numero: String,
    pub data_emissao: NaiveDate,
    pub observacoes: String,
}

impl Command for UpdateNotaFiscalCommand {
    const NAME: &'static str = "UpdateNotaFiscalCommand";
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveNotaFiscalCommand {
    pub id: Uuid,
}

impl Command for RemoveNotaFiscalCommand {
    const NAME: &'static str = "RemoveNotaFiscalCommand";
}
