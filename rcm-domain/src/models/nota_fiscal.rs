//! 发票（NotaFiscal）聚合
//!
use crate::specification::Specification;
use crate::value_object::Version;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotaFiscal {
    id: Uuid,
    #[serde(default)]
    version: Version,
    venda_id: Uuid,
    numero: String,
    data_emissao: NaiveDate,
    observacoes: String,
}

impl NotaFiscal {
    pub fn new(
        id: Uuid,
        venda_id: Uuid,
        numero: impl Into<String>,
        data_emissao: NaiveDate,
        observacoes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            version: Version::new(),
            venda_id,
            numero: numero.into(),
            data_emissao,
            observacoes: observacoes.into(),
        }
    }

    pub fn venda_id(&self) -> Uuid {
        self.venda_id
    }

    pub fn numero(&self) -> &str {
        &self.numero
    }

    pub fn data_emissao(&self) -> NaiveDate {
        self.data_emissao
    }

    pub fn observacoes(&self) -> &str {
        &self.observacoes
    }

    pub fn atualizar(&mut self, numero: String, data_emissao: NaiveDate, observacoes: String) {
        self.numero = numero;
        self.data_emissao = data_emissao;
        self.observacoes = observacoes;
    }
}

crate::impl_aggregate!(NotaFiscal, Uuid, "NotaFiscal");

/// 按所属销售过滤；`None` 不过滤
#[derive(Debug, Clone, Copy, Default)]
pub struct NotaFiscalVendaIdSpecification {
    venda_id: Option<Uuid>,
}

impl NotaFiscalVendaIdSpecification {
    pub fn new(venda_id: Option<Uuid>) -> Self {
        Self { venda_id }
    }
}

impl Specification<NotaFiscal> for NotaFiscalVendaIdSpecification {
    fn is_satisfied_by(&self, candidate: &NotaFiscal) -> bool {
        self.venda_id.is_none_or(|id| candidate.venda_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    fn nota(venda_id: Uuid) -> NotaFiscal {
        NotaFiscal::new(
            Uuid::new_v4(),
            venda_id,
            "000123",
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            "",
        )
    }

    #[test]
    fn atualizar_keeps_identity() {
        let mut n = nota(Uuid::new_v4());
        let id = *n.id();
        n.atualizar(
            "000124".into(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            "retificada".into(),
        );
        assert_eq!(*n.id(), id);
        assert_eq!(n.numero(), "000124");
        assert_eq!(n.observacoes(), "retificada");
    }

    #[test]
    fn venda_id_specification() {
        let venda = Uuid::new_v4();
        let n = nota(venda);
        assert!(NotaFiscalVendaIdSpecification::new(Some(venda)).is_satisfied_by(&n));
        assert!(!NotaFiscalVendaIdSpecification::new(Some(Uuid::new_v4())).is_satisfied_by(&n));
        assert!(NotaFiscalVendaIdSpecification::default().is_satisfied_by(&n));
    }
}
