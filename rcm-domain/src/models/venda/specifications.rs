//! 销售查询规约
//!
//! 每个叶子规约的参数在构造前已完成解析；参数为 `None` 时规约恒为真。
//!
use super::{Venda, VendaStatus};
use crate::input::{parse_date, parse_money, parse_text, parse_uuid};
use crate::specification::{CompositeSpecification, Specification};
use crate::value_object::Money;
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct VendaClienteIdSpecification {
    cliente_id: Option<Uuid>,
}

impl VendaClienteIdSpecification {
    pub fn new(cliente_id: Option<Uuid>) -> Self {
        Self { cliente_id }
    }
}

impl Specification<Venda> for VendaClienteIdSpecification {
    fn is_satisfied_by(&self, candidate: &Venda) -> bool {
        self.cliente_id.is_none_or(|id| candidate.cliente_id == id)
    }
}

/// 合计金额区间（闭区间，任一端可缺省）
#[derive(Debug, Clone, Copy, Default)]
pub struct VendaValorTotalSpecification {
    min: Option<Money>,
    max: Option<Money>,
}

impl VendaValorTotalSpecification {
    pub fn new(min: Option<Money>, max: Option<Money>) -> Self {
        Self { min, max }
    }
}

impl Specification<Venda> for VendaValorTotalSpecification {
    fn is_satisfied_by(&self, candidate: &Venda) -> bool {
        let total = candidate.valor_total();
        self.min.is_none_or(|min| total >= min) && self.max.is_none_or(|max| total <= max)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VendaStatusSpecification {
    status: Option<VendaStatus>,
}

impl VendaStatusSpecification {
    pub fn new(status: Option<VendaStatus>) -> Self {
        Self { status }
    }

    /// 空白或无法识别的状态视为“不过滤”
    pub fn from_input(raw: Option<&str>) -> Self {
        let status = parse_text(raw).and_then(|s| match s.parse::<VendaStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unknown status filter");
                None
            }
        });
        Self::new(status)
    }
}

impl Specification<Venda> for VendaStatusSpecification {
    fn is_satisfied_by(&self, candidate: &Venda) -> bool {
        self.status.is_none_or(|status| candidate.status == status)
    }
}

/// 销售日期区间（闭区间，任一端可缺省）
#[derive(Debug, Clone, Copy, Default)]
pub struct VendaDataSpecification {
    inicio: Option<NaiveDate>,
    fim: Option<NaiveDate>,
}

impl VendaDataSpecification {
    pub fn new(inicio: Option<NaiveDate>, fim: Option<NaiveDate>) -> Self {
        Self { inicio, fim }
    }
}

impl Specification<Venda> for VendaDataSpecification {
    fn is_satisfied_by(&self, candidate: &Venda) -> bool {
        self.inicio.is_none_or(|d| candidate.data >= d)
            && self.fim.is_none_or(|d| candidate.data <= d)
    }
}

/// 来自外部输入的原始过滤参数（均为可选文本）
#[derive(Debug, Clone, Default)]
pub struct VendaFilter {
    pub cliente_id: Option<String>,
    pub min_valor: Option<String>,
    pub max_valor: Option<String>,
    pub status: Option<String>,
    pub data_inicial: Option<String>,
    pub data_final: Option<String>,
}

impl VendaFilter {
    /// 解析全部参数并以 AND 组合四个叶子规约
    pub fn to_specification(&self) -> CompositeSpecification<Venda> {
        VendaClienteIdSpecification::new(parse_uuid(self.cliente_id.as_deref()))
            .and(VendaValorTotalSpecification::new(
                parse_money(self.min_valor.as_deref()),
                parse_money(self.max_valor.as_deref()),
            ))
            .and(VendaStatusSpecification::from_input(self.status.as_deref()))
            .and(VendaDataSpecification::new(
                parse_date(self.data_inicial.as_deref()),
                parse_date(self.data_final.as_deref()),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::produto::Produto;

    fn venda_com_total(cents: i64, status: VendaStatus) -> Venda {
        let mut v = Venda::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        let p = Produto::builder()
            .id(Uuid::new_v4())
            .nome("Item")
            .valor(Money::from_cents(cents))
            .build();
        v.adicionar_produto(&p, 1).unwrap();
        v.status = status;
        v
    }

    #[test]
    fn valor_and_status_select_only_matching_sale() {
        let vendas = [
            venda_com_total(5_000, VendaStatus::Aberta),
            venda_com_total(15_000, VendaStatus::Aberta),
            venda_com_total(60_000, VendaStatus::Fechada),
        ];

        let spec = VendaValorTotalSpecification::new(
            Some(Money::from_units(100)),
            Some(Money::from_units(500)),
        )
        .and(VendaStatusSpecification::new(Some(VendaStatus::Aberta)));

        let selected: Vec<_> = vendas.iter().filter(|v| spec.to_predicate()(*v)).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].valor_total(), Money::from_units(150));
    }

    #[test]
    fn unset_parameters_are_always_true() {
        let v = venda_com_total(1, VendaStatus::Fechada);
        assert!(VendaClienteIdSpecification::default().is_satisfied_by(&v));
        assert!(VendaValorTotalSpecification::default().is_satisfied_by(&v));
        assert!(VendaStatusSpecification::default().is_satisfied_by(&v));
        assert!(VendaDataSpecification::default().is_satisfied_by(&v));
        assert!(VendaFilter::default().to_specification().evaluate(&v));
    }

    #[test]
    fn malformed_filter_input_means_no_filter_for_that_field() {
        let v = venda_com_total(15_000, VendaStatus::Aberta);
        let filter = VendaFilter {
            cliente_id: Some("???".into()),
            min_valor: Some("cem reais".into()),
            max_valor: Some("200".into()),
            status: Some("".into()),
            data_inicial: Some("2024-13-40".into()),
            data_final: Some("31/01/2024".into()),
        };
        assert!(filter.to_specification().evaluate(&v));

        let too_cheap = VendaFilter {
            max_valor: Some("100,00".into()),
            ..Default::default()
        };
        assert!(!too_cheap.to_specification().evaluate(&v));
    }

    #[test]
    fn date_range_is_inclusive() {
        let v = venda_com_total(100, VendaStatus::Aberta);
        let day = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert!(VendaDataSpecification::new(day, day).is_satisfied_by(&v));
        assert!(
            !VendaDataSpecification::new(NaiveDate::from_ymd_opt(2024, 1, 16), None)
                .is_satisfied_by(&v)
        );
    }

    #[test]
    fn valor_total_filter_never_panics_on_out_of_range_totals() {
        let mut v = venda_com_total(100, VendaStatus::Aberta);
        for _ in 0..2 {
            v.servicos.push(super::super::Servico {
                id: Uuid::new_v4(),
                descricao: "Importado".into(),
                valor: Money::from_cents(i64::MAX / 2 + 1),
            });
        }

        let at_least = VendaValorTotalSpecification::new(Some(Money::from_units(1)), None);
        assert!(at_least.is_satisfied_by(&v));
        let at_most = VendaValorTotalSpecification::new(None, Some(Money::from_units(1_000)));
        assert!(!at_most.is_satisfied_by(&v));
    }

    #[test]
    fn cliente_id_filter() {
        let v = venda_com_total(100, VendaStatus::Aberta);
        assert!(VendaClienteIdSpecification::new(Some(v.cliente_id())).is_satisfied_by(&v));
        assert!(!VendaClienteIdSpecification::new(Some(Uuid::new_v4())).is_satisfied_by(&v));
    }
}
