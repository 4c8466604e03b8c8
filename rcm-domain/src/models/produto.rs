//! 商品（Produto）聚合
//!
use crate::error::{DomainError, DomainResult};
use crate::input::parse_text;
use crate::specification::Specification;
use crate::value_object::{Money, Version};
use bon::Builder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct Produto {
    id: Uuid,
    #[builder(default)]
    #[serde(default)]
    version: Version,
    #[builder(into)]
    nome: String,
    valor: Money,
    /// 库存数量
    #[builder(default)]
    quantidade: u32,
}

impl Produto {
    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn valor(&self) -> Money {
        self.valor
    }

    pub fn quantidade(&self) -> u32 {
        self.quantidade
    }

    pub fn atualizar(&mut self, nome: String, valor: Money, quantidade: u32) {
        self.nome = nome;
        self.valor = valor;
        self.quantidade = quantidade;
    }

    /// 出库；库存不足时拒绝
    pub fn baixar_estoque(&mut self, quantidade: u32) -> DomainResult<()> {
        if quantidade > self.quantidade {
            return Err(DomainError::rule(
                "Quantidade",
                format!(
                    "Estoque insuficiente para o produto {}: disponível {}, solicitado {}",
                    self.nome, self.quantidade, quantidade
                ),
            ));
        }
        self.quantidade -= quantidade;
        Ok(())
    }

    pub fn repor_estoque(&mut self, quantidade: u32) {
        self.quantidade = self.quantidade.saturating_add(quantidade);
    }
}

crate::impl_aggregate!(Produto, Uuid, "Produto");

/// 按名称过滤（不区分大小写的子串匹配）；`None` 不过滤
#[derive(Debug, Clone, Default)]
pub struct ProdutoNomeSpecification {
    nome: Option<String>,
}

impl ProdutoNomeSpecification {
    pub fn new(nome: Option<String>) -> Self {
        Self {
            nome: nome.map(|n| n.to_lowercase()),
        }
    }

    pub fn from_input(raw: Option<&str>) -> Self {
        Self::new(parse_text(raw))
    }
}

impl Specification<Produto> for ProdutoNomeSpecification {
    fn is_satisfied_by(&self, candidate: &Produto) -> bool {
        self.nome
            .as_ref()
            .is_none_or(|nome| candidate.nome.to_lowercase().contains(nome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produto(quantidade: u32) -> Produto {
        Produto::builder()
            .id(Uuid::new_v4())
            .nome("Parafuso")
            .valor(Money::from_cents(150))
            .quantidade(quantidade)
            .build()
    }

    #[test]
    fn estoque_nao_fica_negativo() {
        let mut p = produto(5);
        p.baixar_estoque(3).unwrap();
        assert_eq!(p.quantidade(), 2);

        let err = p.baixar_estoque(3).unwrap_err();
        let n = err.to_notification().unwrap();
        assert_eq!(n.key(), "Quantidade");
        assert_eq!(p.quantidade(), 2);

        p.repor_estoque(3);
        assert_eq!(p.quantidade(), 5);
    }

    #[test]
    fn nome_specification() {
        let p = produto(1);
        assert!(ProdutoNomeSpecification::from_input(Some("PARA")).is_satisfied_by(&p));
        assert!(!ProdutoNomeSpecification::from_input(Some("prego")).is_satisfied_by(&p));
        assert!(ProdutoNomeSpecification::from_input(None).is_satisfied_by(&p));
    }
}
