//! 销售（Venda）聚合
//!
//! 业务规则：
//! - 已关闭（`Fechada`）的销售不可再添加/移除商品与服务，也不可再次结算或修改；
//! - 没有任何明细的销售不可结算，也不可经由更新直接关闭；
//! - 合计金额与明细数量必须在可表示范围内，超出时以业务规则拒绝。
//! - 分期只能在销售结算后支付，且每期只能支付一次。
//!
mod specifications;

pub use specifications::{
    VendaClienteIdSpecification, VendaDataSpecification, VendaFilter, VendaStatusSpecification,
    VendaValorTotalSpecification,
};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::models::produto::Produto;
use crate::value_object::{Money, Version};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendaStatus {
    #[default]
    Aberta,
    Fechada,
}

impl fmt::Display for VendaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendaStatus::Aberta => f.write_str("Aberta"),
            VendaStatus::Fechada => f.write_str("Fechada"),
        }
    }
}

impl FromStr for VendaStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aberta" => Ok(VendaStatus::Aberta),
            "fechada" => Ok(VendaStatus::Fechada),
            other => Err(DomainError::Parse {
                reason: format!("unknown venda status: {other}"),
            }),
        }
    }
}

/// 销售中的商品明细（下单时的名称与单价快照）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProdutoVenda {
    pub produto_id: Uuid,
    pub nome: String,
    pub quantidade: u32,
    pub valor_unitario: Money,
}

impl ProdutoVenda {
    pub fn valor_total(&self) -> Money {
        self.valor_unitario * self.quantidade
    }

    fn checked_valor_total(&self) -> Option<Money> {
        self.valor_unitario.checked_mul(self.quantidade)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Servico {
    pub id: Uuid,
    pub descricao: String,
    pub valor: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcela {
    pub numero: u32,
    pub valor: Money,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
}

impl Parcela {
    pub fn paga(&self) -> bool {
        self.data_pagamento.is_some()
    }
}

/// 结算条件：分期数、首期日期与相邻两期的间隔天数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondicaoPagamento {
    pub quantidade_parcelas: u32,
    pub data_primeira_parcela: NaiveDate,
    pub intervalo_dias: u32,
    #[serde(default)]
    pub parcelas: Vec<Parcela>,
}

impl CondicaoPagamento {
    pub fn new(quantidade_parcelas: u32, data_primeira_parcela: NaiveDate, intervalo_dias: u32) -> Self {
        Self {
            quantidade_parcelas,
            data_primeira_parcela,
            intervalo_dias,
            parcelas: Vec::new(),
        }
    }

    fn gerar_parcelas(&mut self, total: Money) -> DomainResult<()> {
        let mut parcelas = Vec::with_capacity(self.quantidade_parcelas as usize);
        for (i, valor) in total.split(self.quantidade_parcelas).into_iter().enumerate() {
            let offset = u64::from(self.intervalo_dias) * i as u64;
            let data_vencimento = self
                .data_primeira_parcela
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| DomainError::rule("Parcelas", "Data de vencimento inválida"))?;
            parcelas.push(Parcela {
                numero: i as u32 + 1,
                valor,
                data_vencimento,
                data_pagamento: None,
            });
        }
        self.parcelas = parcelas;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venda {
    id: Uuid,
    #[serde(default)]
    version: Version,
    cliente_id: Uuid,
    data: NaiveDate,
    status: VendaStatus,
    produtos: Vec<ProdutoVenda>,
    servicos: Vec<Servico>,
    condicao_pagamento: Option<CondicaoPagamento>,
}

impl Venda {
    /// 新建一笔打开状态的销售
    pub fn new(id: Uuid, cliente_id: Uuid, data: NaiveDate) -> Self {
        Self {
            id,
            version: Version::new(),
            cliente_id,
            data,
            status: VendaStatus::Aberta,
            produtos: Vec::new(),
            servicos: Vec::new(),
            condicao_pagamento: None,
        }
    }

    pub fn cliente_id(&self) -> Uuid {
        self.cliente_id
    }

    pub fn data(&self) -> NaiveDate {
        self.data
    }

    pub fn status(&self) -> VendaStatus {
        self.status
    }

    pub fn produtos(&self) -> &[ProdutoVenda] {
        &self.produtos
    }

    pub fn servicos(&self) -> &[Servico] {
        &self.servicos
    }

    pub fn condicao_pagamento(&self) -> Option<&CondicaoPagamento> {
        self.condicao_pagamento.as_ref()
    }

    pub fn is_fechada(&self) -> bool {
        self.status == VendaStatus::Fechada
    }

    /// 商品明细与服务合计
    ///
    /// 聚合方法保证合计不溢出；对外部构造的异常数据按饱和值计算，不会 panic。
    pub fn valor_total(&self) -> Money {
        let produtos: Money = self.produtos.iter().map(ProdutoVenda::valor_total).sum();
        let servicos: Money = self.servicos.iter().map(|s| s.valor).sum();
        produtos + servicos
    }

    fn checked_valor_total(&self) -> DomainResult<Money> {
        let produtos = self.produtos.iter().map(ProdutoVenda::checked_valor_total);
        let servicos = self.servicos.iter().map(|s| Some(s.valor));
        produtos
            .chain(servicos)
            .try_fold(Money::zero(), |acc, next| acc.checked_add(next?))
            .ok_or_else(valor_excedido)
    }

    fn ensure_itens(&self) -> DomainResult<()> {
        if self.produtos.is_empty() && self.servicos.is_empty() {
            return Err(DomainError::rule(
                "Venda",
                "Não é possível finalizar uma venda sem produtos ou serviços",
            ));
        }
        Ok(())
    }

    fn ensure_aberta(&self) -> DomainResult<()> {
        if self.is_fechada() {
            return Err(DomainError::rule(
                "Venda",
                "Não é possível alterar uma venda fechada",
            ));
        }
        Ok(())
    }

    pub fn atualizar(
        &mut self,
        cliente_id: Uuid,
        data: NaiveDate,
        status: VendaStatus,
    ) -> DomainResult<()> {
        self.ensure_aberta()?;
        // 直接关闭视为一次性付清：到期日为销售日期
        let condicao = match status {
            VendaStatus::Fechada => {
                self.ensure_itens()?;
                let mut condicao = CondicaoPagamento::new(1, data, 0);
                condicao.gerar_parcelas(self.checked_valor_total()?)?;
                Some(condicao)
            }
            VendaStatus::Aberta => None,
        };
        self.cliente_id = cliente_id;
        self.data = data;
        self.status = status;
        self.condicao_pagamento = condicao;
        Ok(())
    }

    /// 添加商品；同一商品再次添加时累加数量（沿用首次的单价快照）
    pub fn adicionar_produto(&mut self, produto: &Produto, quantidade: u32) -> DomainResult<()> {
        self.ensure_aberta()?;
        let linha = self
            .produtos
            .iter()
            .position(|p| p.produto_id == *produto.id());
        let valor_unitario = linha.map_or(produto.valor(), |i| self.produtos[i].valor_unitario);
        valor_unitario
            .checked_mul(quantidade)
            .and_then(|acrescimo| self.checked_valor_total().ok()?.checked_add(acrescimo))
            .ok_or_else(valor_excedido)?;

        match linha {
            Some(i) => {
                let linha = &mut self.produtos[i];
                linha.quantidade = linha.quantidade.checked_add(quantidade).ok_or_else(|| {
                    DomainError::rule("Quantidade", "Quantidade excede o limite suportado")
                })?;
            }
            None => self.produtos.push(ProdutoVenda {
                produto_id: *produto.id(),
                nome: produto.nome().to_owned(),
                quantidade,
                valor_unitario: produto.valor(),
            }),
        }
        Ok(())
    }

    /// 移除商品明细，返回被移除的数量
    pub fn remover_produto(&mut self, produto_id: Uuid) -> DomainResult<u32> {
        self.ensure_aberta()?;
        let pos = self
            .produtos
            .iter()
            .position(|p| p.produto_id == produto_id)
            .ok_or_else(|| DomainError::rule("ProdutoId", "Produto não pertence à venda"))?;
        Ok(self.produtos.remove(pos).quantidade)
    }

    pub fn adicionar_servico(&mut self, servico: Servico) -> DomainResult<()> {
        self.ensure_aberta()?;
        if self.servicos.iter().any(|s| s.id == servico.id) {
            return Err(DomainError::rule("ServicoId", "Serviço já adicionado à venda"));
        }
        self.checked_valor_total()?
            .checked_add(servico.valor)
            .ok_or_else(valor_excedido)?;
        self.servicos.push(servico);
        Ok(())
    }

    pub fn remover_servico(&mut self, servico_id: Uuid) -> DomainResult<()> {
        self.ensure_aberta()?;
        let pos = self
            .servicos
            .iter()
            .position(|s| s.id == servico_id)
            .ok_or_else(|| DomainError::rule("ServicoId", "Serviço não pertence à venda"))?;
        self.servicos.remove(pos);
        Ok(())
    }

    /// 结算：按条件生成分期并关闭销售
    pub fn finalizar(&mut self, mut condicao: CondicaoPagamento) -> DomainResult<()> {
        self.ensure_aberta()?;
        self.ensure_itens()?;
        condicao.gerar_parcelas(self.checked_valor_total()?)?;
        self.condicao_pagamento = Some(condicao);
        self.status = VendaStatus::Fechada;
        Ok(())
    }

    pub fn pagar_parcela(&mut self, numero: u32, data_pagamento: NaiveDate) -> DomainResult<()> {
        if !self.is_fechada() {
            return Err(DomainError::rule("Venda", "A venda ainda não foi finalizada"));
        }
        let parcela = self
            .condicao_pagamento
            .as_mut()
            .and_then(|c| c.parcelas.iter_mut().find(|p| p.numero == numero))
            .ok_or_else(|| DomainError::rule("Parcela", "Parcela não encontrada"))?;
        if parcela.paga() {
            return Err(DomainError::rule("Parcela", "Parcela já está paga"));
        }
        parcela.data_pagamento = Some(data_pagamento);
        Ok(())
    }
}

fn valor_excedido() -> DomainError {
    DomainError::rule("Valor", "Valor total da venda excede o limite suportado")
}

crate::impl_aggregate!(Venda, Uuid, "Venda");
