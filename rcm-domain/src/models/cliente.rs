//! 客户（Cliente）聚合
//!
use crate::error::DomainError;
use crate::input::parse_text;
use crate::specification::Specification;
use crate::validation::checks::digits;
use crate::value_object::{ValueObject, Version};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contato {
    pub email: String,
    pub telefone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endereco {
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    /// UF com duas letras
    pub estado: String,
    pub cep: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoDocumento {
    #[default]
    Cpf,
    Cnpj,
}

impl fmt::Display for TipoDocumento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoDocumento::Cpf => f.write_str("CPF"),
            TipoDocumento::Cnpj => f.write_str("CNPJ"),
        }
    }
}

/// CPF/CNPJ；`numero` pode conter máscara, apenas os dígitos são considerados
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documento {
    pub tipo: TipoDocumento,
    pub numero: String,
}

impl Documento {
    pub fn new(tipo: TipoDocumento, numero: impl Into<String>) -> Self {
        Self {
            tipo,
            numero: numero.into(),
        }
    }

    pub fn digitos(&self) -> String {
        digits(&self.numero)
    }
}

impl ValueObject for Documento {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let digits: Vec<u32> = self
            .digitos()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        let ok = match self.tipo {
            TipoDocumento::Cpf => cpf_valido(&digits),
            TipoDocumento::Cnpj => cnpj_valido(&digits),
        };

        if ok {
            Ok(())
        } else {
            Err(DomainError::invalid_value(format!("{} inválido", self.tipo)))
        }
    }
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn cpf_valido(d: &[u32]) -> bool {
    if d.len() != 11 || all_same(d) {
        return false;
    }
    let dv = |len: usize| {
        let sum: u32 = d[..len]
            .iter()
            .enumerate()
            .map(|(i, v)| v * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };
    dv(9) == d[9] && dv(10) == d[10]
}

fn cnpj_valido(d: &[u32]) -> bool {
    const PESOS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    if d.len() != 14 || all_same(d) {
        return false;
    }
    let dv = |len: usize| {
        let pesos = &PESOS[PESOS.len() - len..];
        let sum: u32 = d[..len].iter().zip(pesos).map(|(v, p)| v * p).sum();
        match sum % 11 {
            r if r < 2 => 0,
            r => 11 - r,
        }
    };
    dv(12) == d[12] && dv(13) == d[13]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct Cliente {
    id: Uuid,
    #[builder(default)]
    #[serde(default)]
    version: Version,
    #[builder(into)]
    nome: String,
    #[builder(into, default)]
    descricao: String,
    #[builder(default)]
    contato: Contato,
    #[builder(default)]
    endereco: Endereco,
    #[builder(default)]
    documento: Documento,
}

impl Cliente {
    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn descricao(&self) -> &str {
        &self.descricao
    }

    pub fn contato(&self) -> &Contato {
        &self.contato
    }

    pub fn endereco(&self) -> &Endereco {
        &self.endereco
    }

    pub fn documento(&self) -> &Documento {
        &self.documento
    }

    /// 以新数据整体替换可编辑字段（标识与版本保持不变）
    pub fn atualizar(
        &mut self,
        nome: String,
        descricao: String,
        contato: Contato,
        endereco: Endereco,
        documento: Documento,
    ) {
        self.nome = nome;
        self.descricao = descricao;
        self.contato = contato;
        self.endereco = endereco;
        self.documento = documento;
    }
}

crate::impl_aggregate!(Cliente, Uuid, "Cliente");

/// 按名称过滤（不区分大小写的子串匹配）；`None` 不过滤
#[derive(Debug, Clone, Default)]
pub struct ClienteNomeSpecification {
    nome: Option<String>,
}

impl ClienteNomeSpecification {
    pub fn new(nome: Option<String>) -> Self {
        Self {
            nome: nome.map(|n| n.to_lowercase()),
        }
    }

    /// 空白输入显式视为“不过滤”
    pub fn from_input(raw: Option<&str>) -> Self {
        Self::new(parse_text(raw))
    }
}

impl Specification<Cliente> for ClienteNomeSpecification {
    fn is_satisfied_by(&self, candidate: &Cliente) -> bool {
        match &self.nome {
            None => true,
            Some(nome) => candidate.nome.to_lowercase().contains(nome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    fn cliente(nome: &str) -> Cliente {
        Cliente::builder().id(Uuid::new_v4()).nome(nome).build()
    }

    #[test]
    fn documento_cpf_validation() {
        assert!(Documento::new(TipoDocumento::Cpf, "529.982.247-25").validate().is_ok());
        assert!(Documento::new(TipoDocumento::Cpf, "529.982.247-26").validate().is_err());
        assert!(Documento::new(TipoDocumento::Cpf, "111.111.111-11").validate().is_err());
        assert!(Documento::new(TipoDocumento::Cpf, "123").validate().is_err());
    }

    #[test]
    fn documento_cnpj_validation() {
        assert!(Documento::new(TipoDocumento::Cnpj, "11.222.333/0001-81").validate().is_ok());
        assert!(Documento::new(TipoDocumento::Cnpj, "11.222.333/0001-80").validate().is_err());
        assert!(Documento::new(TipoDocumento::Cnpj, "529.982.247-25").validate().is_err());
    }

    #[test]
    fn builder_defaults_optional_parts() {
        let c = cliente("Maria");
        assert_eq!(c.nome(), "Maria");
        assert!(c.version().is_new());
        assert_eq!(c.contato(), &Contato::default());
    }

    #[test]
    fn nome_specification_is_case_insensitive_and_blank_means_no_filter() {
        let maria = cliente("Maria Silva");
        let joao = cliente("João");

        let spec = ClienteNomeSpecification::from_input(Some("silva"));
        assert!(spec.is_satisfied_by(&maria));
        assert!(!spec.is_satisfied_by(&joao));

        let none = ClienteNomeSpecification::from_input(Some("  "));
        assert!(none.is_satisfied_by(&maria) && none.is_satisfied_by(&joao));
    }
}
