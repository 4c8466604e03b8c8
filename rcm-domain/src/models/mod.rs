//! RCM 领域模型
//!
//! 客户（`Cliente`）、商品（`Produto`）、销售（`Venda`）与发票（`NotaFiscal`）聚合，
//! 以及各自用于查询过滤的叶子规约。
//!
pub mod cliente;
pub mod nota_fiscal;
pub mod produto;
pub mod venda;

pub use cliente::{Cliente, ClienteNomeSpecification, Contato, Documento, Endereco, TipoDocumento};
pub use nota_fiscal::{NotaFiscal, NotaFiscalVendaIdSpecification};
pub use produto::{Produto, ProdutoNomeSpecification};
pub use venda::{
    CondicaoPagamento, Parcela, ProdutoVenda, Servico, Venda, VendaClienteIdSpecification,
    VendaDataSpecification, VendaFilter, VendaStatus, VendaStatusSpecification,
    VendaValorTotalSpecification,
};
