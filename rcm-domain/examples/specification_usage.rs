//! 规约组合使用示例
//!
//! 展示叶子规约、`and`/`or`/`not` 组合以及从原始输入构建过滤条件。
//!
//! 运行示例：
//! ```bash
//! cargo run -p rcm-domain --example specification_usage
//! ```

use chrono::NaiveDate;
use rcm_domain::models::{
    CondicaoPagamento, Produto, Venda, VendaFilter, VendaStatus, VendaStatusSpecification,
    VendaValorTotalSpecification,
};
use rcm_domain::specification::{CompositeSpecification, Specification};
use rcm_domain::value_object::Money;
use uuid::Uuid;

fn venda(reais: i64, fechada: bool) -> Result<Venda, Box<dyn std::error::Error>> {
    let data = NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("invalid date")?;
    let produto = Produto::builder()
        .id(Uuid::new_v4())
        .nome("Item")
        .valor(Money::from_units(reais))
        .quantidade(1)
        .build();
    let mut v = Venda::new(Uuid::new_v4(), Uuid::new_v4(), data);
    v.adicionar_produto(&produto, 1)?;
    if fechada {
        v.finalizar(CondicaoPagamento::new(1, data, 0))?;
    }
    Ok(v)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 规约组合示例 ===\n");

    let vendas = [venda(50, false)?, venda(150, false)?, venda(600, true)?];

    // 1. 叶子规约 + and
    let spec = VendaValorTotalSpecification::new(
        Some(Money::from_units(100)),
        Some(Money::from_units(500)),
    )
    .and(VendaStatusSpecification::new(Some(VendaStatus::Aberta)));
    let predicate = spec.to_predicate();
    for v in vendas.iter().filter(|v| predicate(*v)) {
        println!("1. 100..=500 且 Aberta: total={}", v.valor_total());
    }

    // 2. not 与 or
    let fechadas = VendaStatusSpecification::new(Some(VendaStatus::Aberta)).not();
    let baratas_ou_fechadas =
        VendaValorTotalSpecification::new(None, Some(Money::from_units(60))).or(fechadas);
    let n = vendas.iter().filter(|v| baratas_ou_fechadas.evaluate(v)).count();
    println!("2. <= 60 或 Fechada: {n} 笔");

    // 3. 零个规约组合 = 恒真
    let todas = CompositeSpecification::<Venda>::all_of(Vec::new());
    println!("3. all_of([]) 命中: {} 笔", vendas.iter().filter(|v| todas.evaluate(v)).count());

    // 4. 原始输入：空白与无法解析的参数视为不过滤
    let filter = VendaFilter {
        min_valor: Some("1.234,56".into()),
        status: Some("  ".into()),
        data_final: Some("não é data".into()),
        ..Default::default()
    };
    let n = vendas
        .iter()
        .filter(|v| filter.to_specification().evaluate(v))
        .count();
    println!("4. 总额 >= 1.234,56: {n} 笔");

    Ok(())
}
