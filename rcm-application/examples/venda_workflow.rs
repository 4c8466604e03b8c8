use chrono::NaiveDate;
use rcm_application::RcmApplication;
use rcm_application::cliente::AddClienteCommand;
use rcm_application::config::ApplicationConfig;
use rcm_application::produto::AddProdutoCommand;
use rcm_application::telemetry::init_tracing;
use rcm_domain::models::{Documento, TipoDocumento, VendaFilter};
use rcm_domain::persist::InMemoryDatabase;
use rcm_domain::value_object::Money;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("rcm_application=debug,rcm_domain=info");

    let app = RcmApplication::new(InMemoryDatabase::new(), ApplicationConfig::default())?;

    // 校验失败 -> 通知，不落库
    let rejected = app
        .clientes
        .add(AddClienteCommand {
            id: Uuid::new_v4(),
            nome: "".into(),
            ..Default::default()
        })
        .await?;
    for n in &rejected.errors {
        println!("rejected: {n}");
    }

    let cliente_id = Uuid::new_v4();
    app.clientes
        .add(AddClienteCommand {
            id: cliente_id,
            nome: "Auto Peças Silva".into(),
            documento: Documento::new(TipoDocumento::Cnpj, "11.222.333/0001-81"),
            ..Default::default()
        })
        .await?;

    let produto_id = Uuid::new_v4();
    app.produtos
        .add(AddProdutoCommand {
            id: produto_id,
            nome: "Pneu aro 14".into(),
            valor: Money::from_units(320),
            quantidade: 8,
        })
        .await?;

    let hoje = NaiveDate::from_ymd_opt(2024, 7, 1).ok_or("invalid date")?;
    let venda_id = Uuid::new_v4();
    app.vendas.add(venda_id, cliente_id, hoje).await?;
    app.vendas.attach_produto(venda_id, produto_id, 4).await?;
    app.vendas
        .attach_servico(venda_id, Uuid::new_v4(), "Alinhamento", Money::from_units(90))
        .await?;
    let result = app.vendas.finalizar(venda_id, 3, hoje, 30).await?;
    println!("finalizar: success={}", result.success);

    if let Some(venda) = app.vendas.get_by_id(venda_id).await? {
        println!("venda {} total={} status={}", venda_id, venda.valor_total(), venda.status());
        if let Some(condicao) = venda.condicao_pagamento() {
            for p in &condicao.parcelas {
                println!("  parcela {} {} vence {}", p.numero, p.valor, p.data_vencimento);
            }
        }
    }

    // 已结算的销售不可再添加商品
    let late = app.vendas.attach_produto(venda_id, produto_id, 1).await?;
    println!("attach after close: {:?}", late.errors);

    let filter = VendaFilter {
        min_valor: Some("1.000,00".into()),
        status: Some("Fechada".into()),
        ..Default::default()
    };
    let found = app.vendas.search(&filter).await?;
    println!("vendas fechadas acima de 1.000,00: {}", found.len());

    Ok(())
}
