use anyhow::Result as AnyResult;
use chrono::NaiveDate;
use rcm_application::RcmApplication;
use rcm_application::config::ApplicationConfig;
use rcm_domain::entity::Entity;
use rcm_domain::models::{
    CondicaoPagamento, Produto, Venda, VendaClienteIdSpecification, VendaFilter, VendaStatus,
    VendaStatusSpecification, VendaValorTotalSpecification,
};
use rcm_domain::persist::InMemoryDatabase;
use rcm_domain::specification::{CompositeSpecification, Specification};
use rcm_domain::value_object::Money;
use uuid::Uuid;

fn dia(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn venda(cliente_id: Uuid, data: NaiveDate, reais: i64, fechada: bool) -> Venda {
    let produto = Produto::builder()
        .id(Uuid::new_v4())
        .nome("Item")
        .valor(Money::from_units(reais))
        .quantidade(1)
        .build();
    let mut venda = Venda::new(Uuid::new_v4(), cliente_id, data);
    venda.adicionar_produto(&produto, 1).unwrap();
    if fechada {
        venda.finalizar(CondicaoPagamento::new(1, data, 0)).unwrap();
    }
    venda
}

struct Fixture {
    app: RcmApplication<InMemoryDatabase>,
    cliente_a: Uuid,
    cliente_b: Uuid,
    v50: Uuid,
    v150: Uuid,
    v600: Uuid,
}

fn fixture() -> Fixture {
    let db = InMemoryDatabase::new();
    let cliente_a = Uuid::new_v4();
    let cliente_b = Uuid::new_v4();
    let vendas = [
        venda(cliente_a, dia(1), 50, false),
        venda(cliente_a, dia(10), 150, false),
        venda(cliente_b, dia(20), 600, true),
    ];
    for v in &vendas {
        db.seed(v).unwrap();
    }
    Fixture {
        app: RcmApplication::new(db, ApplicationConfig::default()).unwrap(),
        cliente_a,
        cliente_b,
        v50: *vendas[0].id(),
        v150: *vendas[1].id(),
        v600: *vendas[2].id(),
    }
}

fn ids(vendas: &[Venda]) -> Vec<Uuid> {
    let mut ids: Vec<_> = vendas.iter().map(|v| *v.id()).collect();
    ids.sort();
    ids
}

fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

#[tokio::test]
async fn value_range_and_status_select_only_the_open_mid_sale() -> AnyResult<()> {
    let f = fixture();

    let spec = VendaValorTotalSpecification::new(
        Some(Money::from_units(100)),
        Some(Money::from_units(500)),
    )
    .and(VendaStatusSpecification::new(Some(VendaStatus::Aberta)));

    let found = f.app.vendas.get(&spec).await?;
    assert_eq!(ids(&found), vec![f.v150]);
    Ok(())
}

#[tokio::test]
async fn raw_filter_is_parsed_before_composition() -> AnyResult<()> {
    let f = fixture();

    let filter = VendaFilter {
        min_valor: Some("100,00".into()),
        max_valor: Some("500".into()),
        status: Some("aberta".into()),
        ..Default::default()
    };
    assert_eq!(ids(&f.app.vendas.search(&filter).await?), vec![f.v150]);

    let by_date = VendaFilter {
        data_inicial: Some("05/06/2024".into()),
        data_final: Some("2024-06-30".into()),
        ..Default::default()
    };
    assert_eq!(
        ids(&f.app.vendas.search(&by_date).await?),
        sorted(vec![f.v150, f.v600])
    );

    let by_cliente = VendaFilter {
        cliente_id: Some(f.cliente_b.to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&f.app.vendas.search(&by_cliente).await?), vec![f.v600]);
    Ok(())
}

#[tokio::test]
async fn empty_or_malformed_filter_returns_everything() -> AnyResult<()> {
    let f = fixture();
    let all = sorted(vec![f.v50, f.v150, f.v600]);

    assert_eq!(ids(&f.app.vendas.search(&VendaFilter::default()).await?), all);

    let garbage = VendaFilter {
        cliente_id: Some("não é uuid".into()),
        min_valor: Some("".into()),
        max_valor: Some("muito".into()),
        status: Some("   ".into()),
        data_inicial: Some("ontem".into()),
        data_final: None,
    };
    assert_eq!(ids(&f.app.vendas.search(&garbage).await?), all);
    Ok(())
}

#[tokio::test]
async fn combinators_compose_over_the_repository() -> AnyResult<()> {
    let f = fixture();
    let do_a = VendaClienteIdSpecification::new(Some(f.cliente_a));

    let nao_do_a = do_a.not();
    assert_eq!(ids(&f.app.vendas.get(&nao_do_a).await?), vec![f.v600]);

    let caras_ou_do_a = VendaValorTotalSpecification::new(Some(Money::from_units(500)), None)
        .or(VendaClienteIdSpecification::new(Some(f.cliente_a)));
    assert_eq!(
        ids(&f.app.vendas.get(&caras_ou_do_a).await?),
        sorted(vec![f.v50, f.v150, f.v600])
    );

    let nenhuma = f.app.vendas.get(&CompositeSpecification::never()).await?;
    assert!(nenhuma.is_empty());
    Ok(())
}
