use anyhow::Result as AnyResult;
use chrono::NaiveDate;
use rcm_domain::entity::Entity;
use rcm_domain::error::DomainError;
use rcm_domain::models::{
    Cliente, ClienteNomeSpecification, CondicaoPagamento, Produto, Venda, VendaFilter,
    VendaStatus,
};
use rcm_domain::persist::{InMemoryDatabase, Repository, UnitOfWork, UnitOfWorkFactory};
use rcm_domain::specification::{CompositeSpecification, Specification};
use rcm_domain::value_object::{Money, Version};
use uuid::Uuid;

fn dia(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

fn produto(nome: &str, reais: i64, quantidade: u32) -> Produto {
    Produto::builder()
        .id(Uuid::new_v4())
        .nome(nome)
        .valor(Money::from_units(reais))
        .quantidade(quantidade)
        .build()
}

#[tokio::test]
async fn sale_with_installments_survives_a_commit() -> AnyResult<()> {
    let db = InMemoryDatabase::new();
    let pneu = produto("Pneu", 250, 4);

    let mut venda = Venda::new(Uuid::new_v4(), Uuid::new_v4(), dia(1));
    venda.adicionar_produto(&pneu, 4)?;
    venda.finalizar(CondicaoPagamento::new(4, dia(30), 30))?;

    let uow = db.begin();
    uow.repository::<Venda>().add(venda.clone()).await?;
    uow.commit().await?;

    let loaded = db
        .begin()
        .repository::<Venda>()
        .get(venda.id())
        .await?
        .unwrap();
    assert_eq!(loaded.version(), Version::from_value(1));
    assert_eq!(loaded.status(), VendaStatus::Fechada);
    assert_eq!(loaded.valor_total(), Money::from_units(1_000));
    let parcelas = &loaded.condicao_pagamento().unwrap().parcelas;
    assert_eq!(parcelas.len(), 4);
    assert!(parcelas.iter().all(|p| p.valor == Money::from_units(250)));
    assert_eq!(parcelas[3].data_vencimento, dia(30) + chrono::Days::new(90));
    Ok(())
}

#[tokio::test]
async fn two_aggregates_commit_together_or_not_at_all() -> AnyResult<()> {
    let db = InMemoryDatabase::new();
    let mut oleo = produto("Óleo", 40, 10);
    db.seed(&oleo)?;
    oleo.set_version(Version::from_value(1));

    let uow = db.begin();
    let mut venda = Venda::new(Uuid::new_v4(), Uuid::new_v4(), dia(2));
    venda.adicionar_produto(&oleo, 2)?;
    oleo.baixar_estoque(2)?;
    uow.repository::<Venda>().add(venda).await?;
    uow.repository::<Produto>().update(oleo.clone()).await?;

    // 另一作用域抢先修改同一商品
    let other = db.begin();
    let mut concorrente = other.repository::<Produto>().get(oleo.id()).await?.unwrap();
    concorrente.repor_estoque(5);
    other.repository::<Produto>().update(concorrente).await?;
    other.commit().await?;

    let err = uow.commit().await.unwrap_err();
    assert!(matches!(err, DomainError::VersionConflict { .. }));
    assert_eq!(db.row_count::<Venda>(), 0);

    let atual = db.begin().repository::<Produto>().get(oleo.id()).await?.unwrap();
    assert_eq!(atual.quantidade(), 15);
    Ok(())
}

#[tokio::test]
async fn repository_find_applies_composed_specifications() -> AnyResult<()> {
    let db = InMemoryDatabase::new();
    for nome in ["Maria Silva", "João Silva", "Ana Souza"] {
        db.seed(&Cliente::builder().id(Uuid::new_v4()).nome(nome).build())?;
    }
    let repo = db.begin().repository::<Cliente>();

    let silva = ClienteNomeSpecification::from_input(Some("silva"));
    assert_eq!(repo.find(&silva.clone().into_composite()).await?.len(), 2);

    let silva_sem_joao = silva.and(ClienteNomeSpecification::from_input(Some("joão")).not());
    let found = repo.find(&silva_sem_joao).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nome(), "Maria Silva");

    let todos = repo.find(&CompositeSpecification::always()).await?;
    assert_eq!(todos.len(), 3);
    Ok(())
}

#[tokio::test]
async fn filter_over_committed_and_staged_sales() -> AnyResult<()> {
    let db = InMemoryDatabase::new();
    let item = produto("Item", 100, 100);

    let mut antiga = Venda::new(Uuid::new_v4(), Uuid::new_v4(), dia(1));
    antiga.adicionar_produto(&item, 2)?;
    db.seed(&antiga)?;

    let uow = db.begin();
    let mut nova = Venda::new(Uuid::new_v4(), Uuid::new_v4(), dia(20));
    nova.adicionar_produto(&item, 3)?;
    uow.repository::<Venda>().add(nova.clone()).await?;

    let filter = VendaFilter {
        data_inicial: Some("2024-04-15".into()),
        min_valor: Some("300".into()),
        ..Default::default()
    };
    let spec = filter.to_specification();

    let visiveis = uow.repository::<Venda>().find(&spec).await?;
    assert_eq!(visiveis.len(), 1);
    assert_eq!(visiveis[0].id(), nova.id());

    let fora = db.begin().repository::<Venda>().find(&spec).await?;
    assert!(fora.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_units_of_work_on_distinct_rows() -> AnyResult<()> {
    let db = InMemoryDatabase::new();
    let mut set = tokio::task::JoinSet::new();

    for i in 0..16u32 {
        let db = db.clone();
        set.spawn(async move {
            let uow = db.begin();
            uow.repository::<Produto>()
                .add(produto(&format!("P{i}"), 10, i))
                .await?;
            uow.commit().await
        });
    }
    while let Some(res) = set.join_next().await {
        res??;
    }

    assert_eq!(db.row_count::<Produto>(), 16);
    assert_eq!(db.commit_count(), 16);
    Ok(())
}
