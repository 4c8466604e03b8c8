use super::commands::*;
use rcm_domain::validation::RuleSet;
use rcm_domain::validation::checks::{max_chars, not_blank};

const ORIGIN: &str = "Venda";

/// 分期数上限
pub(crate) const MAX_PARCELAS: u32 = 48;

fn rules<C>() -> RuleSet<C> {
    RuleSet::new().with_origin(ORIGIN)
}

pub(crate) fn add() -> RuleSet<AddVendaCommand> {
    rules()
        .rule("Id", "O id da venda é obrigatório", |c: &AddVendaCommand| !c.id.is_nil())
        .rule("ClienteId", "O cliente é obrigatório", |c: &AddVendaCommand| {
            !c.cliente_id.is_nil()
        })
}

pub(crate) fn update() -> RuleSet<UpdateVendaCommand> {
    rules()
        .rule("Id", "O id da venda é obrigatório", |c: &UpdateVendaCommand| !c.id.is_nil())
        .rule("ClienteId", "O cliente é obrigatório", |c: &UpdateVendaCommand| {
            !c.cliente_id.is_nil()
        })
}

pub(crate) fn remove() -> RuleSet<RemoveVendaCommand> {
    rules().rule("Id", "O id da venda é obrigatório", |c: &RemoveVendaCommand| {
        !c.id.is_nil()
    })
}

pub(crate) fn attach_produto() -> RuleSet<AttachProdutoCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &AttachProdutoCommand| {
            !c.venda_id.is_nil()
        })
        .rule("ProdutoId", "O produto é obrigatório", |c: &AttachProdutoCommand| {
            !c.produto_id.is_nil()
        })
        .rule(
            "Quantidade",
            "A quantidade deve ser maior que zero",
            |c: &AttachProdutoCommand| c.quantidade > 0,
        )
}

pub(crate) fn remove_produto() -> RuleSet<RemoveProdutoVendaCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &RemoveProdutoVendaCommand| {
            !c.venda_id.is_nil()
        })
        .rule("ProdutoId", "O produto é obrigatório", |c: &RemoveProdutoVendaCommand| {
            !c.produto_id.is_nil()
        })
}

pub(crate) fn attach_servico() -> RuleSet<AttachServicoCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &AttachServicoCommand| {
            !c.venda_id.is_nil()
        })
        .rule("ServicoId", "O serviço é obrigatório", |c: &AttachServicoCommand| {
            !c.servico_id.is_nil()
        })
        .rule("Descricao", "A descrição é obrigatória", |c: &AttachServicoCommand| {
            not_blank(&c.descricao)
        })
        .rule(
            "Descricao",
            "A descrição deve ter no máximo 200 caracteres",
            |c: &AttachServicoCommand| max_chars(&c.descricao, 200),
        )
        .rule("Valor", "O valor deve ser maior que zero", |c: &AttachServicoCommand| {
            c.valor.is_positive()
        })
}

pub(crate) fn remove_servico() -> RuleSet<RemoveServicoCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &RemoveServicoCommand| {
            !c.venda_id.is_nil()
        })
        .rule("ServicoId", "O serviço é obrigatório", |c: &RemoveServicoCommand| {
            !c.servico_id.is_nil()
        })
}

pub(crate) fn finalizar() -> RuleSet<FinalizarVendaCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &FinalizarVendaCommand| {
            !c.venda_id.is_nil()
        })
        .rule(
            "Parcelas",
            "A quantidade de parcelas deve estar entre 1 e 48",
            |c: &FinalizarVendaCommand| (1..=MAX_PARCELAS).contains(&c.quantidade_parcelas),
        )
        .rule(
            "IntervaloDias",
            "O intervalo entre parcelas deve ser maior que zero",
            |c: &FinalizarVendaCommand| c.quantidade_parcelas <= 1 || c.intervalo_dias > 0,
        )
}

pub(crate) fn pagar_parcela() -> RuleSet<PagarParcelaCommand> {
    rules()
        .rule("VendaId", "A venda é obrigatória", |c: &PagarParcelaCommand| {
            !c.venda_id.is_nil()
        })
        .rule("Parcela", "Número de parcela inválido", |c: &PagarParcelaCommand| {
            c.numero >= 1
        })
}
