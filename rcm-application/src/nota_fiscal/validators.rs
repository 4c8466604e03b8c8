use super::commands::{AddNotaFiscalCommand, RemoveNotaFiscalCommand, UpdateNotaFiscalCommand};
use rcm_domain::validation::RuleSet;
use rcm_domain::validation::checks::{max_chars, not_blank};

const ORIGIN: &str = "NotaFiscal";

fn numero_valido(numero: &str) -> bool {
    not_blank(numero) && max_chars(numero, 20)
}

pub(crate) fn add() -> RuleSet<AddNotaFiscalCommand> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id da nota fiscal é obrigatório", |c: &AddNotaFiscalCommand| {
            !c.id.is_nil()
        })
        .rule("VendaId", "A venda é obrigatória", |c: &AddNotaFiscalCommand| {
            !c.venda_id.is_nil()
        })
        .rule(
            "Numero",
            "O número é obrigatório e deve ter no máximo 20 caracteres",
            |c: &AddNotaFiscalCommand| numero_valido(&c.numero),
        )
        .rule(
            "Observacoes",
            "As observações devem ter no máximo 500 caracteres",
            |c: &AddNotaFiscalCommand| max_chars(&c.observacoes, 500),
        )
}

pub(crate) fn update() -> RuleSet<UpdateNotaFiscalCommand> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id da nota fiscal é obrigatório", |c: &UpdateNotaFiscalCommand| {
            !c.id.is_nil()
        })
        .rule(
            "Numero",
            "O número é obrigatório e deve ter no máximo 20 caracteres",
            |c: &UpdateNotaFiscalCommand| numero_valido(&c.numero),
        )
        .rule(
            "Observacoes",
            "As observações devem ter no máximo 500 caracteres",
            |c: &UpdateNotaFiscalCommand| max_chars(&c.observacoes, 500),
        )
}

pub(crate) fn remove() -> RuleSet<RemoveNotaFiscalCommand> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id da nota fiscal é obrigatório", |c: &RemoveNotaFiscalCommand| {
            !c.id.is_nil()
        })
}
