use super::commands::{ProdutoFields, RemoveProdutoCommand};
use rcm_domain::validation::RuleSet;
use rcm_domain::validation::checks::{max_chars, not_blank};

const ORIGIN: &str = "Produto";

pub(crate) fn produto<C: ProdutoFields>() -> RuleSet<C> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id do produto é obrigatório", |c: &C| !c.id().is_nil())
        .rule("Nome", "O nome é obrigatório", |c: &C| not_blank(c.nome()))
        .rule("Nome", "O nome deve ter no máximo 100 caracteres", |c: &C| {
            max_chars(c.nome(), 100)
        })
        .rule("Valor", "O valor deve ser maior que zero", |c: &C| {
            c.valor().is_positive()
        })
}

pub(crate) fn remove() -> RuleSet<RemoveProdutoCommand> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id do produto é obrigatório", |c: &RemoveProdutoCommand| {
            !c.id.is_nil()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::produto::AddProdutoCommand;
    use rcm_domain::validation::Validator;
    use rcm_domain::value_object::Money;
    use uuid::Uuid;

    #[test]
    fn zero_valor_and_blank_nome_are_reported() {
        let cmd = AddProdutoCommand {
            id: Uuid::new_v4(),
            nome: "".into(),
            valor: Money::zero(),
            quantidade: 3,
        };
        let result = produto::<AddProdutoCommand>().validate(&cmd);
        let keys: Vec<_> = result.notifications().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["Nome", "Valor"]);
    }
}
