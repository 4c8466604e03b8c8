use super::commands::{ClienteFields, RemoveClienteCommand};
use rcm_domain::validation::RuleSet;
use rcm_domain::validation::checks::{blank_or, digits, is_email, max_chars, not_blank};
use rcm_domain::value_object::ValueObject;

const ORIGIN: &str = "Cliente";

fn id<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new().rule("Id", "O id do cliente é obrigatório", |c: &C| !c.id().is_nil())
}

fn nome<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new()
        .rule("Nome", "O nome é obrigatório", |c: &C| not_blank(c.nome()))
        .rule("Nome", "O nome deve ter no máximo 100 caracteres", |c: &C| {
            max_chars(c.nome(), 100)
        })
}

fn descricao<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new().rule(
        "Descricao",
        "A descrição deve ter no máximo 500 caracteres",
        |c: &C| max_chars(c.descricao(), 500),
    )
}

fn contato<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new()
        .rule("Email", "E-mail inválido", |c: &C| {
            blank_or(&c.contato().email, is_email)
        })
        .rule("Telefone", "Telefone deve ter 10 ou 11 dígitos", |c: &C| {
            blank_or(&c.contato().telefone, |t| matches!(digits(t).len(), 10 | 11))
        })
}

fn endereco<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new()
        .rule("Estado", "Estado deve ser a sigla da UF", |c: &C| {
            blank_or(&c.endereco().estado, |uf| {
                uf.len() == 2 && uf.chars().all(|ch| ch.is_ascii_alphabetic())
            })
        })
        .rule("Cep", "CEP deve ter 8 dígitos", |c: &C| {
            blank_or(&c.endereco().cep, |cep| digits(cep).len() == 8)
        })
}

fn documento<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new()
        .rule("Documento", "O documento é obrigatório", |c: &C| {
            not_blank(&c.documento().numero)
        })
        .rule("Documento", "Documento inválido", |c: &C| {
            blank_or(&c.documento().numero, |_| c.documento().validate().is_ok())
        })
}

/// 新增与修改使用同一组字段规则
pub(crate) fn cliente<C: ClienteFields>() -> RuleSet<C> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .include(id())
        .include(nome())
        .include(descricao())
        .include(contato())
        .include(endereco())
        .include(documento())
}

pub(crate) fn remove() -> RuleSet<RemoveClienteCommand> {
    RuleSet::new()
        .with_origin(ORIGIN)
        .rule("Id", "O id do cliente é obrigatório", |c: &RemoveClienteCommand| {
            !c.id.is_nil()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cliente::AddClienteCommand;
    use rcm_domain::models::{Contato, Documento, TipoDocumento};
    use rcm_domain::validation::Validator;
    use uuid::Uuid;

    fn valid() -> AddClienteCommand {
        AddClienteCommand {
            id: Uuid::new_v4(),
            nome: "Maria Silva".into(),
            documento: Documento::new(TipoDocumento::Cpf, "529.982.247-25"),
            ..Default::default()
        }
    }

    #[test]
    fn valid_command_passes() {
        assert!(cliente::<AddClienteCommand>().validate(&valid()).is_valid());
    }

    #[test]
    fn blank_nome_yields_nome_notification() {
        let cmd = AddClienteCommand {
            nome: String::new(),
            ..valid()
        };
        let result = cliente::<AddClienteCommand>().validate(&cmd);
        let keys: Vec<_> = result.notifications().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["Nome"]);
        assert_eq!(result.notifications()[0].origin(), Some("Cliente"));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let cmd = AddClienteCommand {
            id: Uuid::nil(),
            nome: " ".into(),
            contato: Contato {
                email: "not-an-email".into(),
                telefone: "123".into(),
            },
            documento: Documento::new(TipoDocumento::Cpf, "123.456.789-00"),
            ..Default::default()
        };
        let result = cliente::<AddClienteCommand>().validate(&cmd);
        let keys: Vec<_> = result.notifications().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["Id", "Nome", "Email", "Telefone", "Documento"]);
    }
}
