use crate::command::Command;
use rcm_domain::models::Produto;
use rcm_domain::value_object::Money;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct AddProdutoCommand {
    pub id: Uuid,
    pub nome: String,
    pub valor: Money,
    pub quantidade: u32,
}

impl Command for AddProdutoCommand {
    const NAME: &'static str = "AddProdutoCommand";
}

impl AddProdutoCommand {
    pub(crate) fn into_produto(self) -> Produto {
        Produto::builder()
            .id(self.id)
            .nome(self.nome)
            .valor(self.valor)
            .quantidade(self.quantidade)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProdutoCommand {
    pub id: Uuid,
    pub nome: String,
    pub valor: Money,
    pub quantidade: u32,
}

impl Command for UpdateProdutoCommand {
    const NAME: &'static str = "UpdateProdutoCommand";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveProdutoCommand {
    pub id: Uuid,
}

impl Command for RemoveProdutoCommand {
    const NAME: &'static str = "RemoveProdutoCommand";
}

pub(crate) trait ProdutoFields: Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn nome(&self) -> &str;
    fn valor(&self) -> Money;
}

impl ProdutoFields for AddProdutoCommand {
    fn id(&self) -> Uuid {
        self.id
    }

    fn nome(&self) -> &str {
        &self.nome
    }

    fn valor(&self) -> Money {
        self.valor
    }
}

impl ProdutoFields for UpdateProdutoCommand {
    fn id(&self) -> Uuid {
        self.id
    }

    fn nome(&self) -> &str {
        &self.nome
    }

    fn valor(&self) -> Money {
        self.valor
    }
}
