use crate::command::Command;
use rcm_domain::models::{Cliente, Contato, Documento, Endereco};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct AddClienteCommand {
    pub id: Uuid,
    pub nome: String,
    pub descricao: String,
    pub contato: Contato,
    pub endereco: Endereco,
    pub documento: Documento,
}

impl Command for AddClienteCommand {
    const NAME: &'static str = "AddClienteCommand";
}

impl AddClienteCommand {
    pub(crate) fn into_cliente(self) -> Cliente {
        Cliente::builder()
            .id(self.id)
            .nome(self.nome)
            .descricao(self.descricao)
            .contato(self.contato)
            .endereco(self.endereco)
            .documento(self.documento)
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClienteCommand {
    pub id: Uuid,
    pub nome: String,
    pub descricao: String,
    pub contato: Contato,
    pub endereco: Endereco,
    pub documento: Documento,
}

impl Command for UpdateClienteCommand {
    const NAME: &'static str = "UpdateClienteCommand";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveClienteCommand {
    pub id: Uuid,
}

impl Command for RemoveClienteCommand {
    const NAME: &'static str = "RemoveClienteCommand";
}

/// 新增与修改共享的字段视图，供同一组校验规则复用
pub(crate) trait ClienteFields: Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn nome(&self) -> &str;
    fn descricao(&self) -> &str;
    fn contato(&self) -> &Contato;
    fn endereco(&self) -> &Endereco;
    fn documento(&self) -> &Documento;
}

macro_rules! impl_cliente_fields {
    ($($ty:ty),*) => {$(
        impl ClienteFields for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn nome(&self) -> &str {
                &self.nome
            }
            fn descricao(&self) -> &str {
                &self.descricao
            }
            fn contato(&self) -> &Contato {
                &self.contato
            }
            fn endereco(&self) -> &Endereco {
                &self.endereco
            }
            fn documento(&self) -> &Documento {
                &self.documento
            }
        }
    )*};
}

impl_cliente_fields!(AddClienteCommand, UpdateClienteCommand);
