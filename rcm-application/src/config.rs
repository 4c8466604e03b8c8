//! 应用层配置
//!
use bon::Builder;
use serde::Deserialize;

/// 通用失败通知的键与文案
///
/// 基础设施故障（提交失败、仓储异常）不向调用方暴露细节，
/// 只在作用域中追加一条由此处配置的通知，细节写入日志。
#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    #[builder(into, default = String::from("Commit"))]
    pub commit_failure_key: String,
    #[builder(
        into,
        default = String::from("Não foi possível salvar as alterações. Tente novamente.")
    )]
    pub commit_failure_message: String,
    #[builder(into, default = String::from("Erro"))]
    pub infra_failure_key: String,
    #[builder(
        into,
        default = String::from("Ocorreu um erro inesperado ao processar a solicitação.")
    )]
    pub infra_failure_message: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
