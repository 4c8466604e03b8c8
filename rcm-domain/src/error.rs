//! 领域层统一错误定义
//!
//! 聚焦输入解析、仓储/工作单元提交、状态校验等最小必要集合。
//! 可预期、用户可修正的失败（校验、业务规则）不走错误通道，
//! 而是以 [`DomainNotification`](crate::notification::DomainNotification) 形式聚合；
//! 这里仅承载基础设施故障与编程错误。
//!
use crate::notification::DomainNotification;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 仓储/持久化 ---
    #[error("already exists: type={aggregate_type}, id={id}")]
    AlreadyExists {
        aggregate_type: &'static str,
        id: String,
    },
    #[error("not found: type={aggregate_type}, id={id}")]
    NotFound {
        aggregate_type: &'static str,
        id: String,
    },
    #[error("version conflict: type={aggregate_type}, id={id}, expected={expected}, actual={actual}")]
    VersionConflict {
        aggregate_type: &'static str,
        id: String,
        expected: usize,
        actual: usize,
    },

    // --- 领域规则/状态 ---
    /// 业务规则冲突：可预期、面向用户，由命令处理器转为领域通知
    #[error("business rule violated: {key}: {message}")]
    BusinessRule { key: &'static str, message: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

impl DomainError {
    pub fn rule(key: &'static str, message: impl Into<String>) -> Self {
        DomainError::BusinessRule {
            key,
            message: message.into(),
        }
    }

    /// 业务规则冲突对应的领域通知；其余错误属于基础设施故障，返回 `None`
    pub fn to_notification(&self) -> Option<DomainNotification> {
        match self {
            DomainError::BusinessRule { key, message } => {
                Some(DomainNotification::new(*key, message.clone()))
            }
            _ => None,
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        DomainError::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
