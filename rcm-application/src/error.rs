use rcm_domain::error::DomainError;

/// 应用层错误
///
/// 只有配置类错误（处理器缺失、重复注册、未实现、类型不匹配）会从
/// [`Mediator::send`](crate::mediator::Mediator::send) 向外传播；
/// 其余错误由中介者记录日志并转换为一条通用的领域通知。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("infra: {0}")]
    Infra(String),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler not implemented: {0}")]
    HandlerNotImplemented(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 是否属于装配/配置错误（编程错误，必须快速失败）
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            AppError::HandlerNotFound(_)
                | AppError::HandlerNotImplemented(_)
                | AppError::AlreadyRegisteredCommand { .. }
                | AppError::TypeMismatch { .. }
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
