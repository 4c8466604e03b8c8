use bon::Builder;
use rcm_domain::notification::DomainNotificationHandler;
use rcm_domain::persist::UnitOfWork;
use uuid::Uuid;

/// 请求作用域的通知访问能力
///
/// 中介者只依赖这一能力：把领域通知写入当前作用域，且不与其他作用域交错。
pub trait NotificationScope: Send + Sync {
    fn notifications(&self) -> &DomainNotificationHandler;

    /// 链路追踪标识（日志字段）
    fn correlation_id(&self) -> &str;
}

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用所需的横切信息：
/// - 关联追踪 `correlation_id`（缺省时生成 UUID v4）；
/// - 执行者 `actor_id`（可选，用于审计日志）；
/// - 本次调用专属的领域通知收集器（每个上下文一份全新的实例）。
///
/// 典型用法：
/// ```rust
/// use rcm_application::context::{AppContext, NotificationScope};
///
/// let ctx = AppContext::builder()
///     .correlation_id("cor-123")
///     .actor_id("u-1")
///     .build();
/// assert_eq!(ctx.correlation_id(), "cor-123");
/// assert!(!ctx.notifications().has_notifications());
/// ```
#[derive(Debug, Builder)]
pub struct AppContext {
    /// 链路追踪标识
    #[builder(into, default = Uuid::new_v4().to_string())]
    correlation_id: String,
    /// 执行者（可选）
    #[builder(into)]
    actor_id: Option<String>,
    #[builder(skip)]
    notifications: DomainNotificationHandler,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppContext {
    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}

impl NotificationScope for AppContext {
    fn notifications(&self) -> &DomainNotificationHandler {
        &self.notifications
    }

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

/// 命令作用域：一个上下文 + 一个工作单元
///
/// 每个入站命令独占一个作用域，不与并发中的其他作用域共享；
/// 作用域结束（drop）时未提交的暂存变更随工作单元一起丢弃。
#[derive(Debug)]
pub struct CommandScope<U> {
    ctx: AppContext,
    uow: U,
}

impl<U: UnitOfWork> CommandScope<U> {
    pub fn new(ctx: AppContext, uow: U) -> Self {
        Self { ctx, uow }
    }

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }

    pub fn uow(&self) -> &U {
        &self.uow
    }
}

impl<U: UnitOfWork> NotificationScope for CommandScope<U> {
    fn notifications(&self) -> &DomainNotificationHandler {
        self.ctx.notifications()
    }

    fn correlation_id(&self) -> &str {
        self.ctx.correlation_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_context_gets_fresh_notifications_and_correlation_id() {
        let a = AppContext::default();
        let b = AppContext::default();
        a.notifications().add_notification("Nome", "obrigatório");

        assert!(a.notifications().has_notifications());
        assert!(!b.notifications().has_notifications());
        assert_ne!(a.correlation_id(), b.correlation_id());
        assert!(a.actor_id().is_none());
    }
}
