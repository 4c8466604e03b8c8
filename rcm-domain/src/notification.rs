//! 领域通知（Domain Notification）
//!
//! 可预期、用户可修正的失败（输入错误、业务规则冲突）不以错误中断控制流，
//! 而是追加到当前请求作用域内唯一的 [`DomainNotificationHandler`]，
//! 由调用方在命令执行结束后统一读取。
//!
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一条校验/业务规则失败记录，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainNotification {
    key: String,
    message: String,
    origin: Option<String>,
}

impl DomainNotification {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            origin: None,
        }
    }

    /// 标注来源聚合（类型名）
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// 通常为出错字段名或命令名
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl fmt::Display for DomainNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// 单个请求作用域内的通知聚合器
///
/// - 每个作用域恰有一个实例，不跨并发请求共享；
/// - 追加顺序即读取顺序；
/// - `has_notifications()` 是命令是否成功的唯一判据。
#[derive(Debug, Default)]
pub struct DomainNotificationHandler {
    notifications: Mutex<Vec<DomainNotification>>,
}

impl DomainNotificationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, notification: DomainNotification) {
        self.notifications.lock().push(notification);
    }

    pub fn add_notification(&self, key: impl Into<String>, message: impl Into<String>) {
        self.add(DomainNotification::new(key, message));
    }

    /// 按给定顺序整体追加（持有一次锁，批次内不会与其他写入交错）
    pub fn extend<I>(&self, notifications: I)
    where
        I: IntoIterator<Item = DomainNotification>,
    {
        self.notifications.lock().extend(notifications);
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_notifications()
    }

    /// 按插入顺序返回只读快照
    pub fn notifications(&self) -> Vec<DomainNotification> {
        self.notifications.lock().clone()
    }
}
