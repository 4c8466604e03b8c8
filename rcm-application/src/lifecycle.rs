//! 命令生命周期
//!
//! `Received → Validating → {Rejected | Mutating → Committed | CommitFailed}`
//!
//! - 校验产生任何通知：发布后进入 `Rejected`，不触碰仓储、不提交；
//! - 变更阶段的业务规则冲突同样发布为通知并进入 `Rejected`；
//! - 提交失败：记录底层故障，发布一条通用通知并进入 `CommitFailed`。
//!
//! `Rejected`、`Committed`、`CommitFailed` 为终态。
//!
use crate::{
    command::Command,
    context::NotificationScope,
    error::{AppError, AppResult},
    mediator::Mediator,
};
use rcm_domain::error::{DomainError, DomainResult};
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::UnitOfWork;
use rcm_domain::validation::Validator;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Received,
    Validating,
    Rejected,
    Mutating,
    Committed,
    CommitFailed,
}

impl CommandState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CommandState::Rejected | CommandState::Committed | CommandState::CommitFailed
        )
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 驱动单次命令处理的状态机
pub struct CommandLifecycle<'a, S> {
    mediator: &'a Mediator<S>,
    scope: &'a S,
    command: &'static str,
    state: CommandState,
}

impl<'a, S> CommandLifecycle<'a, S>
where
    S: NotificationScope + 'static,
{
    pub fn start<C: Command>(mediator: &'a Mediator<S>, scope: &'a S) -> Self {
        Self {
            mediator,
            scope,
            command: C::NAME,
            state: CommandState::Received,
        }
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// 可以继续执行仓储变更
    pub fn is_mutating(&self) -> bool {
        self.state == CommandState::Mutating
    }

    fn ensure_transition(&self, next: CommandState) -> AppResult<()> {
        use CommandState::*;
        let allowed = matches!(
            (self.state, next),
            (Received, Validating)
                | (Validating, Rejected)
                | (Validating, Mutating)
                | (Mutating, Rejected)
                | (Mutating, Committed)
                | (Mutating, CommitFailed)
        );
        if !allowed {
            return Err(AppError::Domain(DomainError::invalid_state(format!(
                "{}: illegal transition {} -> {}",
                self.command, self.state, next
            ))));
        }
        Ok(())
    }

    fn transition(&mut self, next: CommandState) -> AppResult<()> {
        self.ensure_transition(next)?;
        tracing::trace!(command = self.command, from = %self.state, to = %next, "state transition");
        self.state = next;
        Ok(())
    }

    /// 执行校验；返回 `true` 表示通过并进入 `Mutating`
    pub fn validate<C, V>(&mut self, validator: &V, cmd: &C) -> AppResult<bool>
    where
        V: Validator<C> + ?Sized,
    {
        self.transition(CommandState::Validating)?;
        let result = validator.validate(cmd);
        if result.is_valid() {
            self.transition(CommandState::Mutating)?;
            return Ok(true);
        }

        tracing::warn!(
            command = self.command,
            notifications = result.notifications().len(),
            "command rejected by validation"
        );
        self.mediator
            .publish(self.scope, result.into_notifications());
        self.transition(CommandState::Rejected)?;
        Ok(false)
    }

    /// 变更阶段的业务规则拒绝
    pub fn reject<I>(&mut self, notifications: I) -> AppResult<()>
    where
        I: IntoIterator<Item = DomainNotification>,
    {
        self.ensure_transition(CommandState::Rejected)?;
        let origin = self.command;
        let notifications: Vec<_> = notifications
            .into_iter()
            .map(|n| match n.origin() {
                Some(_) => n,
                None => n.with_origin(origin),
            })
            .collect();
        tracing::warn!(
            command = self.command,
            notifications = notifications.len(),
            "command rejected by business rule"
        );
        self.mediator.publish(self.scope, notifications);
        self.transition(CommandState::Rejected)
    }

    /// 聚合方法结果分流：
    /// - `Ok(v)` → `Some(v)`；
    /// - 业务规则冲突 → 发布通知、进入 `Rejected`，返回 `None`；
    /// - 其他领域错误 → 作为基础设施故障向上传播。
    pub fn check<T>(&mut self, result: DomainResult<T>) -> AppResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => match err.to_notification() {
                Some(notification) => {
                    self.reject([notification])?;
                    Ok(None)
                }
                None => Err(err.into()),
            },
        }
    }

    /// 提交工作单元
    ///
    /// 失败时不向外返回错误：记录细节，在作用域追加一条通用通知并进入 `CommitFailed`。
    pub async fn commit<U>(&mut self, uow: &U) -> AppResult<()>
    where
        U: UnitOfWork,
    {
        self.ensure_transition(CommandState::Committed)?;

        match uow.commit().await {
            Ok(()) => {
                tracing::debug!(command = self.command, "command committed");
                self.transition(CommandState::Committed)
            }
            Err(err) => {
                tracing::error!(command = self.command, error = %err, "commit failed");
                let config = self.mediator.config();
                self.mediator.publish(
                    self.scope,
                    [DomainNotification::new(
                        config.commit_failure_key.as_str(),
                        config.commit_failure_message.as_str(),
                    )
                    .with_origin(self.command)],
                );
                self.transition(CommandState::CommitFailed)
            }
        }
    }
}
