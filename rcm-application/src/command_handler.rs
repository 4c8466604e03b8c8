use crate::{
    command::Command, context::NotificationScope, error::AppResult, mediator::Mediator,
};
use async_trait::async_trait;
use std::sync::Arc;

/// 命令处理器：唯一允许修改聚合的代码路径
///
/// 校验失败、业务规则冲突通过 `mediator.publish` 写入作用域通知后正常返回 `Ok(())`；
/// 返回 `Err` 仅表示基础设施故障或装配错误。
#[async_trait]
pub trait CommandHandler<C, S>: Send + Sync
where
    C: Command,
    S: NotificationScope + 'static,
{
    async fn handle(&self, mediator: &Mediator<S>, scope: &S, cmd: C) -> AppResult<()>;
}

#[async_trait]
impl<C, S, T> CommandHandler<C, S> for Arc<T>
where
    C: Command,
    S: NotificationScope + 'static,
    T: CommandHandler<C, S> + ?Sized,
{
    async fn handle(&self, mediator: &Mediator<S>, scope: &S, cmd: C) -> AppResult<()> {
        (**self).handle(mediator, scope, cmd).await
    }
}
