use crate::{
    command::Command,
    context::{AppContext, CommandScope, NotificationScope},
    error::AppResult,
    mediator::Mediator,
};
use rcm_domain::aggregate::Aggregate;
use rcm_domain::notification::DomainNotification;
use rcm_domain::persist::{Repository, UnitOfWork, UnitOfWorkFactory};
use rcm_domain::specification::CompositeSpecification;
use serde::Serialize;
use std::sync::Arc;

/// 命令执行结果：完全由作用域内的领域通知推导
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub errors: Vec<DomainNotification>,
}

impl CommandResult {
    pub fn from_notifications(errors: Vec<DomainNotification>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
        }
    }

    /// 指定键的错误消息（便于调用方回填表单字段）
    pub fn messages_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |n| n.key() == key)
            .map(DomainNotification::message)
    }
}

type ScopeOf<F> = CommandScope<<F as UnitOfWorkFactory>::UnitOfWork>;

/// 命令分发器
///
/// 每次分发开启一个新作用域（全新的通知收集器 + 全新的工作单元），
/// 经中介者发送命令后，以作用域通知构造 [`CommandResult`]。
pub struct CommandDispatcher<F>
where
    F: UnitOfWorkFactory,
{
    mediator: Arc<Mediator<ScopeOf<F>>>,
    factory: Arc<F>,
}

impl<F> Clone for CommandDispatcher<F>
where
    F: UnitOfWorkFactory,
{
    fn clone(&self) -> Self {
        Self {
            mediator: self.mediator.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<F> CommandDispatcher<F>
where
    F: UnitOfWorkFactory,
    F::UnitOfWork: 'static,
{
    pub fn new(mediator: Arc<Mediator<ScopeOf<F>>>, factory: Arc<F>) -> Self {
        Self { mediator, factory }
    }

    pub fn mediator(&self) -> &Mediator<ScopeOf<F>> {
        &self.mediator
    }

    pub async fn dispatch<C: Command>(&self, cmd: C) -> AppResult<CommandResult> {
        self.dispatch_with(AppContext::default(), cmd).await
    }

    #[tracing::instrument(skip_all, fields(command = C::NAME))]
    pub async fn dispatch_with<C: Command>(
        &self,
        ctx: AppContext,
        cmd: C,
    ) -> AppResult<CommandResult> {
        let scope = CommandScope::new(ctx, self.factory.begin());
        self.mediator.send(&scope, cmd).await?;

        let result = CommandResult::from_notifications(scope.notifications().notifications());
        tracing::debug!(success = result.success, errors = result.errors.len(), "command dispatched");
        Ok(result)
    }

    /// 只读查询：开启一个不提交的工作单元读取已提交数据
    pub async fn get<A: Aggregate>(&self, id: &A::Id) -> AppResult<Option<A>> {
        Ok(self.factory.begin().repository::<A>().get(id).await?)
    }

    pub async fn find<A: Aggregate>(
        &self,
        spec: &CompositeSpecification<A>,
    ) -> AppResult<Vec<A>> {
        Ok(self.factory.begin().repository::<A>().find(spec).await?)
    }
}
