use crate::{
    command::Command,
    command_handler::CommandHandler,
    config::ApplicationConfig,
    context::NotificationScope,
    error::{AppError, AppResult},
};
use rcm_domain::notification::DomainNotification;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type CmdHandlerFuture<'a> = Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>>;

type CmdHandlerFn<S> = Arc<
    dyn for<'a> Fn(&'a Mediator<S>, &'a S, Box<dyn Any + Send>) -> CmdHandlerFuture<'a>
        + Send
        + Sync,
>;

struct Registration<S> {
    name: &'static str,
    handler: CmdHandlerFn<S>,
}

/// 中介者构建器
///
/// - `register`：按命令 `TypeId` 登记唯一处理器，重复登记返回 `AlreadyRegisteredCommand`；
/// - `require`：声明应用必须处理的命令；
/// - `build`：任一必需命令缺少处理器时返回 `HandlerNotFound`，在开始服务前快速失败。
pub struct MediatorBuilder<S> {
    handlers: HashMap<TypeId, Registration<S>>,
    required: Vec<(TypeId, &'static str)>,
    config: ApplicationConfig,
}

impl<S> Default for MediatorBuilder<S>
where
    S: NotificationScope + 'static,
{
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            required: Vec::new(),
            config: ApplicationConfig::default(),
        }
    }
}

impl<S> MediatorBuilder<S>
where
    S: NotificationScope + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&mut self, config: ApplicationConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// 注册命令处理器
    pub fn register<C, H>(&mut self, handler: Arc<H>) -> AppResult<&mut Self>
    where
        C: Command,
        H: CommandHandler<C, S> + 'static,
    {
        let key = TypeId::of::<C>();
        if self.handlers.contains_key(&key) {
            return Err(AppError::AlreadyRegisteredCommand { command: C::NAME });
        }

        let f: CmdHandlerFn<S> = Arc::new(move |mediator, scope, boxed_cmd| {
            let handler = handler.clone();

            Box::pin(async move {
                // 键与闭包来自同一泛型 C，正常情况下 downcast 不会失败
                match boxed_cmd.downcast::<C>() {
                    Ok(cmd) => handler.handle(mediator, scope, *cmd).await,
                    Err(_) => Err(AppError::TypeMismatch {
                        expected: C::NAME,
                        found: "unknown",
                    }),
                }
            })
        });

        self.handlers.insert(
            key,
            Registration {
                name: C::NAME,
                handler: f,
            },
        );
        Ok(self)
    }

    /// 声明必须有处理器的命令
    pub fn require<C: Command>(&mut self) -> &mut Self {
        self.required.push((TypeId::of::<C>(), C::NAME));
        self
    }

    pub fn build(self) -> AppResult<Mediator<S>> {
        if let Some((_, name)) = self
            .required
            .iter()
            .find(|(key, _)| !self.handlers.contains_key(key))
        {
            tracing::error!(command = name, "required command has no handler");
            return Err(AppError::HandlerNotFound(name));
        }

        tracing::debug!(handlers = self.handlers.len(), "mediator built");
        Ok(Mediator {
            handlers: self.handlers,
            config: Arc::new(self.config),
        })
    }
}

/// 进程内中介者
///
/// - 命令：按 `TypeId` 路由到唯一处理器，处理完成（含嵌套通知投递）后 `send` 才返回；
/// - 通知：投递到当前作用域的 [`DomainNotificationHandler`](rcm_domain::notification::DomainNotificationHandler)；
/// - 构建后注册表只读，可通过 `Arc` 在并发作用域间无锁共享；
/// - 不持有任何业务状态。
pub struct Mediator<S> {
    handlers: HashMap<TypeId, Registration<S>>,
    config: Arc<ApplicationConfig>,
}

impl<S> Mediator<S>
where
    S: NotificationScope + 'static,
{
    pub fn builder() -> MediatorBuilder<S> {
        MediatorBuilder::new()
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// 发送命令
    ///
    /// 仅配置类错误向外传播；处理器返回的其他错误视为基础设施故障，
    /// 记录细节后在作用域中追加一条通用通知。
    #[tracing::instrument(
        skip_all,
        fields(command = C::NAME, correlation_id = %scope.correlation_id())
    )]
    pub async fn send<C: Command>(&self, scope: &S, cmd: C) -> AppResult<()> {
        let Some(registration) = self.handlers.get(&TypeId::of::<C>()) else {
            tracing::error!("no handler registered");
            return Err(AppError::HandlerNotFound(C::NAME));
        };

        match (registration.handler)(self, scope, Box::new(cmd)).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_configuration_fault() => {
                tracing::error!(error = %err, "handler configuration fault");
                Err(err)
            }
            Err(err) => {
                tracing::error!(error = %err, "command failed with infrastructure fault");
                scope.notifications().add(
                    DomainNotification::new(
                        self.config.infra_failure_key.as_str(),
                        self.config.infra_failure_message.as_str(),
                    )
                    .with_origin(C::NAME),
                );
                Ok(())
            }
        }
    }

    /// 按顺序把通知投递到作用域；空输入不做任何事
    pub fn publish<I>(&self, scope: &S, notifications: I)
    where
        I: IntoIterator<Item = DomainNotification>,
    {
        let notifications: Vec<_> = notifications.into_iter().collect();
        if notifications.is_empty() {
            return;
        }
        for n in &notifications {
            tracing::debug!(key = n.key(), message = n.message(), "notification published");
        }
        scope.notifications().extend(notifications);
    }

    pub fn is_registered<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    /// 已注册命令名称（按字母序）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|r| r.name).collect();
        names.sort_unstable();
        names
    }
}
