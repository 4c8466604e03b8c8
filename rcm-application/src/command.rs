/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，通常会修改领域状态。
/// - 不返回业务数据，执行结果只体现在作用域的领域通知中；
/// - 命令只携带数据，不携带行为；由调用方在发送前构造，处理完即丢弃；
/// - 建议保持语义化的“动宾结构”命名，如 `AddClienteCommand`、`FinalizarVendaCommand`。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于日志、追踪与诊断。避免依赖 `type_name::<T>()`。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}
