use tracing_subscriber::EnvFilter;

/// 初始化全局 tracing 订阅者
///
/// `RUST_LOG` 存在时优先生效，否则使用 `default_filter`（如 `"rcm_application=debug"`）。
/// 重复调用时保留首次安装的订阅者。
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
