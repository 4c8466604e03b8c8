//! RCM 应用层（rcm-application）
//!
//! - 命令（`command`）与命令处理器（`command_handler`）协议；
//! - 进程内中介者（`mediator`）：按类型路由命令、向作用域投递领域通知；
//! - 请求作用域（`context`）与命令生命周期（`lifecycle`）；
//! - 各聚合用例（`cliente`、`produto`、`venda`、`nota_fiscal`）；
//! - 命令分发器（`dispatcher`）与应用装配（`application`）；
//! - 配置（`config`）与日志初始化（`telemetry`）。
//!
pub mod application;
pub mod cliente;
pub mod command;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod mediator;
pub mod nota_fiscal;
pub mod produto;
pub mod telemetry;
pub mod venda;

pub use application::{RcmApplication, build_mediator};
pub use dispatcher::{CommandDispatcher, CommandResult};
pub use mediator::{Mediator, MediatorBuilder};
