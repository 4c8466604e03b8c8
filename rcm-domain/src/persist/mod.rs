//! 持久化（persist）
//!
//! 定义仓储与工作单元协议，并提供进程内实现：
//! - `Repository`：按聚合类型的读写与规约查询；
//! - `UnitOfWork` / `UnitOfWorkFactory`：单命令的原子提交边界；
//! - `InMemoryDatabase` / `InMemoryUnitOfWork` / `InMemoryRepository`：
//!   以 JSON 载荷保存聚合的内存存储，适用于测试、示例与本地开发。
//!
//! 具体存储后端（如关系型数据库）由上层实现这些协议后注入。
//!
mod inmemory;
mod repository;
mod unit_of_work;

pub use inmemory::{InMemoryDatabase, InMemoryRepository, InMemoryUnitOfWork};
pub use repository::Repository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
