//! RCM 领域层（rcm-domain）
//!
//! 提供命令处理引擎所依赖的领域层抽象与构件：
//! - 实体（`entity`）、聚合（`aggregate`）与值对象（`value_object`）建模；
//! - 领域通知（`notification`）：聚合校验/业务规则失败而非抛出错误；
//! - 命令校验（`validation`）：声明式规则集，产出领域通知；
//! - 规约（`specification`）：可组合的查询谓词树；
//! - 仓储与工作单元（`persist`）及其内存实现；
//! - 输入解析（`input`）：构建规约前将原始文本转为类型化参数；
//! - RCM 领域模型（`models`）：客户、商品、销售、发票及其规约。
//!
//! 本 crate 与存储与传输实现解耦，具体存储后端由上层实现 `persist` 中的协议后注入。
//!
pub mod aggregate;
pub mod entity;
pub mod error;
pub mod input;
pub mod models;
pub mod notification;
pub mod persist;
pub mod specification;
pub mod validation;
pub mod value_object;
