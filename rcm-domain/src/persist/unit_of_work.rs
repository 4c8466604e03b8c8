//! 工作单元（Unit of Work）
//!
//! 一个命令对应一个工作单元：仓储写操作先暂存，成功路径上最多提交一次；
//! 未提交即丢弃（drop）时，暂存的变更全部作废。
//!
use crate::{aggregate::Aggregate, error::DomainResult as Result, persist::Repository};
use async_trait::async_trait;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// 绑定到本工作单元的仓储
    type Repo<A: Aggregate>: Repository<A>;

    fn repository<A: Aggregate>(&self) -> Self::Repo<A>;

    /// 已暂存、尚未提交的变更数
    fn pending_changes(&self) -> usize;

    /// 原子提交全部暂存变更：要么全部生效，要么全部不生效
    async fn commit(&self) -> Result<()>;
}

/// 为每个请求作用域开启新的工作单元
pub trait UnitOfWorkFactory: Send + Sync {
    type UnitOfWork: UnitOfWork;

    fn begin(&self) -> Self::UnitOfWork;
}
