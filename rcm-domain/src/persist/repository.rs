//! 仓储协议（Repository）
//!
//! 领域层只依赖这一组能力（读取、按规约查询、增删改），不关心具体存储技术。
//! 写操作仅暂存于所属工作单元，直到 [`UnitOfWork::commit`](super::UnitOfWork::commit)
//! 才原子落地。
//!
use crate::{aggregate::Aggregate, error::DomainResult as Result, specification::CompositeSpecification};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: Aggregate,
{
    async fn get(&self, id: &A::Id) -> Result<Option<A>>;

    async fn list(&self) -> Result<Vec<A>>;

    /// 返回满足规约的全部聚合
    async fn find(&self, spec: &CompositeSpecification<A>) -> Result<Vec<A>>;

    async fn add(&self, aggregate: A) -> Result<()>;

    async fn update(&self, aggregate: A) -> Result<()>;

    async fn remove(&self, id: &A::Id) -> Result<()>;
}

#[async_trait]
impl<A, T> Repository<A> for Arc<T>
where
    A: Aggregate,
    T: Repository<A> + ?Sized,
{
    async fn get(&self, id: &A::Id) -> Result<Option<A>> {
        (**self).get(id).await
    }

    async fn list(&self) -> Result<Vec<A>> {
        (**self).list().await
    }

    async fn find(&self, spec: &CompositeSpecification<A>) -> Result<Vec<A>> {
        (**self).find(spec).await
    }

    async fn add(&self, aggregate: A) -> Result<()> {
        (**self).add(aggregate).await
    }

    async fn update(&self, aggregate: A) -> Result<()> {
        (**self).update(aggregate).await
    }

    async fn remove(&self, id: &A::Id) -> Result<()> {
        (**self).remove(id).await
    }
}
