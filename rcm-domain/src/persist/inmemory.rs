//! 内存存储实现
//!
//! - `InMemoryDatabase`：已提交数据，按聚合类型分表，行内保存 JSON 载荷与行版本；
//! - `InMemoryUnitOfWork`：单个作用域的暂存变更，读取时以本作用域暂存覆盖已提交数据；
//! - `InMemoryRepository<A>`：绑定到某个工作单元的聚合仓储。
//!
//! 提交在同一把写锁下先逐条校验（重复插入、行不存在、版本冲突），
//! 全部通过后才整体落地，否则一条也不生效。更新与删除都以作用域读到的版本作为乐观锁期望值；
//! 只读取而未修改的行不参与校验，需要以其为前提的命令应暂存一次对该行的更新。
//!
use crate::aggregate::Aggregate;
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::{Repository, UnitOfWork, UnitOfWorkFactory};
use crate::specification::CompositeSpecification;
use crate::value_object::Version;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct Row {
    version: Version,
    payload: Value,
}

type Table = BTreeMap<String, Row>;

#[derive(Debug, Default)]
struct DatabaseState {
    tables: RwLock<HashMap<&'static str, Table>>,
    commits: AtomicUsize,
}

/// 内存数据库（克隆即共享同一份数据）
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<DatabaseState>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功提交的次数
    pub fn commit_count(&self) -> usize {
        self.state.commits.load(Ordering::SeqCst)
    }

    /// 某聚合类型已提交的行数
    pub fn row_count<A: Aggregate>(&self) -> usize {
        self.state
            .tables
            .read()
            .get(A::TYPE)
            .map_or(0, BTreeMap::len)
    }

    /// 绕过工作单元直接写入（用于初始化种子数据）
    pub fn seed<A: Aggregate>(&self, aggregate: &A) -> Result<()> {
        let payload = serde_json::to_value(aggregate)?;
        let version = if aggregate.version().is_new() {
            aggregate.version().next()
        } else {
            aggregate.version()
        };
        self.state
            .tables
            .write()
            .entry(A::TYPE)
            .or_default()
            .insert(aggregate.id().to_string(), Row { version, payload });
        Ok(())
    }

    fn committed_rows<A: Aggregate>(&self) -> Table {
        self.state
            .tables
            .read()
            .get(A::TYPE)
            .cloned()
            .unwrap_or_default()
    }

    fn committed_row<A: Aggregate>(&self, id: &str) -> Option<Row> {
        self.state
            .tables
            .read()
            .get(A::TYPE)
            .and_then(|t| t.get(id))
            .cloned()
    }
}

impl UnitOfWorkFactory for InMemoryDatabase {
    type UnitOfWork = InMemoryUnitOfWork;

    fn begin(&self) -> Self::UnitOfWork {
        InMemoryUnitOfWork::new(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
struct PendingChange {
    aggregate_type: &'static str,
    id: String,
    kind: ChangeKind,
    /// 暂存时作用域所见的版本（更新/删除时作为乐观锁期望值）
    version: Version,
    payload: Option<Value>,
}

#[derive(Debug)]
struct UnitOfWorkState {
    db: InMemoryDatabase,
    pending: Mutex<Vec<PendingChange>>,
    committed: AtomicBool,
}

/// 单个作用域的工作单元（克隆共享同一份暂存区）
#[derive(Debug, Clone)]
pub struct InMemoryUnitOfWork {
    state: Arc<UnitOfWorkState>,
}

impl InMemoryUnitOfWork {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self {
            state: Arc::new(UnitOfWorkState {
                db,
                pending: Mutex::new(Vec::new()),
                committed: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.state.committed.load(Ordering::SeqCst)
    }

    fn stage(&self, change: PendingChange) -> Result<()> {
        if self.is_committed() {
            return Err(DomainError::invalid_state(
                "unit of work already committed",
            ));
        }
        tracing::debug!(
            aggregate_type = change.aggregate_type,
            id = %change.id,
            kind = ?change.kind,
            "staging change"
        );
        self.state.pending.lock().push(change);
        Ok(())
    }

    /// 本作用域对某行的最后一次暂存变更
    fn last_pending<A: Aggregate>(&self, id: &str) -> Option<PendingChange> {
        self.state
            .pending
            .lock()
            .iter()
            .rev()
            .find(|c| c.aggregate_type == A::TYPE && c.id == id)
            .cloned()
    }

    fn materialize<A: Aggregate>(payload: Value, version: Version) -> Result<A> {
        let mut aggregate: A = serde_json::from_value(payload)?;
        aggregate.set_version(version);
        Ok(aggregate)
    }

    fn read<A: Aggregate>(&self, id: &str) -> Result<Option<A>> {
        if let Some(change) = self.last_pending::<A>(id) {
            return match (change.kind, change.payload) {
                (ChangeKind::Delete, _) | (_, None) => Ok(None),
                (_, Some(payload)) => Self::materialize(payload, change.version).map(Some),
            };
        }

        self.state
            .db
            .committed_row::<A>(id)
            .map(|row| Self::materialize(row.payload, row.version))
            .transpose()
    }

    fn read_all<A: Aggregate>(&self) -> Result<Vec<A>> {
        let mut rows: BTreeMap<String, Option<(Version, Value)>> = self
            .state
            .db
            .committed_rows::<A>()
            .into_iter()
            .map(|(id, row)| (id, Some((row.version, row.payload))))
            .collect();

        for change in self
            .state
            .pending
            .lock()
            .iter()
            .filter(|c| c.aggregate_type == A::TYPE)
        {
            let value = match (change.kind, &change.payload) {
                (ChangeKind::Delete, _) | (_, None) => None,
                (_, Some(payload)) => Some((change.version, payload.clone())),
            };
            rows.insert(change.id.clone(), value);
        }

        rows.into_values()
            .flatten()
            .map(|(version, payload)| Self::materialize(payload, version))
            .collect()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Repo<A: Aggregate> = InMemoryRepository<A>;

    fn repository<A: Aggregate>(&self) -> Self::Repo<A> {
        InMemoryRepository::new(self.clone())
    }

    fn pending_changes(&self) -> usize {
        self.state.pending.lock().len()
    }

    async fn commit(&self) -> Result<()> {
        if self.state.committed.swap(true, Ordering::SeqCst) {
            return Err(DomainError::invalid_state(
                "unit of work already committed",
            ));
        }

        let pending = std::mem::take(&mut *self.state.pending.lock());
        let mut tables = self.state.db.state.tables.write();

        // 在副本上逐条校验，全部通过后再整体写回
        let mut touched: HashMap<(&'static str, String), Option<Row>> = HashMap::new();

        for change in &pending {
            let key = (change.aggregate_type, change.id.clone());
            let original_version = tables
                .get(change.aggregate_type)
                .and_then(|t| t.get(&change.id))
                .map(|row| row.version);
            let exists = match touched.get(&key) {
                Some(state) => state.is_some(),
                None => original_version.is_some(),
            };

            let next = match change.kind {
                ChangeKind::Insert => {
                    if exists {
                        return Err(Self::reject(DomainError::AlreadyExists {
                            aggregate_type: change.aggregate_type,
                            id: change.id.clone(),
                        }));
                    }
                    Some(Row {
                        version: original_version.unwrap_or_default().next(),
                        payload: change.payload.clone().unwrap_or(Value::Null),
                    })
                }
                ChangeKind::Update => {
                    if !exists {
                        return Err(Self::reject(DomainError::NotFound {
                            aggregate_type: change.aggregate_type,
                            id: change.id.clone(),
                        }));
                    }
                    let actual = original_version.unwrap_or_default();
                    if change.version != actual {
                        return Err(Self::reject(DomainError::VersionConflict {
                            aggregate_type: change.aggregate_type,
                            id: change.id.clone(),
                            expected: change.version.value(),
                            actual: actual.value(),
                        }));
                    }
                    Some(Row {
                        version: actual.next(),
                        payload: change.payload.clone().unwrap_or(Value::Null),
                    })
                }
                ChangeKind::Delete => {
                    if !exists {
                        return Err(Self::reject(DomainError::NotFound {
                            aggregate_type: change.aggregate_type,
                            id: change.id.clone(),
                        }));
                    }
                    // 本作用域新插入的行没有已提交版本可比较
                    let actual = original_version.unwrap_or_default();
                    if !change.version.is_new() && change.version != actual {
                        return Err(Self::reject(DomainError::VersionConflict {
                            aggregate_type: change.aggregate_type,
                            id: change.id.clone(),
                            expected: change.version.value(),
                            actual: actual.value(),
                        }));
                    }
                    None
                }
            };

            touched.insert(key, next);
        }

        for ((aggregate_type, id), row) in touched {
            let table = tables.entry(aggregate_type).or_default();
            match row {
                Some(row) => {
                    table.insert(id, row);
                }
                None => {
                    table.remove(&id);
                }
            }
        }

        self.state.db.state.commits.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(changes = pending.len(), "unit of work committed");

        Ok(())
    }
}

impl InMemoryUnitOfWork {
    fn reject(err: DomainError) -> DomainError {
        tracing::warn!(error = %err, "commit rejected, no change applied");
        err
    }
}

/// 绑定到某个工作单元的聚合仓储
pub struct InMemoryRepository<A> {
    uow: InMemoryUnitOfWork,
    _marker: PhantomData<fn() -> A>,
}

impl<A> InMemoryRepository<A> {
    pub fn new(uow: InMemoryUnitOfWork) -> Self {
        Self {
            uow,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<A> Repository<A> for InMemoryRepository<A>
where
    A: Aggregate,
{
    async fn get(&self, id: &A::Id) -> Result<Option<A>> {
        self.uow.read::<A>(&id.to_string())
    }

    async fn list(&self) -> Result<Vec<A>> {
        self.uow.read_all::<A>()
    }

    async fn find(&self, spec: &CompositeSpecification<A>) -> Result<Vec<A>> {
        let predicate = spec.to_predicate();
        Ok(self
            .uow
            .read_all::<A>()?
            .into_iter()
            .filter(|a| predicate(a))
            .collect())
    }

    async fn add(&self, aggregate: A) -> Result<()> {
        self.uow.stage(PendingChange {
            aggregate_type: A::TYPE,
            id: aggregate.id().to_string(),
            kind: ChangeKind::Insert,
            version: Version::new(),
            payload: Some(serde_json::to_value(&aggregate)?),
        })
    }

    async fn update(&self, aggregate: A) -> Result<()> {
        self.uow.stage(PendingChange {
            aggregate_type: A::TYPE,
            id: aggregate.id().to_string(),
            kind: ChangeKind::Update,
            version: aggregate.version(),
            payload: Some(serde_json::to_value(&aggregate)?),
        })
    }

    async fn remove(&self, id: &A::Id) -> Result<()> {
        let id = id.to_string();
        let version = match self.uow.last_pending::<A>(&id) {
            Some(change) => change.version,
            None => self
                .uow
                .state
                .db
                .committed_row::<A>(&id)
                .map(|row| row.version)
                .unwrap_or_default(),
        };
        self.uow.stage(PendingChange {
            aggregate_type: A::TYPE,
            id,
            kind: ChangeKind::Delete,
            version,
            payload: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::specification::CompositeSpecification;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        #[serde(skip)]
        version: Version,
        text: String,
    }

    crate::impl_aggregate!(Note, String, "note");

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn staged_changes_are_invisible_to_other_scopes_until_commit() {
        let db = InMemoryDatabase::new();
        let uow = db.begin();
        let repo = uow.repository::<Note>();
        repo.add(note("n-1", "hello")).await.unwrap();

        // 本作用域可见
        assert_eq!(repo.get(&"n-1".to_string()).await.unwrap().unwrap().text, "hello");
        // 其他作用域不可见
        let other = db.begin().repository::<Note>();
        assert!(other.get(&"n-1".to_string()).await.unwrap().is_none());
        assert_eq!(db.row_count::<Note>(), 0);

        uow.commit().await.unwrap();
        let loaded = other.get(&"n-1".to_string()).await.unwrap().unwrap();
        assert_eq!(loaded.version().value(), 1);
        assert_eq!(db.commit_count(), 1);
    }

    #[tokio::test]
    async fn dropped_unit_of_work_discards_changes() {
        let db = InMemoryDatabase::new();
        {
            let uow = db.begin();
            uow.repository::<Note>().add(note("n-1", "x")).await.unwrap();
            assert_eq!(uow.pending_changes(), 1);
        }
        assert_eq!(db.row_count::<Note>(), 0);
        assert_eq!(db.commit_count(), 0);
    }

    #[tokio::test]
    async fn commit_is_all_or_nothing() {
        let db = InMemoryDatabase::new();
        db.seed(&note("n-1", "existing")).unwrap();

        let uow = db.begin();
        let repo = uow.repository::<Note>();
        repo.add(note("n-2", "fresh")).await.unwrap();
        // 重复主键，提交必须整体失败
        repo.add(note("n-1", "duplicate")).await.unwrap();

        let err = uow.commit().await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists { .. }));
        assert_eq!(db.row_count::<Note>(), 1);
        assert_eq!(db.commit_count(), 0);
    }

    #[tokio::test]
    async fn stale_update_is_a_version_conflict() {
        let db = InMemoryDatabase::new();
        db.seed(&note("n-1", "v1")).unwrap();

        let first = db.begin();
        let second = db.begin();
        let mut a = first.repository::<Note>().get(&"n-1".into()).await.unwrap().unwrap();
        let mut b = second.repository::<Note>().get(&"n-1".into()).await.unwrap().unwrap();

        a.text = "from first".into();
        first.repository::<Note>().update(a).await.unwrap();
        first.commit().await.unwrap();

        b.text = "from second".into();
        second.repository::<Note>().update(b).await.unwrap();
        let err = second.commit().await.unwrap_err();
        assert!(matches!(err, DomainError::VersionConflict { expected: 1, actual: 2, .. }));

        let current = db.begin().repository::<Note>().get(&"n-1".into()).await.unwrap().unwrap();
        assert_eq!(current.text, "from first");
    }

    #[tokio::test]
    async fn repeated_updates_in_one_scope_commit_once() {
        let db = InMemoryDatabase::new();
        db.seed(&note("n-1", "v1")).unwrap();

        let uow = db.begin();
        let repo = uow.repository::<Note>();
        for text in ["a", "b", "c"] {
            let mut n = repo.get(&"n-1".into()).await.unwrap().unwrap();
            n.text = text.into();
            repo.update(n).await.unwrap();
        }
        uow.commit().await.unwrap();

        let n = db.begin().repository::<Note>().get(&"n-1".into()).await.unwrap().unwrap();
        assert_eq!(n.text, "c");
        assert_eq!(n.version().value(), 2);
    }

    #[tokio::test]
    async fn remove_of_a_row_changed_by_another_scope_is_a_version_conflict() {
        let db = InMemoryDatabase::new();
        db.seed(&note("n-1", "v1")).unwrap();

        let remover = db.begin();
        remover.repository::<Note>().remove(&"n-1".into()).await.unwrap();

        let editor = db.begin();
        let mut n = editor.repository::<Note>().get(&"n-1".into()).await.unwrap().unwrap();
        n.text = "v2".into();
        editor.repository::<Note>().update(n).await.unwrap();
        editor.commit().await.unwrap();

        assert!(matches!(
            remover.commit().await.unwrap_err(),
            DomainError::VersionConflict { expected: 1, actual: 2, .. }
        ));
        assert_eq!(db.row_count::<Note>(), 1);

        // 同一作用域内先插入再删除不做版本比较
        let uow = db.begin();
        let repo = uow.repository::<Note>();
        repo.add(note("n-2", "tmp")).await.unwrap();
        repo.remove(&"n-2".into()).await.unwrap();
        uow.commit().await.unwrap();
        assert_eq!(db.row_count::<Note>(), 1);
    }

    #[tokio::test]
    async fn second_commit_is_rejected() {
        let db = InMemoryDatabase::new();
        let uow = db.begin();
        uow.commit().await.unwrap();
        assert!(matches!(
            uow.commit().await.unwrap_err(),
            DomainError::InvalidState { .. }
        ));
        assert!(uow.repository::<Note>().add(note("n", "late")).await.is_err());
    }

    #[tokio::test]
    async fn find_applies_specification_over_merged_view() {
        let db = InMemoryDatabase::new();
        db.seed(&note("n-1", "keep")).unwrap();
        db.seed(&note("n-2", "drop")).unwrap();

        let uow = db.begin();
        let repo = uow.repository::<Note>();
        repo.remove(&"n-2".into()).await.unwrap();
        repo.add(note("n-3", "keep too")).await.unwrap();

        let spec = CompositeSpecification::from_fn(|n: &Note| n.text.starts_with("keep"));
        let found = repo.find(&spec).await.unwrap();
        let ids: Vec<_> = found.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n-1", "n-3"]);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
