//! 聚合（Aggregate）抽象
//!
//! 聚合是仓储读写与工作单元提交的最小一致性边界：
//! - 通过 `Entity` 约束聚合具备标识与版本；
//! - 通过 serde 约束聚合可被存储以载荷形式保存与还原；
//! - `TYPE` 为稳定的聚合类型名，用于存储分表、日志与通知来源。
//!
use crate::entity::Entity;
use serde::{Serialize, de::DeserializeOwned};

/// 聚合根接口
pub trait Aggregate: Entity + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const TYPE: &'static str;
}

/// 为带有 `id` 与 `version` 字段的结构体实现 [`Entity`] 与 [`Aggregate`]
///
/// ```rust
/// use rcm_domain::value_object::Version;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Oficina {
///     id: String,
///     version: Version,
/// }
///
/// rcm_domain::impl_aggregate!(Oficina, String, "Oficina");
/// ```
#[macro_export]
macro_rules! impl_aggregate {
    ($ty:ty, $id:ty, $name:literal) => {
        impl $crate::entity::Entity for $ty {
            type Id = $id;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> $crate::value_object::Version {
                self.version
            }

            fn set_version(&mut self, version: $crate::value_object::Version) {
                self.version = version;
            }
        }

        impl $crate::aggregate::Aggregate for $ty {
            const TYPE: &'static str = $name;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Aggregate;
    use crate::entity::Entity;
    use crate::value_object::Version;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Counter {
        id: String,
        version: Version,
        value: i32,
    }

    crate::impl_aggregate!(Counter, String, "counter");

    #[test]
    fn aggregate_exposes_identity_and_store_managed_version() {
        let mut c = Counter {
            id: "c-1".into(),
            ..Default::default()
        };
        assert_eq!(c.id(), "c-1");
        assert!(c.version().is_new());

        c.set_version(c.version().next());
        assert_eq!(c.version().value(), 1);
        assert_eq!(Counter::TYPE, "counter");

        // 载荷序列化后可还原（存储以 JSON 保存聚合）
        let json = serde_json::to_value(&c).unwrap();
        let back: Counter = serde_json::from_value(json).unwrap();
        assert_eq!(back.value, c.value);
        assert_eq!(back.id(), c.id());
    }
}
