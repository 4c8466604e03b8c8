//! 规约（Specification）
//!
//! 用于封装查询条件，使其可复用、可组合和可测试，且与具体存储查询语言解耦。
//!
//! - 叶子规约在构造时固定比较参数；参数缺省（`None`）时恒为真，
//!   以便组合时无需在调用处对“不过滤”做特殊处理；
//! - `and`/`or`/`not` 返回新的组合规约，操作数不被修改，子节点经 `Arc` 共享；
//! - 组合规约是标签化的树（`Always | Leaf | And | Or | Not`），由递归解释器求值，
//!   求值无副作用，同一实例可跨线程反复使用。
//!
use std::sync::Arc;

/// 规约模式的核心 trait
pub trait Specification<T>: Send + Sync {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> CompositeSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        CompositeSpecification::And(
            Arc::new(self.into_composite()),
            Arc::new(other.into_composite()),
        )
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> CompositeSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        CompositeSpecification::Or(
            Arc::new(self.into_composite()),
            Arc::new(other.into_composite()),
        )
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> CompositeSpecification<T>
    where
        Self: Sized + 'static,
    {
        CompositeSpecification::Not(Arc::new(self.into_composite()))
    }

    /// 转为组合规约树的节点（叶子规约包装为 `Leaf`）
    fn into_composite(self) -> CompositeSpecification<T>
    where
        Self: Sized + 'static,
    {
        CompositeSpecification::Leaf(Arc::new(self))
    }
}

impl<T> Specification<T> for Arc<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// 以闭包表达的叶子规约
pub struct FnSpecification<F>(F);

impl<F> FnSpecification<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> Specification<T> for FnSpecification<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.0)(candidate)
    }
}

/// 组合规约树
///
/// 节点一经构建即不可变；`Clone` 仅复制 `Arc` 引用。
pub enum CompositeSpecification<T> {
    /// 恒为真（不过滤）
    Always,
    Leaf(Arc<dyn Specification<T>>),
    And(Arc<CompositeSpecification<T>>, Arc<CompositeSpecification<T>>),
    Or(Arc<CompositeSpecification<T>>, Arc<CompositeSpecification<T>>),
    Not(Arc<CompositeSpecification<T>>),
}

impl<T> Clone for CompositeSpecification<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Always => Self::Always,
            Self::Leaf(leaf) => Self::Leaf(Arc::clone(leaf)),
            Self::And(l, r) => Self::And(Arc::clone(l), Arc::clone(r)),
            Self::Or(l, r) => Self::Or(Arc::clone(l), Arc::clone(r)),
            Self::Not(inner) => Self::Not(Arc::clone(inner)),
        }
    }
}

impl<T> std::fmt::Debug for CompositeSpecification<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Leaf(_) => f.write_str("Leaf"),
            Self::And(l, r) => f.debug_tuple("And").field(l).field(r).finish(),
            Self::Or(l, r) => f.debug_tuple("Or").field(l).field(r).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

impl<T> Default for CompositeSpecification<T> {
    fn default() -> Self {
        Self::Always
    }
}

impl<T> CompositeSpecification<T> {
    /// 恒为真的规约
    pub fn always() -> Self {
        Self::Always
    }

    /// 恒为假的规约（`NOT Always`）
    pub fn never() -> Self {
        Self::Not(Arc::new(Self::Always))
    }

    pub fn leaf<S>(spec: S) -> Self
    where
        S: Specification<T> + 'static,
    {
        spec.into_composite()
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
        T: 'static,
    {
        Self::Leaf(Arc::new(FnSpecification::new(f)))
    }

    /// 以 AND 组合任意数量的规约；零个规约得到恒为真
    pub fn all_of<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        specs
            .into_iter()
            .reduce(|acc, next| Self::And(Arc::new(acc), Arc::new(next)))
            .unwrap_or(Self::Always)
    }

    /// 以 OR 组合任意数量的规约；零个规约同样得到恒为真（不施加过滤）
    pub fn any_of<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        specs
            .into_iter()
            .reduce(|acc, next| Self::Or(Arc::new(acc), Arc::new(next)))
            .unwrap_or(Self::Always)
    }

    /// 递归求值
    pub fn evaluate(&self, candidate: &T) -> bool {
        match self {
            Self::Always => true,
            Self::Leaf(leaf) => leaf.is_satisfied_by(candidate),
            Self::And(l, r) => l.evaluate(candidate) && r.evaluate(candidate),
            Self::Or(l, r) => l.evaluate(candidate) || r.evaluate(candidate),
            Self::Not(inner) => !inner.evaluate(candidate),
        }
    }

    /// 转为可供仓储对集合求值的谓词
    pub fn to_predicate(&self) -> impl Fn(&T) -> bool + '_ {
        move |candidate| self.evaluate(candidate)
    }
}

impl<T> Specification<T> for CompositeSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.evaluate(candidate)
    }

    fn into_composite(self) -> CompositeSpecification<T>
    where
        Self: Sized + 'static,
    {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTrueSpec;
    impl Specification<i32> for AlwaysTrueSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            true
        }
    }

    struct AlwaysFalseSpec;
    impl Specification<i32> for AlwaysFalseSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            false
        }
    }

    fn greater_than_ten() -> CompositeSpecification<i32> {
        CompositeSpecification::from_fn(|x: &i32| *x > 10)
    }

    fn even() -> CompositeSpecification<i32> {
        CompositeSpecification::from_fn(|x: &i32| x % 2 == 0)
    }

    fn samples() -> impl Iterator<Item = i32> {
        -20..=20
    }

    #[test]
    fn test_and_specification() {
        assert!(AlwaysTrueSpec.and(AlwaysTrueSpec).is_satisfied_by(&42));
        assert!(!AlwaysTrueSpec.and(AlwaysFalseSpec).is_satisfied_by(&42));
        assert!(!AlwaysFalseSpec.and(AlwaysFalseSpec).is_satisfied_by(&42));
    }

    #[test]
    fn test_or_specification() {
        assert!(AlwaysTrueSpec.or(AlwaysTrueSpec).is_satisfied_by(&42));
        assert!(AlwaysTrueSpec.or(AlwaysFalseSpec).is_satisfied_by(&42));
        assert!(!AlwaysFalseSpec.or(AlwaysFalseSpec).is_satisfied_by(&42));
    }

    #[test]
    fn test_not_specification() {
        assert!(!AlwaysTrueSpec.not().is_satisfied_by(&42));
        assert!(AlwaysFalseSpec.not().is_satisfied_by(&42));
    }

    #[test]
    fn test_complex_combination() {
        // (TRUE AND FALSE) OR (NOT FALSE) = FALSE OR TRUE = TRUE
        let spec = AlwaysTrueSpec
            .and(AlwaysFalseSpec)
            .or(AlwaysFalseSpec.not());
        assert!(spec.is_satisfied_by(&42));
    }

    #[test]
    fn identity_laws_hold() {
        let a = greater_than_ten();
        let a_and_true = a.clone().and(CompositeSpecification::always());
        let a_or_false = a.clone().or(CompositeSpecification::never());
        let not_not_a = a.clone().not().not();

        for x in samples() {
            assert_eq!(a_and_true.evaluate(&x), a.evaluate(&x), "x={x}");
            assert_eq!(a_or_false.evaluate(&x), a.evaluate(&x), "x={x}");
            assert_eq!(not_not_a.evaluate(&x), a.evaluate(&x), "x={x}");
        }
    }

    #[test]
    fn combinators_match_boolean_operators_and_de_morgan() {
        let a = greater_than_ten();
        let b = even();
        let and = a.clone().and(b.clone());
        let or = a.clone().or(b.clone());
        let not_and = a.clone().and(b.clone()).not();
        let or_of_nots = a.clone().not().or(b.clone().not());
        let not_or = a.clone().or(b.clone()).not();
        let and_of_nots = a.clone().not().and(b.clone().not());

        for x in samples() {
            let (pa, pb) = (a.evaluate(&x), b.evaluate(&x));
            assert_eq!(and.to_predicate()(&x), pa && pb);
            assert_eq!(or.to_predicate()(&x), pa || pb);
            assert_eq!(not_and.evaluate(&x), or_of_nots.evaluate(&x));
            assert_eq!(not_or.evaluate(&x), and_of_nots.evaluate(&x));
        }
    }

    #[test]
    fn combining_zero_specifications_is_always_true() {
        let all = CompositeSpecification::<i32>::all_of(Vec::new());
        let any = CompositeSpecification::<i32>::any_of(Vec::new());
        assert!(samples().all(|x| all.evaluate(&x) && any.evaluate(&x)));

        let single = CompositeSpecification::all_of(vec![even()]);
        assert!(single.evaluate(&4));
        assert!(!single.evaluate(&5));
    }

    #[test]
    fn operands_are_shared_and_reusable_across_threads() {
        let a = Arc::new(greater_than_ten().and(even()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let spec = Arc::clone(&a);
                std::thread::spawn(move || (0..50).filter(|x| spec.evaluate(x)).count())
            })
            .collect();
        for h in handles {
            // 12, 14, ..., 48
            assert_eq!(h.join().unwrap(), 19);
        }
    }
}
