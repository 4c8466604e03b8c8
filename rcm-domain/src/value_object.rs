//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 版本号（用于乐观锁和并发控制）
///
/// 由存储在每次成功提交后递增；`0` 表示尚未持久化。
///
/// # 示例
///
/// ```
/// use rcm_domain::value_object::Version;
///
/// let v1 = Version::new();
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(v2 > v1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(usize);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> usize {
        self.0
    }

    /// 检查是否为初始版本（尚未持久化）
    pub const fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Version {
    fn from(value: usize) -> Self {
        Self::from_value(value)
    }
}

/// 金额（以“分”为单位的整数，避免浮点误差）
///
/// 用户输入的解析见 [`parse_money`](crate::input::parse_money)。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// 以整数“元”创建金额（超出范围时饱和）
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn checked_add(self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    pub const fn checked_mul(self, rhs: u32) -> Option<Money> {
        match self.0.checked_mul(rhs as i64) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// 将金额平均拆分为 `parts` 份，余数（分）计入第一份。
    ///
    /// `parts == 0` 时返回空列表。
    pub fn split(&self, parts: u32) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }
        let parts_i = i64::from(parts);
        let base = self.0 / parts_i;
        let remainder = self.0 - base * parts_i;

        (0..parts)
            .map(|i| {
                if i == 0 {
                    Money(base + remainder)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

/// 运算符版本在溢出时饱和，不会 panic；需要感知溢出时使用 `checked_*`。
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Self::Output {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{},{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_next_and_ordering() {
        let v = Version::new().next().next();
        assert_eq!(v.value(), 2);
        assert!(v > Version::from_value(1));
        assert!(!v.is_new());
        assert_eq!(format!("{v}"), "v2");
    }

    #[test]
    fn test_version_serde_is_transparent() {
        let json = serde_json::to_string(&Version::from_value(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_money_arithmetic() {
        let unit = Money::from_cents(1_050);
        assert_eq!((unit * 3).cents(), 3_150);
        assert_eq!((unit + Money::from_units(1)).cents(), 1_150);

        let total: Money = vec![Money::from_units(1), Money::from_units(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_units(3));
    }

    #[test]
    fn test_money_overflow_is_detected_or_saturated() {
        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(big + big, Money::from_cents(i64::MAX));
        assert_eq!(big.checked_mul(3), None);
        assert_eq!(big * 3, Money::from_cents(i64::MAX));
        assert_eq!(
            Money::from_units(1).checked_add(Money::from_units(2)),
            Some(Money::from_units(3))
        );
        assert_eq!(Money::from_units(i64::MAX), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_money_split_keeps_total() {
        let parts = Money::from_cents(10_000).split(3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].cents(), 3_334);
        assert_eq!(parts[1].cents(), 3_333);
        assert_eq!(parts.iter().copied().sum::<Money>(), Money::from_cents(10_000));

        assert!(Money::from_units(1).split(0).is_empty());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(15_000).to_string(), "150,00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0,05");
    }
}
