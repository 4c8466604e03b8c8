//! 命令校验（Validation）
//!
//! 校验器只产出零或多条 [`DomainNotification`]，从不以错误中断控制流。
//! [`RuleSet`] 以声明顺序逐条求值，每条失败的规则都贡献一条通知，
//! 同级规则之间不短路。
//!
use crate::notification::DomainNotification;

/// 校验器：针对某一命令类型的规则集合
pub trait Validator<C>: Send + Sync {
    fn validate(&self, candidate: &C) -> ValidationResult;
}

/// 校验结果（按规则声明顺序排列的通知）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    notifications: Vec<DomainNotification>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn notifications(&self) -> &[DomainNotification] {
        &self.notifications
    }

    pub fn into_notifications(self) -> Vec<DomainNotification> {
        self.notifications
    }

    pub fn push(&mut self, notification: DomainNotification) {
        self.notifications.push(notification);
    }
}

impl From<Vec<DomainNotification>> for ValidationResult {
    fn from(notifications: Vec<DomainNotification>) -> Self {
        Self { notifications }
    }
}

type Check<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

struct Rule<C> {
    key: &'static str,
    message: &'static str,
    check: Check<C>,
}

/// 声明式规则集
///
/// ```
/// use rcm_domain::validation::{RuleSet, Validator};
///
/// struct Cmd { nome: String }
///
/// let rules = RuleSet::<Cmd>::new()
///     .with_origin("Cliente")
///     .rule("Nome", "O nome é obrigatório", |c| !c.nome.trim().is_empty());
///
/// let result = rules.validate(&Cmd { nome: "".into() });
/// assert_eq!(result.notifications()[0].key(), "Nome");
/// ```
pub struct RuleSet<C> {
    origin: Option<&'static str>,
    rules: Vec<Rule<C>>,
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self {
            origin: None,
            rules: Vec::new(),
        }
    }
}

impl<C> RuleSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 产出的通知标注的来源聚合
    pub fn with_origin(mut self, origin: &'static str) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 追加一条规则：`check` 返回 `false` 时产出 `(key, message)` 通知
    pub fn rule<F>(mut self, key: &'static str, message: &'static str, check: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            key,
            message,
            check: Box::new(check),
        });
        self
    }

    /// 合并另一组规则（保持各自声明顺序，来源以当前规则集为准）
    pub fn include(mut self, other: RuleSet<C>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Validator<C> for RuleSet<C> {
    fn validate(&self, candidate: &C) -> ValidationResult {
        let notifications = self
            .rules
            .iter()
            .filter(|rule| !(rule.check)(candidate))
            .map(|rule| {
                let n = DomainNotification::new(rule.key, rule.message);
                match self.origin {
                    Some(origin) => n.with_origin(origin),
                    None => n,
                }
            })
            .collect::<Vec<_>>();

        ValidationResult::from(notifications)
    }
}

/// 常用字段检查
pub mod checks {
    pub fn not_blank(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// 字符数（非字节数）不超过 `max`
    pub fn max_chars(value: &str, max: usize) -> bool {
        value.chars().count() <= max
    }

    /// 空白视为“未填写”，允许通过
    pub fn blank_or<F: Fn(&str) -> bool>(value: &str, f: F) -> bool {
        value.trim().is_empty() || f(value.trim())
    }

    pub fn is_email(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !value.chars().any(char::is_whitespace)
    }

    pub fn digits(value: &str) -> String {
        value.chars().filter(char::is_ascii_digit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::checks::*;
    use super::*;

    struct Cmd {
        nome: String,
        email: String,
    }

    fn rules() -> RuleSet<Cmd> {
        RuleSet::new()
            .with_origin("Cliente")
            .rule("Nome", "O nome é obrigatório", |c: &Cmd| not_blank(&c.nome))
            .rule("Nome", "O nome deve ter no máximo 10 caracteres", |c: &Cmd| {
                max_chars(&c.nome, 10)
            })
            .include(RuleSet::new().rule("Email", "E-mail inválido", |c: &Cmd| {
                blank_or(&c.email, is_email)
            }))
    }

    #[test]
    fn valid_candidate_yields_no_notifications() {
        let result = rules().validate(&Cmd {
            nome: "Ana".into(),
            email: "ana@rcm.com.br".into(),
        });
        assert!(result.is_valid());
    }

    #[test]
    fn all_failing_rules_are_reported_in_declaration_order() {
        let result = rules().validate(&Cmd {
            nome: "Nome muito comprido".into(),
            email: "sem-arroba".into(),
        });
        assert!(!result.is_valid());

        let keys: Vec<_> = result.notifications().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["Nome", "Email"]);
        assert!(result.notifications().iter().all(|n| n.origin() == Some("Cliente")));
    }

    #[test]
    fn email_check() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.com"));
        assert!(blank_or("  ", is_email));
        assert_eq!(digits("123.456.789-09"), "12345678909");
    }
}
