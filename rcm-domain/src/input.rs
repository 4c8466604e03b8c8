//! 用户输入解析
//!
//! 查询过滤参数在构建规约**之前**完成类型/格式解析：
//! 空白或格式错误的输入统一映射为 `None`（即“该字段不过滤”），
//! 规约求值过程中不会再出现解析失败。
//!
use crate::value_object::Money;
use chrono::NaiveDate;
use uuid::Uuid;

/// 可接受的日期格式（ISO 与 日/月/年）
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// 去除首尾空白，空字符串显式视为“未提供”
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// 解析金额：支持 `150`、`150.5`、`150,50`、`1.234,56`
pub fn parse_money(raw: Option<&str>) -> Option<Money> {
    let text = parse_text(raw)?;
    let parsed = money_from_str(&text);
    if parsed.is_none() {
        tracing::debug!(input = %text, "ignoring malformed money filter");
    }
    parsed
}

pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = parse_text(raw)?;
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok());
    if parsed.is_none() {
        tracing::debug!(input = %text, "ignoring malformed date filter");
    }
    parsed
}

pub fn parse_uuid(raw: Option<&str>) -> Option<Uuid> {
    let text = parse_text(raw)?;
    Uuid::parse_str(&text).ok()
}

fn money_from_str(text: &str) -> Option<Money> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (int_part, frac_part) = if let Some((int, frac)) = body.split_once(',') {
        // 逗号为小数点，点号为千分位
        (int.replace('.', ""), frac.to_owned())
    } else {
        match body.rsplit_once('.') {
            Some((int, frac)) if frac.len() <= 2 && !int.contains('.') => {
                (int.to_owned(), frac.to_owned())
            }
            Some(_) => (body.replace('.', ""), String::new()),
            None => (body.to_owned(), String::new()),
        }
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() || !all_digits(&int_part) || !all_digits(&frac_part) {
        return None;
    }
    if frac_part.len() > 2 {
        return None;
    }

    let units: i64 = int_part.parse().ok()?;
    let cents: i64 = format!("{frac_part:0<2}").parse().ok()?;
    let total = units.checked_mul(100)?.checked_add(cents)?;

    Some(Money::from_cents(if negative { -total } else { total }))
}
