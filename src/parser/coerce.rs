//! 类型转换函数
//!
//! 将规则匹配得到的原始字符串转换为字段声明类型的值。
//! 所有函数在失败时返回 [`ParseError::FieldCoercion`]，只影响当前字段。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::ParseError;
use crate::parser::constants::{ISO_FORMAT, SHORT_DATE_FORMAT, SHORT_TIME_FORMAT};
use crate::record_types::Value;
use crate::rules::{FieldKind, Rule};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// 按规则类型转换原始值
///
/// # 示例
///
/// ```
/// use poke::parser::coerce::coerce;
/// use poke::rules::{FieldKind, Rule};
/// use poke::Value;
///
/// let rule = Rule::new("Rows_sent", FieldKind::Int);
/// assert_eq!(coerce(&rule, "5").unwrap(), Value::Int(5));
/// ```
pub fn coerce(rule: &Rule, raw: &str) -> Result<Value, ParseError> {
    let result = match rule.kind {
        FieldKind::String => Ok(Value::Str(raw.to_string())),
        FieldKind::Int => parse_int(raw).map(Value::Int),
        FieldKind::Bool => parse_yes_no(raw).map(Value::Bool),
        FieldKind::Duration => parse_seconds(raw).map(Value::Duration),
        FieldKind::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
    };

    result.map_err(|reason| ParseError::FieldCoercion {
        field: rule.name.clone(),
        raw: raw.to_string(),
        reason,
    })
}

/// 解析十进制整数
pub fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>().map_err(|e| e.to_string())
}

/// 解析 `Yes` / `No`
pub fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw {
        "Yes" => Ok(true),
        "No" => Ok(false),
        _ => Err("invalid syntax: expected Yes or No".to_string()),
    }
}

/// 解析以秒为单位的小数时长，如 `1.500000`
///
/// 至少包含一位数字，最多一个小数点；超过纳秒精度的部分被截断。
pub fn parse_seconds(raw: &str) -> Result<TimeDelta, String> {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (raw, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err("invalid duration: no digits".to_string());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(format!("invalid duration: {}", raw));
    }

    let secs: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| format!("invalid duration: {} overflows", raw))?
    };

    let mut nanos: i64 = 0;
    let mut scale = NANOS_PER_SEC;
    for digit in fraction.bytes().take(9) {
        scale /= 10;
        nanos += i64::from(digit - b'0') * scale;
    }

    TimeDelta::try_seconds(secs)
        .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(|| format!("invalid duration: {} overflows", raw))
}

/// 解析慢日志中的时间戳
///
/// 支持两种格式：
/// - 旧格式 `YYMMDD H:MM:SS[.ffffff]`（小时可能以空格补齐）
/// - MySQL 5.7+ 的 `YYYY-MM-DDTHH:MM:SS[.ffffff][Z]`
///
/// 不做时区换算，保留日志中的字面值。
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty timestamp".to_string());
    }

    if trimmed.contains('T') {
        let iso = trimmed.strip_suffix('Z').unwrap_or(trimmed);
        return NaiveDateTime::parse_from_str(iso, ISO_FORMAT).map_err(|e| e.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let (date, time) = match (parts.next(), parts.next(), parts.next()) {
        (Some(date), Some(time), None) => (date, time),
        _ => return Err(format!("invalid timestamp: {}", trimmed)),
    };

    let date = NaiveDate::parse_from_str(date, SHORT_DATE_FORMAT).map_err(|e| e.to_string())?;
    let time = NaiveTime::parse_from_str(time, SHORT_TIME_FORMAT).map_err(|e| e.to_string())?;
    Ok(date.and_time(time))
}
