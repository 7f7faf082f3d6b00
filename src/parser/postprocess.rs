//! 记录后处理
//!
//! - [`finalize`]：计算派生字段（`time_start`、`query_length`），并执行准入检查
//! - [`normalize`]：把时间戳和时长转换为可直接输出的展示形式

use crate::parser::constants::{QUERY_LENGTH_KEY, QUERY_TIME_KEY, TIME_KEY, TIME_START_KEY};
use crate::record_types::{NormalizedRecord, NormalizedValue, Record, Value};
use crate::tools::{duration_seconds, format_timestamp};

/// 计算派生字段，并决定记录是否保留
///
/// 只有 `time` 字段成功解析为时间戳的记录才会保留，否则返回 `None`。
pub fn finalize(mut record: Record) -> Option<Record> {
    let Some(time) = record.timestamp(TIME_KEY) else {
        log::debug!("dropping record without a parseable time ({} fields)", record.len());
        return None;
    };

    if let Some(query_time) = record.duration(QUERY_TIME_KEY) {
        match time.checked_sub_signed(query_time) {
            Some(start) => record.insert(TIME_START_KEY, Value::Timestamp(start)),
            None => log::debug!("time_start out of range for time {}", time),
        }
    }

    if let Some(length) = record.query().map(|query| query.chars().count()) {
        record.insert(QUERY_LENGTH_KEY, Value::Int(length as i64));
    }

    Some(record)
}

/// 转换为展示形式
pub fn normalize(record: Record) -> NormalizedRecord {
    record
        .into_fields()
        .into_iter()
        .map(|(key, value)| (key, normalize_value(value)))
        .collect()
}

/// 转换单个值：时间戳 -> 固定精度字符串，时长 -> 秒数，其余原样保留
pub fn normalize_value(value: Value) -> NormalizedValue {
    match value {
        Value::Str(s) => NormalizedValue::Str(s),
        Value::Int(v) => NormalizedValue::Int(v),
        Value::Bool(v) => NormalizedValue::Bool(v),
        Value::Duration(exact) => NormalizedValue::Seconds {
            seconds: duration_seconds(&exact),
            exact,
        },
        Value::Timestamp(exact) => NormalizedValue::Formatted {
            text: format_timestamp(&exact),
            exact,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn record_without_time_is_dropped() {
        let mut record = Record::new();
        record.insert("rows_sent", Value::Int(5));
        record.append_query("SELECT 1;", "\n");
        assert!(finalize(record).is_none());
    }

    #[test]
    fn time_with_wrong_kind_is_dropped() {
        let mut record = Record::new();
        record.insert("time", Value::Str("230101".to_string()));
        assert!(finalize(record).is_none());
    }

    #[test]
    fn time_start_is_time_minus_query_time() {
        let mut record = Record::new();
        record.insert("time", Value::Timestamp(at(10, 0, 0)));
        record.insert("query_time", Value::Duration(TimeDelta::milliseconds(2500)));
        let record = finalize(record).unwrap();

        let expected = at(9, 59, 57) + TimeDelta::milliseconds(500);
        assert_eq!(record.timestamp("time_start"), Some(expected));
    }

    #[test]
    fn no_time_start_without_query_time() {
        let mut record = Record::new();
        record.insert("time", Value::Timestamp(at(10, 0, 0)));
        let record = finalize(record).unwrap();
        assert!(!record.contains("time_start"));
        assert!(!record.contains("query_length"));
    }

    #[test]
    fn query_length_counts_characters() {
        let mut record = Record::new();
        record.insert("time", Value::Timestamp(at(10, 0, 0)));
        record.append_query("SELECT 'héllo';", "\n");
        let record = finalize(record).unwrap();
        assert_eq!(record.get("query_length"), Some(&Value::Int(15)));
    }

    #[test]
    fn normalize_converts_time_values_only() {
        let mut record = Record::new();
        record.insert("time", Value::Timestamp(at(10, 0, 0)));
        record.insert("query_time", Value::Duration(TimeDelta::milliseconds(1500)));
        record.insert("rows_sent", Value::Int(5));
        record.insert("qc_hit", Value::Bool(false));
        record.insert("schema", Value::Str("shop".to_string()));

        let normalized = normalize(record);
        assert_eq!(
            normalized.get("time").and_then(NormalizedValue::as_str),
            Some("2023-01-01 10:00:00.00000000")
        );
        assert_eq!(
            normalized.get("query_time").and_then(NormalizedValue::as_seconds),
            Some(1.5)
        );
        assert_eq!(normalized.get("rows_sent"), Some(&NormalizedValue::Int(5)));
        assert_eq!(normalized.get("qc_hit"), Some(&NormalizedValue::Bool(false)));
        assert_eq!(
            normalized.get("schema"),
            Some(&NormalizedValue::Str("shop".to_string()))
        );
    }

    #[test]
    fn formatted_timestamp_round_trips() {
        let exact = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_nano_opt(23, 59, 58, 123_456_780)
            .unwrap();
        let NormalizedValue::Formatted { text, .. } = normalize_value(Value::Timestamp(exact))
        else {
            panic!("expected formatted timestamp");
        };
        let reparsed = NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f").unwrap();
        assert_eq!(reparsed, exact);
    }
}
