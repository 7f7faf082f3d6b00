//! 多键排序
//!
//! 每个排序键对应一次完整的稳定排序，按给定顺序依次执行：
//! 后执行的键优先级更高，之前各轮的顺序只在其相等时保留。
//! 因此"先按 A、再按 B"排序时，应当先传入 B，最后传入 A。
//!
//! 比较规则：
//! - 缺少该字段的记录总是排在有值的记录之后（升序、降序都一样）；
//! - 两个值都存在时按自然顺序比较，降序时反转；
//! - 时间戳和时长按其精确值比较，而不是按展示字符串或浮点秒数。

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ParseError;
use crate::record_types::{NormalizedRecord, NormalizedValue};

/// 默认排序规则
pub const DEFAULT_SORT: &str = "time_start:asc";

/// 一个排序键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// 记录中的字段名（小写）
    pub field: String,
    /// 是否降序
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// 解析 `key1:dir1,key2:dir2,...` 形式的排序规则
    ///
    /// 方向不区分大小写，只接受 `asc` / `desc`。
    ///
    /// # 示例
    ///
    /// ```
    /// use poke::SortKey;
    ///
    /// let keys = SortKey::parse_list("rows_read:desc,rows_sent:ASC").unwrap();
    /// assert_eq!(keys, vec![SortKey::desc("rows_read"), SortKey::asc("rows_sent")]);
    /// ```
    pub fn parse_list(spec: &str) -> Result<Vec<SortKey>, ParseError> {
        spec.split(',').map(str::parse::<SortKey>).collect()
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidSortSpec(s.to_string());

        let mut parts = s.trim().split(':');
        let (field, direction) = match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(direction), None) => (field.trim(), direction.trim()),
            _ => return Err(invalid()),
        };

        if field.is_empty() {
            return Err(invalid());
        }

        match direction.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortKey::asc(field)),
            "desc" => Ok(SortKey::desc(field)),
            _ => Err(invalid()),
        }
    }
}

/// 比较同一字段在两条记录中的值
///
/// 返回 `None` 表示两个值类型不同，无法比较。
pub fn compare(
    a: Option<&NormalizedValue>,
    b: Option<&NormalizedValue>,
    descending: bool,
) -> Option<Ordering> {
    match (a, b) {
        (None, None) => Some(Ordering::Equal),
        // 缺值总是排在最后，与方向无关
        (None, Some(_)) => Some(Ordering::Greater),
        (Some(_), None) => Some(Ordering::Less),
        (Some(a), Some(b)) => {
            let ordering = a.natural_cmp(b)?;
            Some(if descending {
                ordering.reverse()
            } else {
                ordering
            })
        }
    }
}

/// 检查某字段在所有记录中的值类型是否一致
fn check_uniform_kind(records: &[NormalizedRecord], field: &str) -> Result<(), ParseError> {
    let mut values = records.iter().filter_map(|record| record.get(field));
    let Some(first) = values.next() else {
        return Ok(());
    };

    match values.find(|value| value.kind_name() != first.kind_name()) {
        Some(other) => Err(ParseError::KindMismatch {
            field: field.to_string(),
            left: first.kind_name(),
            right: other.kind_name(),
        }),
        None => Ok(()),
    }
}

/// 按单个键执行一次稳定排序
pub fn sort_pass(records: &mut [NormalizedRecord], key: &SortKey) -> Result<(), ParseError> {
    check_uniform_kind(records, &key.field)?;

    records.sort_by(|a, b| {
        compare(a.get(&key.field), b.get(&key.field), key.descending)
            // 类型已经检查过，不会出现无法比较的情况
            .unwrap_or(Ordering::Equal)
    });
    Ok(())
}

/// 依次按每个键执行稳定排序，最后一个键优先级最高
///
/// # 错误
///
/// 某个字段在不同记录中类型不一致时返回 [`ParseError::KindMismatch`]，
/// 此时该轮排序不会执行。
pub fn sort_records(records: &mut [NormalizedRecord], keys: &[SortKey]) -> Result<(), ParseError> {
    for key in keys {
        log::debug!(
            "sorting {} records by {} {}",
            records.len(),
            key.field,
            if key.descending { "desc" } else { "asc" }
        );
        sort_pass(records, key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, NormalizedValue)]) -> NormalizedRecord {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn ints(records: &[NormalizedRecord], field: &str) -> Vec<Option<i64>> {
        records
            .iter()
            .map(|r| r.get(field).and_then(NormalizedValue::as_i64))
            .collect()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn single_key() {
            assert_eq!(
                SortKey::parse_list(DEFAULT_SORT).unwrap(),
                vec![SortKey::asc("time_start")]
            );
        }

        #[test]
        fn direction_is_case_insensitive() {
            assert_eq!("a:DESC".parse::<SortKey>().unwrap(), SortKey::desc("a"));
            assert_eq!("a:Asc".parse::<SortKey>().unwrap(), SortKey::asc("a"));
        }

        #[test]
        fn whitespace_around_items() {
            assert_eq!(
                SortKey::parse_list(" rows_sent : desc , time:asc").unwrap(),
                vec![SortKey::desc("rows_sent"), SortKey::asc("time")]
            );
        }

        #[test]
        fn invalid_specs() {
            let cases = ["", "rows_sent", "rows_sent:up", "a:asc,", ":asc", "a:b:c", "a:asc,,b:desc"];
            for spec in &cases {
                assert!(
                    matches!(SortKey::parse_list(spec), Err(ParseError::InvalidSortSpec(_))),
                    "Should fail for: {:?}",
                    spec
                );
            }
        }
    }

    mod compare_tests {
        use super::*;

        #[test]
        fn both_absent_is_equal() {
            assert_eq!(compare(None, None, false), Some(Ordering::Equal));
            assert_eq!(compare(None, None, true), Some(Ordering::Equal));
        }

        #[test]
        fn absent_sorts_last_in_both_directions() {
            let v = NormalizedValue::Int(1);
            for descending in [false, true] {
                assert_eq!(compare(None, Some(&v), descending), Some(Ordering::Greater));
                assert_eq!(compare(Some(&v), None, descending), Some(Ordering::Less));
            }
        }

        #[test]
        fn bool_false_before_true() {
            let f = NormalizedValue::Bool(false);
            let t = NormalizedValue::Bool(true);
            assert_eq!(compare(Some(&f), Some(&t), false), Some(Ordering::Less));
            assert_eq!(compare(Some(&f), Some(&t), true), Some(Ordering::Greater));
            assert_eq!(compare(Some(&t), Some(&t), true), Some(Ordering::Equal));
        }

        #[test]
        fn strings_respect_direction() {
            let a = NormalizedValue::Str("alpha".to_string());
            let b = NormalizedValue::Str("beta".to_string());
            assert_eq!(compare(Some(&a), Some(&b), false), Some(Ordering::Less));
            assert_eq!(compare(Some(&a), Some(&b), true), Some(Ordering::Greater));
        }

        #[test]
        fn durations_compare_exactly() {
            use chrono::TimeDelta;
            let short = NormalizedValue::Seconds {
                seconds: 0.1,
                exact: TimeDelta::nanoseconds(100_000_001),
            };
            let long = NormalizedValue::Seconds {
                seconds: 0.1,
                exact: TimeDelta::nanoseconds(100_000_002),
            };
            assert_eq!(compare(Some(&short), Some(&long), false), Some(Ordering::Less));
            assert_eq!(compare(Some(&short), Some(&long), true), Some(Ordering::Greater));
        }

        #[test]
        fn mixed_kinds_are_incomparable() {
            let s = NormalizedValue::Str("x".to_string());
            let b = NormalizedValue::Bool(true);
            assert_eq!(compare(Some(&s), Some(&b), false), None);
        }
    }

    #[test]
    fn single_pass_desc_with_missing_values() {
        let mut records = vec![
            record(&[("rows_sent", NormalizedValue::Int(1))]),
            record(&[]),
            record(&[("rows_sent", NormalizedValue::Int(9))]),
            record(&[("rows_sent", NormalizedValue::Int(4))]),
        ];
        sort_records(&mut records, &[SortKey::desc("rows_sent")]).unwrap();
        assert_eq!(ints(&records, "rows_sent"), vec![Some(9), Some(4), Some(1), None]);

        sort_records(&mut records, &[SortKey::asc("rows_sent")]).unwrap();
        assert_eq!(ints(&records, "rows_sent"), vec![Some(1), Some(4), Some(9), None]);
    }

    #[test]
    fn last_key_dominates() {
        let mut records = vec![
            record(&[("a", NormalizedValue::Int(1)), ("b", NormalizedValue::Int(2))]),
            record(&[("a", NormalizedValue::Int(2)), ("b", NormalizedValue::Int(1))]),
            record(&[("a", NormalizedValue::Int(1)), ("b", NormalizedValue::Int(1))]),
            record(&[("a", NormalizedValue::Int(2)), ("b", NormalizedValue::Int(2))]),
        ];
        sort_records(&mut records, &[SortKey::asc("b"), SortKey::desc("a")]).unwrap();
        assert_eq!(ints(&records, "a"), vec![Some(2), Some(2), Some(1), Some(1)]);
        assert_eq!(ints(&records, "b"), vec![Some(1), Some(2), Some(1), Some(2)]);
    }

    #[test]
    fn mixed_kinds_fail_fast() {
        let original = vec![
            record(&[("x", NormalizedValue::Int(2))]),
            record(&[("x", NormalizedValue::Str("1".to_string()))]),
        ];
        let mut records = original.clone();
        let err = sort_records(&mut records, &[SortKey::asc("x")]).unwrap_err();
        assert_eq!(
            err,
            ParseError::KindMismatch {
                field: "x".to_string(),
                left: "int",
                right: "string",
            }
        );
        assert_eq!(records, original);
    }

    #[test]
    fn unknown_field_keeps_order() {
        let original = vec![
            record(&[("x", NormalizedValue::Int(2))]),
            record(&[("x", NormalizedValue::Int(1))]),
        ];
        let mut records = original.clone();
        sort_records(&mut records, &[SortKey::desc("missing")]).unwrap();
        assert_eq!(records, original);
    }
}
