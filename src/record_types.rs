//! Record 数据结构模块
//!
//! 定义了慢日志记录在各阶段的表示：
//! 1. **Record** - 组装阶段的记录，值为带类型的 [`Value`]
//! 2. **NormalizedRecord** - 规范化之后的记录，时间戳与时长已转换为展示形式

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};

/// 记录中的字段值
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Duration(TimeDelta),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// 值类型名称（用于错误信息）
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Duration(_) => "duration",
            Value::Timestamp(_) => "timestamp",
        }
    }
}

/// 组装中的记录：小写字段名 -> 值
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入字段，已存在的同名字段会被覆盖
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// 追加一行 SQL 正文到 `query` 字段
    pub fn append_query(&mut self, line: &str, separator: &str) {
        match self.fields.get_mut(QUERY_KEY) {
            Some(Value::Str(query)) => {
                query.push_str(separator);
                query.push_str(line);
            }
            _ => {
                self.fields
                    .insert(QUERY_KEY.to_string(), Value::Str(line.to_string()));
            }
        }
    }

    /// 获取 `query` 正文
    pub fn query(&self) -> Option<&str> {
        match self.fields.get(QUERY_KEY) {
            Some(Value::Str(query)) => Some(query),
            _ => None,
        }
    }

    pub fn timestamp(&self, key: &str) -> Option<NaiveDateTime> {
        match self.fields.get(key) {
            Some(Value::Timestamp(ts)) => Some(*ts),
            _ => None,
        }
    }

    pub fn duration(&self, key: &str) -> Option<TimeDelta> {
        match self.fields.get(key) {
            Some(Value::Duration(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub(crate) fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }
}

/// 正文字段名
pub const QUERY_KEY: &str = "query";

/// 规范化之后的字段值
///
/// 时间戳和时长只以展示形式出现，但同时保留精确的原始值供排序使用。
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// 时长，展示为秒数
    Seconds { seconds: f64, exact: TimeDelta },
    /// 时间戳，展示为固定精度字符串
    Formatted { text: String, exact: NaiveDateTime },
}

impl NormalizedValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NormalizedValue::Str(_) => "string",
            NormalizedValue::Int(_) => "int",
            NormalizedValue::Bool(_) => "bool",
            NormalizedValue::Seconds { .. } => "duration",
            NormalizedValue::Formatted { .. } => "timestamp",
        }
    }

    /// 同类型值之间的自然顺序（升序），类型不同时返回 `None`
    pub fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        use NormalizedValue::*;
        match (self, other) {
            (Str(a), Str(b)) => Some(a.cmp(b)),
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Seconds { exact: a, .. }, Seconds { exact: b, .. }) => Some(a.cmp(b)),
            (Formatted { exact: a, .. }, Formatted { exact: b, .. }) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NormalizedValue::Str(s) => Some(s),
            NormalizedValue::Formatted { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NormalizedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NormalizedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            NormalizedValue::Seconds { seconds, .. } => Some(*seconds),
            _ => None,
        }
    }
}

/// 规范化之后的记录，可直接序列化为 JSON 对象
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, NormalizedValue>,
}

impl NormalizedRecord {
    pub fn get(&self, key: &str) -> Option<&NormalizedValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NormalizedValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, NormalizedValue)> for NormalizedRecord {
    fn from_iter<T: IntoIterator<Item = (String, NormalizedValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{NormalizedRecord, NormalizedValue};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    impl Serialize for NormalizedValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                NormalizedValue::Str(s) => serializer.serialize_str(s),
                NormalizedValue::Int(v) => serializer.serialize_i64(*v),
                NormalizedValue::Bool(v) => serializer.serialize_bool(*v),
                NormalizedValue::Seconds { seconds, .. } => serializer.serialize_f64(*seconds),
                NormalizedValue::Formatted { text, .. } => serializer.serialize_str(text),
            }
        }
    }

    impl Serialize for NormalizedRecord {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.fields.len()))?;
            for (key, value) in &self.fields {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}
