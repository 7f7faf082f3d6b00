//! 字段规则表
//!
//! 规则表把慢日志注释行中的字段名（如 `Query_time`）映射到固定的值类型，
//! 并持有由这些规则编译出的 [`Matcher`]。
//!
//! 内置的 MySQL 规则表在首次使用时构建一次，之后只读；
//! 测试或特殊场景可以通过 [`RuleSet::from_kinds`] / [`RuleSet::from_pairs`]
//! 构造精简的规则集并注入到 [`ParserConfig`](crate::ParserConfig) 中。

use once_cell::sync::Lazy;

use crate::error::ParseError;
use crate::matcher::Matcher;

/// 字段的值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 原样保留的单词（`\w+`）
    String,
    /// 十进制整数
    Int,
    /// `Yes` / `No`
    Bool,
    /// 以秒为单位的小数时长，如 `1.500000`
    Duration,
    /// 时间戳，捕获整行剩余部分
    Timestamp,
}

impl FieldKind {
    /// 按类型名查找，兼容原始工具的写法（`time` 表示时长，`datetime` 表示时间戳）
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldKind::String),
            "int" => Some(FieldKind::Int),
            "bool" => Some(FieldKind::Bool),
            "time" | "duration" => Some(FieldKind::Duration),
            "datetime" | "timestamp" => Some(FieldKind::Timestamp),
            _ => None,
        }
    }

    /// 该类型在提取模式中使用的捕获子模式
    pub fn capture_pattern(self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Bool => "[0-9A-Za-z_]+",
            FieldKind::Int => "[0-9]+",
            FieldKind::Duration => r"[0-9\.]+",
            FieldKind::Timestamp => ".*",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::Duration => "duration",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

/// 一条字段规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// 日志中的字段名，大小写敏感
    pub name: String,
    /// 写入记录时使用的键（字段名转小写）
    pub key: String,
    /// 值类型
    pub kind: FieldKind,
}

impl Rule {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let key = name.to_lowercase();
        Self { name, key, kind }
    }
}

/// MySQL / Percona 慢日志的字段表
pub const MYSQL_RULES: [(&str, FieldKind); 26] = [
    ("Time", FieldKind::Timestamp),
    ("Schema", FieldKind::String),
    ("Query_time", FieldKind::Duration),
    ("Lock_time", FieldKind::Duration),
    ("Rows_sent", FieldKind::Int),
    ("Rows_examined", FieldKind::Int),
    ("Rows_affected", FieldKind::Int),
    ("Rows_read", FieldKind::Int),
    ("Bytes_sent", FieldKind::Int),
    ("Tmp_tables", FieldKind::Int),
    ("Tmp_disk_tables", FieldKind::Int),
    ("Tmp_table_sizes", FieldKind::Int),
    ("QC_Hit", FieldKind::Bool),
    ("Full_scan", FieldKind::Bool),
    ("Full_join", FieldKind::Bool),
    ("Tmp_table", FieldKind::Bool),
    ("Tmp_table_on_disk", FieldKind::Bool),
    ("Filesort", FieldKind::Bool),
    ("Filesort_on_disk", FieldKind::Bool),
    ("Merge_passes", FieldKind::Int),
    ("InnoDB_IO_r_ops", FieldKind::Int),
    ("InnoDB_IO_r_bytes", FieldKind::Int),
    ("InnoDB_IO_r_wait", FieldKind::Duration),
    ("InnoDB_rec_lock_wait", FieldKind::Duration),
    ("InnoDB_queue_wait", FieldKind::Duration),
    ("InnoDB_pages_distinct", FieldKind::Int),
];

// 内置规则表只编译一次
static MYSQL_RULE_SET: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_kinds(MYSQL_RULES)
        .unwrap_or_else(|e| panic!("failed to build built-in rule set: {}", e))
});

/// 有序的规则集合及其编译好的匹配器
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    matcher: Matcher,
}

impl RuleSet {
    /// 内置的 MySQL 规则集（进程内共享）
    pub fn mysql() -> &'static RuleSet {
        &MYSQL_RULE_SET
    }

    /// 从 (字段名, 类型) 列表构建规则集，顺序即匹配顺序
    pub fn from_kinds<I, S>(rules: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        let rules: Vec<Rule> = rules
            .into_iter()
            .map(|(name, kind)| Rule::new(name, kind))
            .collect();
        let matcher = Matcher::from_rules(&rules)?;
        Ok(Self { rules, matcher })
    }

    /// 从 (字段名, 类型名) 列表构建规则集
    ///
    /// # 错误
    ///
    /// 类型名无法识别时返回 [`ParseError::UnknownKind`]。
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Self, ParseError> {
        let mut kinds = Vec::with_capacity(pairs.len());
        for (name, kind) in pairs {
            let field = FieldKind::from_name(kind.as_ref()).ok_or_else(|| {
                ParseError::UnknownKind {
                    field: name.as_ref().to_string(),
                    kind: kind.as_ref().to_string(),
                }
            })?;
            kinds.push((name.as_ref().to_string(), field));
        }
        Self::from_kinds(kinds)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 按字段名（大小写敏感）查找规则
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// 按记录键（小写）查找规则
    pub fn get_by_key(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    /// 对单个字段做匹配，返回捕获到的原始值
    pub fn match_field<'a>(&self, line: &'a str, name: &str) -> Option<&'a str> {
        let index = self.rules.iter().position(|rule| rule.name == name)?;
        self.matcher.capture(index, line)
    }

    /// 返回该行命中的所有规则及其原始捕获值，按规则表顺序排列
    pub fn find_matches<'r, 'a>(&'r self, line: &'a str) -> Vec<(&'r Rule, &'a str)> {
        self.matcher
            .find_matches(line)
            .into_iter()
            .map(|(index, raw)| (&self.rules[index], raw))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::mysql().clone()
    }
}
