//! Parser 配置模块
//!
//! 提供可替换的规则表和行分类参数，使得日志格式变化时只需更新配置，
//! 而不需要修改核心解析逻辑。

use crate::parser::constants::{COMMENT_PREFIX, DEFAULT_QUERY_SEPARATOR, RECORD_MARKER};
use crate::rules::RuleSet;
use crate::tools::{LineKind, classify_line_with};

/// Parser 配置
///
/// 定义解析器的行为和支持的字段
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// 字段规则表
    pub rules: RuleSet,

    /// 记录起始行的标记，默认 `# Time: `
    pub record_marker: String,

    /// 注释行前缀，默认 `# `
    pub comment_prefix: String,

    /// 正文行之间的连接符，默认 `\n`
    ///
    /// 会影响 `query` 的内容以及 `query_length` 的取值。
    pub query_separator: String,
}

impl ParserConfig {
    /// MySQL 慢日志的默认配置
    pub fn mysql_default() -> Self {
        Self {
            rules: RuleSet::mysql().clone(),
            record_marker: RECORD_MARKER.to_string(),
            comment_prefix: COMMENT_PREFIX.to_string(),
            query_separator: DEFAULT_QUERY_SEPARATOR.to_string(),
        }
    }

    /// 替换规则表（例如测试中使用精简的规则集）
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// 设置正文连接符
    pub fn with_query_separator(mut self, separator: impl Into<String>) -> Self {
        self.query_separator = separator.into();
        self
    }

    /// 按当前配置对一行分类
    pub fn classify(&self, line: &str) -> LineKind {
        classify_line_with(line, &self.record_marker, &self.comment_prefix)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::mysql_default()
    }
}
