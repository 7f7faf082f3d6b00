use regex::{Regex, RegexSet};

use crate::error::ParseError;
use crate::rules::{FieldKind, Rule};

/// 围绕 `regex` 的字段匹配器。
/// 按规则顺序存储每个字段的提取模式，并用一个 `RegexSet`
/// 在一次扫描中找出某一行命中的所有规则。
#[derive(Debug, Clone)]
pub struct Matcher {
    set: RegexSet,
    patterns: Vec<Regex>,
}

/// 生成字段的提取模式：`^# .*<字段名>: (<子模式>)`
pub fn pattern_source(name: &str, kind: FieldKind) -> String {
    format!(
        r"^# .*{}: ({})",
        regex::escape(name),
        kind.capture_pattern()
    )
}

impl Matcher {
    /// 从一组规则构建 Matcher（规则顺序重要）。
    pub fn from_rules(rules: &[Rule]) -> Result<Self, ParseError> {
        let sources: Vec<String> = rules
            .iter()
            .map(|rule| pattern_source(&rule.name, rule.kind))
            .collect();

        let patterns = rules
            .iter()
            .zip(&sources)
            .map(|(rule, source)| {
                Regex::new(source).map_err(|e| ParseError::InvalidPattern {
                    field: rule.name.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let set = RegexSet::new(&sources).map_err(|e| ParseError::InvalidPattern {
            field: "*".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Matcher { set, patterns })
    }

    /// 用第 `index` 条规则匹配一行，返回捕获组内容
    pub fn capture<'a>(&self, index: usize, line: &'a str) -> Option<&'a str> {
        self.patterns
            .get(index)?
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// 返回一个 Vec<(usize, &str)>，表示命中的规则下标及其捕获值
    ///（顺序与构建 Matcher 时提供的规则相同）。
    pub fn find_matches<'a>(&self, line: &'a str) -> Vec<(usize, &'a str)> {
        // 绝大多数行（SQL 正文）一条规则也不会命中，先用 RegexSet 过滤
        self.set
            .matches(line)
            .into_iter()
            .filter_map(|index| self.capture(index, line).map(|raw| (index, raw)))
            .collect()
    }

    /// Expose number of patterns
    pub fn patterns_len(&self) -> usize {
        self.patterns.len()
    }
}
