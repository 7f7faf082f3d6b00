//! RecordAssembler - 将逐行输入组装为记录
//!
//! 组装器是一个简单的状态机：
//! - 遇到记录起始行（`# Time: `）时，先结束当前记录，再开始新记录；
//! - 注释行与规则表逐条匹配，命中的字段转换后写入当前记录；
//! - 其余行作为 SQL 正文追加到 `query` 字段。
//!
//! 字段转换失败不会中断解析，错误被收集为警告返回给调用方。

use crate::error::ParseError;
use crate::parser::coerce::coerce;
use crate::parser::postprocess::finalize;
use crate::parser_config::ParserConfig;
use crate::record_types::Record;
use crate::tools::LineKind;

/// 按行组装记录
///
/// # 示例
///
/// ```
/// use poke::{ParserConfig, RecordAssembler};
///
/// let config = ParserConfig::default();
/// let mut assembler = RecordAssembler::new(&config);
/// assembler.push_line("# Time: 230101 10:00:00.000000");
/// assembler.push_line("# Query_time: 1.500000  Lock_time: 0.000000 Rows_sent: 5  Rows_examined: 5");
/// assembler.push_line("SELECT * FROM t;");
///
/// let (records, warnings) = assembler.finish();
/// assert_eq!(records.len(), 1);
/// assert!(warnings.is_empty());
/// ```
pub struct RecordAssembler<'c> {
    config: &'c ParserConfig,
    current: Record,
    records: Vec<Record>,
    warnings: Vec<ParseError>,
}

impl<'c> RecordAssembler<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            current: Record::new(),
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// 处理一行输入（不含行尾换行符）
    pub fn push_line(&mut self, line: &str) {
        let kind = self.config.classify(line);

        if kind == LineKind::RecordStart {
            self.flush();
        }

        if kind.is_comment() {
            self.apply_fields(line);
        } else {
            self.current
                .append_query(line, &self.config.query_separator);
        }
    }

    /// 把该行命中的所有字段写入当前记录
    fn apply_fields(&mut self, line: &str) {
        let config = self.config;
        for (rule, raw) in config.rules.find_matches(line) {
            log::trace!("matched {} = {:?}", rule.name, raw);
            match coerce(rule, raw) {
                Ok(value) => self.current.insert(rule.key.clone(), value),
                Err(err) => self.warnings.push(err),
            }
        }
    }

    /// 结束当前记录：非空则经过后处理，保留的记录进入缓冲区
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let record = std::mem::take(&mut self.current);
        if let Some(record) = finalize(record) {
            self.records.push(record);
        }
    }

    /// 已完成的记录数
    pub fn completed(&self) -> usize {
        self.records.len()
    }

    /// 输入结束：刷新最后一条记录，返回所有保留的记录和字段警告
    pub fn finish(mut self) -> (Vec<Record>, Vec<ParseError>) {
        self.flush();
        (self.records, self.warnings)
    }
}
