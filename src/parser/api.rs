//! 便捷 API 函数
//!
//! 提供了一组方便使用的高层 API：读取输入、组装记录、后处理并规范化，
//! 返回可直接排序和序列化的记录缓冲区以及字段级警告。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ParseError;
use crate::parser::assembler::RecordAssembler;
use crate::parser::line_reader::LineReader;
use crate::parser::postprocess::normalize;
use crate::parser_config::ParserConfig;
use crate::record_types::{NormalizedRecord, Record};

fn into_normalized(records: Vec<Record>) -> Vec<NormalizedRecord> {
    records.into_iter().map(normalize).collect()
}

/// 从已经切分好的行解析记录
///
/// # 返回
///
/// `(records, warnings)`：规范化后的记录和字段转换警告
pub fn parse_records_from_lines<I, S>(
    lines: I,
    config: &ParserConfig,
) -> (Vec<NormalizedRecord>, Vec<ParseError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = RecordAssembler::new(config);
    for line in lines {
        assembler.push_line(line.as_ref());
    }

    let (records, warnings) = assembler.finish();
    (into_normalized(records), warnings)
}

/// 使用默认配置从字符串解析记录
///
/// # 示例
///
/// ```
/// use poke::parse_records_from_string;
///
/// let log = concat!(
///     "# Time: 230101 10:00:00.000000\n",
///     "# Query_time: 2.500000  Lock_time: 0.000000 Rows_sent: 1  Rows_examined: 1\n",
///     "SELECT 1;\n",
/// );
/// let (records, warnings) = parse_records_from_string(log);
///
/// assert!(warnings.is_empty());
/// assert_eq!(
///     records[0].get("time_start").and_then(|v| v.as_str()),
///     Some("2023-01-01 09:59:57.50000000")
/// );
/// ```
pub fn parse_records_from_string(text: &str) -> (Vec<NormalizedRecord>, Vec<ParseError>) {
    parse_records_from_lines(text.lines(), &ParserConfig::default())
}

/// 从任意 Reader 读取并解析记录
///
/// # 错误
///
/// 读取失败时返回 [`ParseError::Io`]，此时不返回任何记录。
pub fn parse_records_from_reader<R: Read>(
    reader: R,
    config: &ParserConfig,
) -> Result<(Vec<NormalizedRecord>, Vec<ParseError>), ParseError> {
    let mut assembler = RecordAssembler::new(config);
    for line in LineReader::new(reader) {
        assembler.push_line(&line?);
    }

    let (records, warnings) = assembler.finish();
    log::debug!(
        "assembled {} records with {} field warnings",
        records.len(),
        warnings.len()
    );
    Ok((into_normalized(records), warnings))
}

/// 从文件读取并解析记录
///
/// # 示例
///
/// ```no_run
/// use poke::{ParserConfig, parse_records_from_file};
///
/// let (records, warnings) = parse_records_from_file("slow.log", &ParserConfig::default())?;
///
/// println!("解析 {} 条记录，{} 个警告", records.len(), warnings.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_records_from_file<P>(
    path: P,
    config: &ParserConfig,
) -> Result<(Vec<NormalizedRecord>, Vec<ParseError>), ParseError>
where
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| ParseError::FileNotFound {
        path: format!("{}: {}", path_ref.display(), e),
    })?;
    parse_records_from_reader(file, config)
}
