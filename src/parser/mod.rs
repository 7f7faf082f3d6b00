//! Parser 模块 - 解析 MySQL 慢查询日志
//!
//! 此模块提供了完整的日志解析功能,包括:
//! - 按行读取输入（拼接被拆分的长行）
//! - 字段类型转换
//! - 记录组装、后处理与规范化
//! - 便捷 API 函数

mod api;
pub mod assembler;
pub mod coerce;
pub mod constants;
pub mod line_reader;
pub mod postprocess;

pub use api::{
    parse_records_from_file, parse_records_from_lines, parse_records_from_reader,
    parse_records_from_string,
};
pub use assembler::RecordAssembler;
pub use line_reader::LineReader;
pub use postprocess::{finalize, normalize};
