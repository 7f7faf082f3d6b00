//! # poke - MySQL 慢查询日志解析器
//!
//! 将 MySQL 慢查询日志解析为带类型的记录，计算派生字段并按多个键排序。
//!
//! ## 功能特性
//!
//! - **规则驱动**: 字段名到值类型的映射集中在一张规则表中，可替换、可精简
//! - **类型安全**: 整数、布尔、时长、时间戳都以强类型保存，排序时按精确值比较
//! - **派生字段**: `time_start`（`time - query_time`）和 `query_length`
//! - **多键排序**: 每个键一轮稳定排序，最后一个键优先级最高，缺值总是排在最后
//! - **非致命警告**: 单个字段转换失败只丢弃该字段，不影响整条记录
//!
//! ## 快速开始
//!
//! ```rust
//! use poke::{SortKey, parse_records_from_string, sort_records};
//!
//! let log = concat!(
//!     "# Time: 230101 10:00:00.000000\n",
//!     "# Query_time: 1.500000  Lock_time: 0.000000 Rows_sent: 5  Rows_examined: 5\n",
//!     "SELECT * FROM users;\n",
//!     "# Time: 230101 10:00:01.000000\n",
//!     "# Query_time: 0.200000  Lock_time: 0.000000 Rows_sent: 9  Rows_examined: 9\n",
//!     "SELECT * FROM orders;\n",
//! );
//!
//! let (mut records, warnings) = parse_records_from_string(log);
//! assert!(warnings.is_empty());
//!
//! let keys = SortKey::parse_list("time_start:asc,rows_sent:desc").unwrap();
//! sort_records(&mut records, &keys).unwrap();
//!
//! assert_eq!(records[0].get("rows_sent").and_then(|v| v.as_i64()), Some(9));
//! ```
//!
//! ### 从文件读取
//!
//! ```rust,no_run
//! use poke::{ParserConfig, parse_records_from_file};
//!
//! let config = ParserConfig::default();
//! let (records, warnings) = parse_records_from_file("/var/log/mysql/slow.log", &config).unwrap();
//!
//! for warning in &warnings {
//!     eprintln!("{}", warning);
//! }
//! println!("{} records", records.len());
//! ```
//!
//! ## 日志格式
//!
//! 每条记录以 `# Time: ` 开头，随后是若干注释行和 SQL 正文：
//!
//! ```text
//! # Time: 230101 10:00:00.000000
//! # User@Host: app[app] @ web-1 [10.0.0.5]  Id:    42
//! # Query_time: 1.500000  Lock_time: 0.000000 Rows_sent: 5  Rows_examined: 5
//! SET timestamp=1672567200;
//! SELECT * FROM users;
//! ```

pub mod error;
pub mod matcher;
pub mod parser;
pub mod parser_config;
pub mod record_types;
pub mod rules;
pub mod sort;
pub mod tools;

pub use error::ParseError;
pub use parser::{
    LineReader, RecordAssembler, finalize, normalize, parse_records_from_file,
    parse_records_from_lines, parse_records_from_reader, parse_records_from_string,
};
pub use parser_config::ParserConfig;
pub use record_types::{NormalizedRecord, NormalizedValue, Record, Value};
pub use rules::{FieldKind, Rule, RuleSet};
pub use sort::{DEFAULT_SORT, SortKey, compare, sort_records};
