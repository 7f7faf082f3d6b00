//! 错误类型定义
//!
//! 定义了解析与排序过程中可能出现的所有错误类型。
//!
//! 按严重程度分为三类：
//! - 配置错误（`UnknownKind` / `InvalidPattern` / `InvalidSortSpec`）：启动阶段即失败
//! - 字段转换错误（`FieldCoercion`）：只影响单个字段，解析继续
//! - 读取错误（`Io` / `FileNotFound`）：整个运行终止，不产生任何输出

use thiserror::Error;

/// 解析错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 规则表中出现未知的字段类型
    #[error("unknown field kind '{kind}' for field '{field}'")]
    UnknownKind {
        /// 字段名
        field: String,
        /// 无法识别的类型名
        kind: String,
    },

    /// 字段的提取模式编译失败
    #[error("failed to compile pattern for field '{field}': {reason}")]
    InvalidPattern {
        /// 字段名
        field: String,
        /// 编译失败原因
        reason: String,
    },

    /// 匹配到的原始值无法转换为字段声明的类型
    #[error("unable to parse {field}: {raw} ({reason})")]
    FieldCoercion {
        /// 字段名（日志中的原始写法，如 `Query_time`）
        field: String,
        /// 捕获到的原始值
        raw: String,
        /// 失败原因
        reason: String,
    },

    /// 文件未找到或无法访问
    #[error("file not found or inaccessible: {path}")]
    FileNotFound {
        /// 文件路径及系统错误描述
        path: String,
    },

    /// 读取输入失败（正常读到 EOF 不算错误）
    #[error("can't read input data: {0}")]
    Io(String),

    /// 排序规则语法错误
    #[error("invalid sort rules '{0}': should be key:asc,key2:desc")]
    InvalidSortSpec(String),

    /// 同一字段在不同记录中出现了不同类型的值
    #[error("field '{field}' holds values of different kinds ({left} vs {right})")]
    KindMismatch {
        /// 字段名
        field: String,
        /// 左侧值类型
        left: &'static str,
        /// 右侧值类型
        right: &'static str,
    },
}

impl ParseError {
    /// 是否为可恢复的（只影响单个字段的）错误
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseError::FieldCoercion { .. })
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err.to_string())
    }
}
