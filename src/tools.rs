use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::parser::constants::{
    COMMENT_PREFIX, DISPLAY_FORMAT, DISPLAY_FRACTION_DIGITS, RECORD_MARKER,
};

/// 一行输入的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 以 `# Time: ` 开头，开始一条新记录（同时也是注释行）
    RecordStart,
    /// 以 `# ` 开头的注释行
    Comment,
    /// 其余所有行，属于 SQL 正文
    Body,
}

impl LineKind {
    /// 是否需要与规则表匹配
    pub fn is_comment(self) -> bool {
        matches!(self, LineKind::RecordStart | LineKind::Comment)
    }
}

/// 按给定的记录标记和注释前缀对一行分类
#[inline]
pub fn classify_line_with(line: &str, record_marker: &str, comment_prefix: &str) -> LineKind {
    if line.starts_with(record_marker) {
        LineKind::RecordStart
    } else if line.starts_with(comment_prefix) {
        LineKind::Comment
    } else {
        LineKind::Body
    }
}

/// 使用默认的 MySQL 标记对一行分类
#[inline]
pub fn classify_line(line: &str) -> LineKind {
    classify_line_with(line, RECORD_MARKER, COMMENT_PREFIX)
}

///
/// 判断一行日志是否为记录起始行。
///
/// 判断标准：行首为 `# Time: `（区分大小写，冒号后必须有一个空格）。
#[inline]
pub fn is_record_start_line(line: &str) -> bool {
    line.starts_with(RECORD_MARKER)
}

/// 去掉行尾的 `\n` / `\r\n`（原地修改）
#[inline]
pub fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

/// 将时间戳格式化为 `YYYY-MM-DD HH:MM:SS.ffffffff`（小数部分截断到 8 位）
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    // 闰秒时 nanosecond() 可能 >= 1e9
    let nanos = ts.nanosecond() % 1_000_000_000;
    let fraction = nanos / 10u32.pow(9 - DISPLAY_FRACTION_DIGITS);
    format!(
        "{}.{:0width$}",
        ts.format(DISPLAY_FORMAT),
        fraction,
        width = DISPLAY_FRACTION_DIGITS as usize
    )
}

/// 时长转换为带符号的秒数
pub fn duration_seconds(d: &TimeDelta) -> f64 {
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) / 1e9
}
