//! 解析器使用的常量定义
//!
//! 定义了记录边界标记、注释行前缀以及时间戳格式等常量。

/// 记录起始行的标记（新的慢查询事件从这一行开始）
pub const RECORD_MARKER: &str = "# Time: ";

/// 注释行前缀，只有注释行会与规则表匹配
pub const COMMENT_PREFIX: &str = "# ";

/// 正文行之间默认的连接符
pub const DEFAULT_QUERY_SEPARATOR: &str = "\n";

/// 派生字段：开始时间（time - query_time）
pub const TIME_START_KEY: &str = "time_start";

/// 派生字段：正文字符数
pub const QUERY_LENGTH_KEY: &str = "query_length";

/// 准入字段：记录必须带有可解析的时间戳
pub const TIME_KEY: &str = "time";

/// 用于计算开始时间的时长字段
pub const QUERY_TIME_KEY: &str = "query_time";

// 时间戳格式

/// 旧格式的日期部分，如 `230101`
pub const SHORT_DATE_FORMAT: &str = "%y%m%d";

/// 旧格式的时间部分，小时可能只有一位，小数秒可选
pub const SHORT_TIME_FORMAT: &str = "%H:%M:%S%.f";

/// MySQL 5.7+ 的 ISO 格式，如 `2023-01-01T10:00:00.123456`
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 输出时的展示格式（小数部分另行补齐到 8 位）
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 展示格式中小数秒的位数
pub const DISPLAY_FRACTION_DIGITS: u32 = 8;

/// 读取输入时使用的缓冲区大小
pub const READ_BUFFER_CAPACITY: usize = 256 * 1024;
