//! LineReader - 从 Reader 流式读取完整的逻辑行
//!
//! 底层缓冲区每次只能提供输入的一个片段，超长的行会被拆成多段；
//! `LineReader` 负责把这些片段重新拼接成完整的行后再交给解析器。

use memchr::memchr;
use std::{
    io::{self, BufRead, BufReader, Read},
    mem,
};

use crate::error::ParseError;
use crate::parser::constants::READ_BUFFER_CAPACITY;
use crate::tools::trim_line_ending;

/// 从 Reader 中按行读取的迭代器
///
/// 每一项都是去掉行尾 `\n` / `\r\n` 的完整行。非 UTF-8 字节以替换字符解码。
/// 读取失败时产生一次 [`ParseError::Io`]，随后迭代结束。
///
/// # 类型参数
///
/// * `R` - 实现了 `Read` trait 的类型
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(READ_BUFFER_CAPACITY, reader)
    }

    /// 指定底层缓冲区大小创建（缓冲区越小，单行被拆分的片段越多）
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// 读取下一行，文件结束时返回 `Ok(None)`
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();

        loop {
            let (complete, used) = {
                let fragment = match self.reader.fill_buf() {
                    Ok(fragment) => fragment,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };

                if fragment.is_empty() {
                    // EOF：最后一行可能没有换行符
                    if self.buffer.is_empty() {
                        return Ok(None);
                    }
                    break;
                }

                match memchr(b'\n', fragment) {
                    Some(idx) => {
                        self.buffer.extend_from_slice(&fragment[..=idx]);
                        (true, idx + 1)
                    }
                    None => {
                        self.buffer.extend_from_slice(fragment);
                        (false, fragment.len())
                    }
                }
            };

            self.reader.consume(used);
            if complete {
                break;
            }
        }

        trim_line_ending(&mut self.buffer);

        let bytes = mem::take(&mut self.buffer);
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(Some(line))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(ParseError::from(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8], capacity: usize) -> Vec<String> {
        LineReader::with_capacity(capacity, Cursor::new(input.to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn splits_lines() {
        let lines = collect(b"# Time: 230101 10:00:00\nSELECT 1;\n", 1024);
        assert_eq!(lines, vec!["# Time: 230101 10:00:00", "SELECT 1;"]);
    }

    #[test]
    fn last_line_without_newline() {
        let lines = collect(b"a\nb", 1024);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn crlf_endings() {
        let lines = collect(b"a\r\nb\r\n", 1024);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn empty_lines_are_kept() {
        let lines = collect(b"a\n\nb\n", 1024);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn reassembles_fragments() {
        // 缓冲区只有 4 字节，每行都会被拆成多个片段
        let long = "SELECT * FROM orders WHERE customer_id = 42 AND status = 'open';";
        let input = format!("# Time: 230101 10:00:00.000000\n{}\n", long);
        let lines = collect(input.as_bytes(), 4);
        assert_eq!(lines, vec!["# Time: 230101 10:00:00.000000", long]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let lines = collect(b"SELECT '\xff';\n", 1024);
        assert_eq!(lines, vec!["SELECT '\u{fffd}';"]);
    }

    #[test]
    fn empty_input() {
        assert!(collect(b"", 1024).is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn read_error_is_reported_once() {
        let mut reader = LineReader::new(FailingReader);
        match reader.next() {
            Some(Err(ParseError::Io(msg))) => assert!(msg.contains("device gone")),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(reader.next().is_none());
    }
}
