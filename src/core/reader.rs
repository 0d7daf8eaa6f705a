// SkillSleuth - core/reader.rs
//
// Line-oriented JSON decoding of proxy logs.
// Core layer: accepts BufRead trait objects, never touches the filesystem
// directly.

use serde_json::Value;
use std::io::{self, BufRead};

/// One successfully decoded input line.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLine {
    /// 1-based physical line number.
    pub line_number: u64,
    pub value: Value,
}

/// Lazy iterator over decoded lines.
///
/// Lines that do not decode as JSON (blank, truncated, non-UTF-8, ...) are
/// skipped silently and only show up in `malformed()`. I/O errors from the
/// underlying reader are yielded and end iteration.
pub struct DecodedLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: u64,
    malformed: u64,
    failed: bool,
}

/// Decode `reader` one line at a time.
pub fn decode_lines<R: BufRead>(reader: R) -> DecodedLines<R> {
    DecodedLines {
        reader,
        buf: Vec::new(),
        line_number: 0,
        malformed: 0,
        failed: false,
    }
}

impl<R> DecodedLines<R> {
    /// Physical lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line_number
    }

    /// Lines skipped because they did not decode.
    pub fn malformed(&self) -> u64 {
        self.malformed
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = io::Result<DecodedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
            self.line_number += 1;

            // serde_json tolerates the surrounding whitespace, including "\r\n".
            match serde_json::from_slice::<Value>(&self.buf) {
                Ok(value) => {
                    return Some(Ok(DecodedLine {
                        line_number: self.line_number,
                        value,
                    }))
                }
                Err(e) => {
                    self.malformed += 1;
                    tracing::trace!(
                        line = self.line_number,
                        error = %e,
                        "Skipping line that is not valid JSON"
                    );
                }
            }
        }
    }
}
