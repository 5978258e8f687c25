//! Line-oriented access to raw subtitle bytes
//!
//! The parser never touches bytes directly; it pulls decoded lines from a
//! [`LineSource`] and rewinds it with [`LineSource::set_position`] when it
//! needs to look ahead. [`ByteLineReader`] is the in-memory implementation
//! over a fixed buffer with a settable limit.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::source::{ByteLineReader, LineSource};
//!
//! let mut reader = ByteLineReader::new(b"\xEF\xBB\xBFWEBVTT\r\n\r\nhello".to_vec());
//! assert_eq!(reader.read_line().as_deref(), Some("WEBVTT"));
//! assert_eq!(reader.read_line().as_deref(), Some(""));
//! assert_eq!(reader.read_line().as_deref(), Some("hello"));
//! assert_eq!(reader.read_line(), None);
//! ```

pub mod charset;

pub use charset::{detect_bom, BomType, Charset};

use crate::{utils::CoreError, Result};

/// Sequential source of decoded text lines with a rewindable cursor
///
/// One source owns one cursor; concurrent parses need independent sources.
pub trait LineSource {
    /// Read the next line without its terminator, or `None` at end of input
    fn read_line(&mut self) -> Option<String>;

    /// Current cursor position (opaque, only meaningful to `set_position`)
    fn position(&self) -> usize;

    /// Move the cursor back (or forward) to a previously observed position
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `position` lies past the
    /// readable limit.
    fn set_position(&mut self, position: usize) -> Result<()>;
}

/// Line reader over an owned byte buffer
#[derive(Debug, Clone, Default)]
pub struct ByteLineReader {
    data: Vec<u8>,
    position: usize,
    limit: usize,
    charset: Charset,
}

impl ByteLineReader {
    /// Create a reader positioned at the start of `data`, decoding UTF-8
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        let limit = data.len();
        Self {
            data,
            position: 0,
            limit,
            charset: Charset::Utf8,
        }
    }

    /// Set the charset used by [`LineSource::read_line`]
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Charset currently used by [`LineSource::read_line`]
    ///
    /// Updated when a byte-order mark is encountered.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Replace the buffer, rewinding to its start with the limit at its end
    pub fn reset(&mut self, data: Vec<u8>) {
        self.limit = data.len();
        self.data = data;
        self.position = 0;
    }

    /// Number of readable bytes
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Restrict reading to the first `limit` bytes of the buffer
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `limit` exceeds the buffer.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.data.len() {
            return Err(CoreError::IndexOutOfBounds {
                index: limit,
                len: self.data.len(),
            });
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Bytes between the cursor and the limit
    #[must_use]
    pub const fn bytes_left(&self) -> usize {
        self.limit.saturating_sub(self.position)
    }

    /// Read a line decoded with an explicit charset
    ///
    /// A leading byte-order mark is skipped for every charset except
    /// US-ASCII, and the charset it names is used for this line. Lines end
    /// at `\r`, `\n` or `\r\n`.
    pub fn read_line_with(&mut self, charset: Charset) -> Option<String> {
        if self.bytes_left() == 0 {
            return None;
        }

        let charset = if charset == Charset::UsAscii {
            charset
        } else {
            self.skip_bom().unwrap_or(charset)
        };

        let line_end = self.find_line_terminator(charset);
        let line = charset.decode(&self.data[self.position..line_end]);
        self.position = line_end;
        self.skip_line_terminator(charset);
        Some(line)
    }

    /// Skip a byte-order mark at the cursor, returning the charset it names
    fn skip_bom(&mut self) -> Option<Charset> {
        let bom = detect_bom(&self.data[self.position..self.limit])?;
        self.position += bom.signature().len();
        Some(bom.charset())
    }

    /// Index of the next `\r` or `\n` code unit, or the limit if none
    fn find_line_terminator(&self, charset: Charset) -> usize {
        let stride = charset.code_unit_len();
        let mut index = self.position;
        while index + stride <= self.limit {
            if let Some(unit) = charset.code_unit(&self.data[index..self.limit]) {
                if is_line_break(unit) {
                    return index;
                }
            }
            index += stride;
        }
        self.limit
    }

    fn skip_line_terminator(&mut self, charset: Charset) {
        if self.read_unit_if(charset, is_line_break) == Some(u16::from(b'\r')) {
            self.read_unit_if(charset, |unit| unit == u16::from(b'\n'));
        }
    }

    /// Consume one code unit if it satisfies `accept`
    fn read_unit_if(&mut self, charset: Charset, accept: impl Fn(u16) -> bool) -> Option<u16> {
        let unit = charset.code_unit(&self.data[self.position..self.limit])?;
        if accept(unit) {
            self.position += charset.code_unit_len();
            Some(unit)
        } else {
            None
        }
    }
}

impl LineSource for ByteLineReader {
    fn read_line(&mut self) -> Option<String> {
        if self.charset != Charset::UsAscii {
            if let Some(charset) = self.skip_bom() {
                self.charset = charset;
            }
        }
        self.read_line_with(self.charset)
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(CoreError::IndexOutOfBounds {
                index: position,
                len: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }
}

fn is_line_break(unit: u16) -> bool {
    unit == u16::from(b'\n') || unit == u16::from(b'\r')
}
