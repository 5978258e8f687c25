//! Parser configuration

use crate::{source::Charset, utils::CoreError, Result};

/// Default upper bound on input size (50 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 50 * 1024 * 1024;

/// Options controlling how raw bytes are parsed
///
/// # Examples
///
/// ```rust
/// # use vtt_core::{parser::ParserConfig, source::Charset};
/// let config = ParserConfig::default()
///     .with_charset(Charset::Utf16Le)
///     .with_max_input_bytes(4096);
/// assert_eq!(config.charset, Charset::Utf16Le);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Charset assumed when the input carries no byte-order mark
    pub charset: Charset,
    /// Inputs longer than this are rejected before parsing
    pub max_input_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub const fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Select the charset by name (`"UTF-16LE"`, `"us-ascii"`, ...)
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for an unknown charset name.
    pub fn with_charset_name(self, name: &str) -> Result<Self> {
        let charset = Charset::from_name(name)
            .ok_or_else(|| CoreError::Config(format!("unsupported charset '{name}'")))?;
        Ok(self.with_charset(charset))
    }

    #[must_use]
    pub const fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}
