//! WebVTT parser module
//!
//! Turns raw bytes into timed [`Cue`]s whose markup has been folded into
//! tag buckets. Parsing is permissive: malformed timestamps and stray
//! lines drop the affected block and are recorded as [`ParseIssue`]s, while
//! a missing signature or a style block after the first cue fails the parse.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::parser::ParsedVtt;
//!
//! let parsed = ParsedVtt::parse("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n")?;
//! let cue = &parsed.cues()[0];
//! assert_eq!(cue.start_time_us(), 1_000_000);
//! assert_eq!(cue.end_time_us(), 2_000_000);
//! assert_eq!(cue.content_for_tag("text"), ["Hello"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    source::{ByteLineReader, LineSource},
    timeline::Timeline,
    Result,
};

pub mod ast;
pub mod config;
pub mod cue_header;
pub mod errors;
mod main;

pub use ast::{Cue, CueSettings, TagContent};
pub use config::ParserConfig;
pub use cue_header::CueHeader;
pub use errors::{IssueCategory, IssueSeverity, ParseError, ParseIssue};

/// Result of parsing one WebVTT file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVtt {
    /// Cues in file order
    cues: Vec<Cue>,

    /// Bodies of `STYLE` blocks, kept verbatim
    style_blocks: Vec<String>,

    /// Recoverable problems met while parsing
    issues: Vec<ParseIssue>,
}

impl ParsedVtt {
    /// Parse UTF-8 text with the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is missing, a style block follows
    /// a cue, or the input exceeds the default size limit.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_bytes(text.as_bytes(), &ParserConfig::default())
    }

    /// Parse raw bytes, honouring a leading byte-order mark
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InputTooLarge`] when `bytes` exceeds
    /// `config.max_input_bytes`, otherwise the errors of [`Self::parse`].
    pub fn parse_bytes(bytes: &[u8], config: &ParserConfig) -> Result<Self> {
        if bytes.len() > config.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size: bytes.len(),
                limit: config.max_input_bytes,
            }
            .into());
        }
        let mut reader = ByteLineReader::new(bytes.to_vec()).with_charset(config.charset);
        Self::parse_source(&mut reader)
    }

    /// Parse from any line source, starting at its current position
    ///
    /// # Errors
    ///
    /// Returns the structural errors described on [`Self::parse`].
    pub fn parse_source<S: LineSource>(source: &mut S) -> Result<Self> {
        main::Parser::new(source).parse()
    }

    pub(crate) const fn from_parts(
        cues: Vec<Cue>,
        style_blocks: Vec<String>,
        issues: Vec<ParseIssue>,
    ) -> Self {
        Self {
            cues,
            style_blocks,
            issues,
        }
    }

    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    #[must_use]
    pub fn style_blocks(&self) -> &[String] {
        &self.style_blocks
    }

    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Whether any cue was dropped
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Error)
    }

    /// Event-time index over the parsed cues
    #[must_use]
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(&self.cues)
    }

    /// Split into cues, style blocks and issues
    #[must_use]
    pub fn into_parts(self) -> (Vec<Cue>, Vec<String>, Vec<ParseIssue>) {
        (self.cues, self.style_blocks, self.issues)
    }
}
