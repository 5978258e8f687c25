//! Line classification for WebVTT block structure
//!
//! Recognises cue timing lines, comment and style block starts, and the
//! `name:value` settings trailing a timing line. Patterns are compiled once
//! per process.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::CueSettings;

static CUE_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+-->\s+(\S+)(.*)?$").expect("Invalid cue header regex")
});

static COMMENT_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^NOTE([ \t].*)?$").expect("Invalid comment block regex"));

static CUE_SETTING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+?):(\S+)").expect("Invalid cue setting regex"));

/// Signature every WebVTT file starts with
pub const WEBVTT_SIGNATURE: &str = "WEBVTT";

/// Line that opens a style block
pub const STYLE_BLOCK_START: &str = "STYLE";

/// Pieces of a `start --> end settings` line, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueHeader<'a> {
    /// Start timestamp text, not yet validated
    pub start: &'a str,
    /// End timestamp text, not yet validated
    pub end: &'a str,
    /// Everything after the end timestamp
    pub settings: &'a str,
}

impl<'a> CueHeader<'a> {
    /// Match a cue timing line
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vtt_core::parser::CueHeader;
    /// let header = CueHeader::parse("00:01.000 --> 00:02.000 align:start").unwrap();
    /// assert_eq!(header.start, "00:01.000");
    /// assert_eq!(header.end, "00:02.000");
    /// assert_eq!(header.settings, " align:start");
    /// assert!(CueHeader::parse("just words").is_none());
    /// ```
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let captures = CUE_HEADER_REGEX.captures(line)?;
        Some(Self {
            start: captures.get(1)?.as_str(),
            end: captures.get(2)?.as_str(),
            settings: captures.get(3).map_or("", |m| m.as_str()),
        })
    }

    /// Scan the trailing settings into ordered pairs
    #[must_use]
    pub fn cue_settings(&self) -> CueSettings {
        parse_cue_settings(self.settings)
    }
}

/// Check whether a line opens a `NOTE` comment block
#[must_use]
pub fn is_comment_start(line: &str) -> bool {
    COMMENT_BLOCK_REGEX.is_match(line)
}

/// Check whether a line opens a `STYLE` block
#[must_use]
pub fn is_style_start(line: &str) -> bool {
    line == STYLE_BLOCK_START
}

/// Collect every `name:value` token in `text`
#[must_use]
pub fn parse_cue_settings(text: &str) -> CueSettings {
    CUE_SETTING_REGEX
        .captures_iter(text)
        .filter_map(|captures| Some((captures.get(1)?.as_str(), captures.get(2)?.as_str())))
        .collect()
}
