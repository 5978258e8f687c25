//! Parser error types for WebVTT parsing
//!
//! Provides fatal `ParseError` values and recoverable `ParseIssue` records.
//!
//! # Error Philosophy
//!
//! - Prefer recovery over failure where possible: a bad cue is dropped and
//!   reported, the rest of the file still parses
//! - Only format-level violations (signature, block ordering, size) abort
//! - Provide line information for editor integration

use core::fmt;

use thiserror::Error;

/// Primary parse error type for WebVTT files
///
/// Represents unrecoverable parsing errors that prevent document construction.
/// Use `ParseIssue` for recoverable warnings and errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First line does not start with the `WEBVTT` signature
    #[error("Expected WEBVTT signature, found {found:?}")]
    InvalidHeader { found: Option<String> },

    /// A `STYLE` block appeared after the first cue
    #[error("A style block was found after the first cue (line {line})")]
    StyleAfterCue { line: usize },

    /// Input too large for processing
    #[error("Input size {size} bytes exceeds limit {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

/// Parse issue severity levels for partial recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Content was altered or dropped in a tolerated way
    Warning,

    /// A whole cue or block was discarded
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Issue categories for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Block structure problems (stray lines, unterminated blocks)
    Structure,

    /// Timestamp and cue timing problems
    Timing,

    /// Cue markup that was dropped or truncated
    Markup,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Timing => write!(f, "timing"),
            Self::Markup => write!(f, "markup"),
        }
    }
}

/// Parse issue for recoverable problems and warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Issue severity level
    pub severity: IssueSeverity,

    /// Issue category for filtering/grouping
    pub category: IssueCategory,

    /// Human-readable message
    pub message: String,

    /// Line number where issue occurred (1-based)
    pub line: usize,
}

impl ParseIssue {
    /// Create new parse issue
    #[must_use]
    pub const fn new(
        severity: IssueSeverity,
        category: IssueCategory,
        message: String,
        line: usize,
    ) -> Self {
        Self {
            severity,
            category,
            message,
            line,
        }
    }

    /// Create warning issue
    #[must_use]
    pub const fn warning(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Warning, category, message, line)
    }

    /// Create error issue
    #[must_use]
    pub const fn error(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Error, category, message, line)
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] line {}: {}",
            self.severity, self.category, self.line, self.message
        )
    }
}
