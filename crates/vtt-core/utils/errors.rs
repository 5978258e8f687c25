//! Core error types for VTT-RS and cross-module error handling
//!
//! Provides the main `CoreError` enum that wraps the error types of the
//! individual modules in the crate. Designed for easy propagation with `?`.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` bloat)
//! - Fatal problems surface as `CoreError`, recoverable ones as `ParseIssue`
//! - Bounds violations are reported, never silently clamped

use core::fmt;

use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for VTT-RS core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Structural parse failure
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Timestamp text or cue timing could not be accepted
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Index query outside the valid range
    #[error("Index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Timeline export precondition violated
    #[error("Timeline error: {0}")]
    Timeline(String),

    /// Rejected configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create time error from invalid timestamp text
    pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }

    /// Create time error for a cue whose end precedes its start
    #[must_use]
    pub fn inverted_timing(start_time_us: i64, end_time_us: i64) -> Self {
        Self::InvalidTime(format!(
            "end {end_time_us}us precedes start {start_time_us}us"
        ))
    }

    /// Check if the caller can reasonably continue after this error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidTime(_) | Self::IndexOutOfBounds { .. } | Self::Config(_) => true,
            Self::Parse(_) | Self::Timeline(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_message_includes_input() {
        let err = CoreError::invalid_time("00:xx.000", "non-numeric component");
        assert_eq!(
            err.to_string(),
            "Invalid time: '00:xx.000': non-numeric component"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn parse_errors_convert_and_are_fatal() {
        let err: CoreError = ParseError::StyleAfterCue { line: 7 }.into();
        assert!(matches!(err, CoreError::Parse(_)));
        assert!(!err.is_recoverable());
    }
}
