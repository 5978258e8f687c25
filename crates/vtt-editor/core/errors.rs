//! Error types for the vtt-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from vtt-core
//! and adds the failures specific to editing a document through handles.

use core::fmt;

use thiserror::Error;
use vtt_core::utils::errors::CoreError;

use super::CueKey;

/// Main error type for vtt-editor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Errors from vtt-core
    #[error(transparent)]
    Core(CoreError),

    /// Handle refers to a cue that is no longer in the document
    #[error("Cue not found: {key}")]
    CueNotFound { key: CueKey },

    /// Handle slot lies past the end of its tag bucket
    #[error("No content at slot {slot} of tag '{tag}' (bucket length: {len})")]
    ContentSlotMissing { tag: String, slot: usize, len: usize },

    /// Tag name the parser would not read back
    #[error("Unsupported tag '{tag}'")]
    UnsupportedTag { tag: String },

    /// Content that would change or be lost when written and read back
    #[error("Content for tag '{tag}' cannot be written: {reason}")]
    UnwritableContent { tag: String, reason: String },

    /// Import/export error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid format error
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl EditorError {
    /// Create a new IO error
    pub fn io<T: fmt::Display>(message: T) -> Self {
        Self::IoError(message.to_string())
    }

    /// Check if error is recoverable
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_recoverable(),
            Self::CueNotFound { .. }
            | Self::ContentSlotMissing { .. }
            | Self::UnsupportedTag { .. }
            | Self::UnwritableContent { .. } => true,
            Self::IoError(_) | Self::InvalidFormat(_) => false,
        }
    }
}

impl From<CoreError> for EditorError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<vtt_core::ParseError> for EditorError {
    fn from(err: vtt_core::ParseError) -> Self {
        Self::Core(CoreError::Parse(err))
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;
