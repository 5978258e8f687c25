//! Core types and structures for the vtt-editor
//!
//! This module contains the fundamental building blocks of the editor:
//! - `VttDocument`: timing-sorted cues with stable keys
//! - `CueContentHandle`: key/tag/slot address of one content string
//! - Error types for editor operations

pub mod document;
pub mod errors;
pub mod handle;

// Re-export commonly used types
pub use document::VttDocument;
pub use errors::{EditorError, Result};
pub use handle::{CueContentHandle, CueKey};
