//! Key-based handles into a document's cues
//!
//! A handle names one content string by cue key, tag and slot. It holds no
//! reference to the document; every mutation goes through
//! [`VttDocument`](super::VttDocument) and checks that the target still exists.

use core::fmt;

/// Stable identifier of a cue within one document
///
/// Keys survive insertion and re-sorting; they are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CueKey(pub(crate) u64);

impl CueKey {
    /// Raw key value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cue#{}", self.0)
    }
}

/// One content string of one tag bucket of one cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueContentHandle {
    pub(crate) key: CueKey,
    pub(crate) tag: String,
    pub(crate) slot: usize,
    pub(crate) content: String,
}

impl CueContentHandle {
    /// Cue this handle points into
    #[must_use]
    pub const fn key(&self) -> CueKey {
        self.key
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Position within the tag bucket
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Content as of the last read or write through this handle
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
