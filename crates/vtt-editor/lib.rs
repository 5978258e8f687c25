//! Editable, tag-indexed layer for WebVTT subtitles
//!
//! `vtt-editor` builds on `vtt-core`: a parsed file becomes a [`VttDocument`]
//! whose cues expose their content per markup tag. Content is edited through
//! key-based [`CueContentHandle`]s and written back in canonical WebVTT.
//!
//! # Example
//!
//! ```
//! use vtt_editor::VttDocument;
//!
//! let mut doc = VttDocument::from_content(
//!     "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<v Ann>Hello</v>\n",
//! )?;
//!
//! let mut handle = doc.cue_contents_of_tag("v").remove(0);
//! doc.rename_tag(&mut handle, "i")?;
//! doc.set_content(&mut handle, "Goodbye")?;
//!
//! assert_eq!(
//!     doc.to_vtt_string(),
//!     "WEBVTT\n\n000:00:01.000 --> 000:00:02.000\n<i>Goodbye</i>\n\n"
//! );
//! # Ok::<(), vtt_editor::EditorError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod core;
pub mod formats;

// Re-export vtt-core types as first-class citizens
pub use vtt_core::parser::ast::{Cue, CueSettings, TagContent, TEXT_TAG};
pub use vtt_core::parser::{ParseIssue, ParserConfig};
pub use vtt_core::timeline::{CuesWithTiming, OutputOptions, Timeline};

// Public API exports
pub use core::{CueContentHandle, CueKey, EditorError, Result, VttDocument};
pub use formats::{
    write_document, FormatExporter, FormatImporter, FormatInfo, FormatOptions, FormatResult,
    WebVttFormat,
};
