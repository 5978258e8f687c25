//! AST definitions for parsed WebVTT files
//!
//! Unlike a markup tree, cues are stored already folded: every cue owns a
//! [`TagContent`] map from tag name to the strings found under that tag.
//! Nodes own their strings so documents can be edited after parsing.
//!
//! # Examples
//!
//! ```rust
//! use vtt_core::parser::ast::{Cue, CueSettings, TagContent, TEXT_TAG};
//!
//! let settings: CueSettings = [("align", "start")].into_iter().collect();
//! let cue = Cue::new(0, 1_000_000, TagContent::single(TEXT_TAG, "Hi"))?
//!     .with_settings(settings);
//! assert_eq!(cue.text(), ["Hi"]);
//! # Ok::<(), vtt_core::CoreError>(())
//! ```

mod cue;
mod settings;

pub use cue::{Cue, TagContent};
pub use settings::CueSettings;

pub use crate::markup::TEXT_TAG;
