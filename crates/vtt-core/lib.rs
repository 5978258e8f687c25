//! # VTT-RS Core
//!
//! WebVTT subtitle parser with a forgiving markup tag-stack parser and a
//! binary-searchable event-time index. Cue bodies are folded into
//! tag-indexed content (`<v>`, `<b>`, `<c.class>`, ... plus untagged
//! `"text"`) ready for editing and re-serialization by `vtt-editor`.
//!
//! ## Features
//!
//! - **Permissive parsing**: bad cues are dropped and reported as issues
//! - **Mismatch recovery**: `<b><i>text</b>` closes both tags
//! - **Charset aware**: UTF-8 and UTF-16 input with byte-order mark detection
//! - **Event-time index**: active-cue queries and non-overlapping window export
//!
//! ## Quick Start
//!
//! ```rust
//! use vtt_core::{parser::ParsedVtt, timeline::EventTimeline};
//!
//! let text = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\n<v Ann>Hello <b>there</b></v>\n";
//!
//! let parsed = ParsedVtt::parse(text)?;
//! let cue = &parsed.cues()[0];
//! assert_eq!(cue.content_for_tag("b"), ["there"]);
//! assert_eq!(cue.content_for_tag("v"), ["Hello there"]);
//!
//! let timeline = parsed.timeline();
//! assert_eq!(timeline.active_cues(2_000_000).len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod markup;
pub mod parser;
pub mod source;
pub mod timeline;
pub mod utils;

pub use markup::{Element, TEXT_TAG};
pub use parser::{Cue, CueSettings, ParseError, ParseIssue, ParsedVtt, ParserConfig, TagContent};
pub use source::{ByteLineReader, Charset, LineSource};
pub use timeline::{CuesWithTiming, EventTimeline, OutputOptions, Timeline};
pub use utils::{format_timestamp_us, parse_timestamp_us, CoreError};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
///
/// # Examples
///
/// ```rust
/// use vtt_core::{ParsedVtt, Result};
///
/// fn cue_count(input: &str) -> Result<usize> {
///     Ok(ParsedVtt::parse(input)?.cues().len())
/// }
/// assert_eq!(cue_count("WEBVTT\n").unwrap(), 0);
/// ```
pub type Result<T> = core::result::Result<T, CoreError>;
