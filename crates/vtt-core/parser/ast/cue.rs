//! Cue AST node and its tag-indexed content
//!
//! A [`Cue`] is a timed unit whose text has already been folded from markup
//! into [`TagContent`]: one ordered bucket of strings per tag name, with the
//! `"text"` bucket holding lines without recognised markup.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CueSettings;
use crate::{markup::TEXT_TAG, utils::CoreError, Result};

/// Tag name to ordered content strings, in first-seen tag order
///
/// # Examples
///
/// ```rust
/// # use vtt_core::parser::ast::TagContent;
/// let mut content = TagContent::new();
/// content.push("v", "Hello");
/// content.push("text", "narration");
/// content.push("v", "again");
///
/// assert_eq!(content.get("v"), Some(&["Hello".to_string(), "again".to_string()][..]));
/// assert_eq!(content.tags().collect::<Vec<_>>(), ["v", "text"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagContent {
    buckets: IndexMap<String, Vec<String>>,
}

impl TagContent {
    /// Create content with no buckets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create content with a single bucket holding one string
    #[must_use]
    pub fn single(tag: impl Into<String>, content: impl Into<String>) -> Self {
        let mut tags = Self::new();
        tags.push(tag, content);
        tags
    }

    /// Append a string to the bucket for `tag`, creating it if needed
    pub fn push(&mut self, tag: impl Into<String>, content: impl Into<String>) {
        self.buckets
            .entry(tag.into())
            .or_default()
            .push(content.into());
    }

    /// Replace the whole bucket for `tag`, returning the previous one
    ///
    /// A new tag is appended after existing ones; an existing tag keeps
    /// its position.
    pub fn insert(&mut self, tag: impl Into<String>, contents: Vec<String>) -> Option<Vec<String>> {
        self.buckets.insert(tag.into(), contents)
    }

    /// Remove a bucket, keeping the order of the remaining tags
    pub fn remove(&mut self, tag: &str) -> Option<Vec<String>> {
        self.buckets.shift_remove(tag)
    }

    /// Bucket for `tag`
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.buckets.get(tag).map(Vec::as_slice)
    }

    /// Mutable bucket for `tag`
    pub fn get_mut(&mut self, tag: &str) -> Option<&mut Vec<String>> {
        self.buckets.get_mut(tag)
    }

    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.buckets.contains_key(tag)
    }

    /// Tag names in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Buckets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(tag, contents)| (tag.as_str(), contents.as_slice()))
    }

    /// Number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Timed unit of subtitle content
///
/// Times are microsecond offsets from the start of the file and always
/// satisfy `end_time_us >= start_time_us`.
///
/// # Examples
///
/// ```rust
/// use vtt_core::parser::ast::{Cue, TagContent};
///
/// let cue = Cue::new(1_000_000, 2_500_000, TagContent::single("text", "Hello"))?
///     .with_id("intro");
/// assert_eq!(cue.duration_us(), 1_500_000);
/// assert!(cue.is_active_at(1_000_000));
/// assert!(!cue.is_active_at(2_500_000));
/// # Ok::<(), vtt_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cue {
    id: Option<String>,
    start_time_us: i64,
    end_time_us: i64,
    settings: CueSettings,
    content: TagContent,
}

impl Cue {
    /// Create a cue after checking its timing
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTime`] if `start_time_us` is negative or
    /// `end_time_us` precedes it.
    pub fn new(start_time_us: i64, end_time_us: i64, content: TagContent) -> Result<Self> {
        check_timing(start_time_us, end_time_us)?;
        Ok(Self {
            id: None,
            start_time_us,
            end_time_us,
            settings: CueSettings::new(),
            content,
        })
    }

    /// Attach an identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach scanned settings
    #[must_use]
    pub fn with_settings(mut self, settings: CueSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Identifier line preceding the timing line, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub const fn start_time_us(&self) -> i64 {
        self.start_time_us
    }

    #[must_use]
    pub const fn end_time_us(&self) -> i64 {
        self.end_time_us
    }

    #[must_use]
    pub const fn duration_us(&self) -> i64 {
        self.end_time_us - self.start_time_us
    }

    #[must_use]
    pub const fn settings(&self) -> &CueSettings {
        &self.settings
    }

    #[must_use]
    pub const fn content(&self) -> &TagContent {
        &self.content
    }

    /// Mutable access to the tag buckets
    pub fn content_mut(&mut self) -> &mut TagContent {
        &mut self.content
    }

    /// Strings stored under `tag`, empty if the cue has no such bucket
    #[must_use]
    pub fn content_for_tag(&self, tag: &str) -> &[String] {
        self.content.get(tag).unwrap_or_default()
    }

    /// Strings of the untagged `"text"` bucket
    #[must_use]
    pub fn text(&self) -> &[String] {
        self.content_for_tag(TEXT_TAG)
    }

    /// Whether the half-open interval `[start, end)` contains `time_us`
    #[must_use]
    pub const fn is_active_at(&self, time_us: i64) -> bool {
        self.start_time_us <= time_us && time_us < self.end_time_us
    }

    /// Move the start time
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTime`] if the new start is negative or
    /// after the current end.
    pub fn set_start_time_us(&mut self, start_time_us: i64) -> Result<()> {
        check_timing(start_time_us, self.end_time_us)?;
        self.start_time_us = start_time_us;
        Ok(())
    }

    /// Move the end time
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTime`] if the new end precedes the start.
    pub fn set_end_time_us(&mut self, end_time_us: i64) -> Result<()> {
        check_timing(self.start_time_us, end_time_us)?;
        self.end_time_us = end_time_us;
        Ok(())
    }
}

fn check_timing(start_time_us: i64, end_time_us: i64) -> Result<()> {
    if start_time_us < 0 {
        return Err(CoreError::invalid_time(start_time_us, "negative start time"));
    }
    if end_time_us < start_time_us {
        return Err(CoreError::inverted_timing(start_time_us, end_time_us));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_inverted_and_negative_timing() {
        assert!(Cue::new(2, 1, TagContent::new()).is_err());
        assert!(Cue::new(-1, 1, TagContent::new()).is_err());
        assert!(Cue::new(5, 5, TagContent::new()).is_ok());
    }

    #[test]
    fn missing_tag_reads_as_empty() {
        let cue = Cue::new(0, 1, TagContent::single("b", "bold")).unwrap();
        assert!(cue.content_for_tag("i").is_empty());
        assert!(cue.text().is_empty());
        assert_eq!(cue.content_for_tag("b"), ["bold"]);
    }

    #[test]
    fn timing_setters_keep_invariant() {
        let mut cue = Cue::new(10, 20, TagContent::new()).unwrap();
        assert!(cue.set_end_time_us(5).is_err());
        assert!(cue.set_start_time_us(25).is_err());
        cue.set_start_time_us(0).unwrap();
        cue.set_end_time_us(40).unwrap();
        assert_eq!((cue.start_time_us(), cue.end_time_us()), (0, 40));
    }

    #[test]
    fn insert_keeps_existing_tag_position() {
        let mut content = TagContent::new();
        content.push("b", "one");
        content.push("i", "two");
        content.insert("b", vec!["three".to_string()]);
        assert_eq!(content.tags().collect::<Vec<_>>(), ["b", "i"]);
        content.remove("b");
        content.insert("b", vec!["four".to_string()]);
        assert_eq!(content.tags().collect::<Vec<_>>(), ["i", "b"]);
    }
}
