//! Main document type for the editor
//!
//! [`VttDocument`] owns a timing-sorted list of cues together with a stable
//! key per cue. Content is read and edited through [`CueContentHandle`]s,
//! which name a cue by key rather than by reference, so the document can be
//! mutated freely while handles are held.

use core::{cmp::Ordering, slice};
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::{debug, warn};
use vtt_core::{
    parser::{ParseIssue, ParsedVtt, ParserConfig},
    timeline::{to_cues_with_timing, CuesWithTiming, OutputOptions, Timeline},
    CoreError, Cue, TagContent,
};

use super::{
    errors::{EditorError, Result},
    handle::{CueContentHandle, CueKey},
};
use crate::formats::check_writable;

/// Editable WebVTT document
///
/// # Examples
///
/// ```
/// use vtt_editor::VttDocument;
///
/// let mut doc = VttDocument::from_content("WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<v Ann>Hi</v>\n")?;
/// let mut handle = doc.add_cue(0, 2_000_000, "v", "Before")?;
/// doc.set_content(&mut handle, "Earlier")?;
///
/// assert_eq!(doc.cues()[0].content_for_tag("v"), ["Earlier"]);
/// assert!(doc.to_vtt_string().starts_with("WEBVTT\n\n000:00:00.000 --> 000:00:02.000\n<v>Earlier</v>"));
/// # Ok::<(), vtt_editor::EditorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VttDocument {
    /// Cues in timing order
    cues: Vec<Cue>,

    /// Key of the cue at the same index in `cues`
    keys: Vec<CueKey>,

    /// Next key to hand out
    next_key: u64,

    /// Style block bodies retained from the source
    style_blocks: Vec<String>,

    /// Issues recorded while parsing the source
    issues: Vec<ParseIssue>,

    /// File path the document was loaded from or last saved to
    file_path: Option<PathBuf>,

    /// Whether the document changed since it was loaded or saved
    modified: bool,
}

impl VttDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from UTF-8 text
    ///
    /// # Errors
    ///
    /// Returns the parser's structural errors (missing signature, style
    /// block after a cue).
    pub fn from_content(content: &str) -> Result<Self> {
        Ok(Self::from_parsed(ParsedVtt::parse(content)?))
    }

    /// Parse a document from raw bytes
    ///
    /// # Errors
    ///
    /// Returns the parser's structural errors or an input size error.
    pub fn from_bytes(bytes: &[u8], config: &ParserConfig) -> Result<Self> {
        Ok(Self::from_parsed(ParsedVtt::parse_bytes(bytes, config)?))
    }

    /// Build a document from a parse result, sorting cues into timing order
    #[must_use]
    pub fn from_parsed(parsed: ParsedVtt) -> Self {
        let (cues, style_blocks, issues) = parsed.into_parts();
        let mut doc = Self {
            style_blocks,
            issues,
            ..Self::default()
        };
        for cue in cues {
            let key = doc.allocate_key();
            doc.cues.push(cue);
            doc.keys.push(key);
        }
        doc.sort_cues();
        doc.modified = false;
        doc
    }

    /// Load a document from a file
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::IoError`] if the file cannot be read, or the
    /// parser's errors for its content.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| EditorError::IoError(e.to_string()))?;
        let mut doc = Self::from_bytes(&bytes, &ParserConfig::default())?;
        debug!("loaded {} cues from {}", doc.len(), path.display());
        doc.file_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Save document to the path it was loaded from or last saved to
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::IoError`] if no path is known or writing fails.
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = self.file_path.clone() {
            self.save_to_file(path)
        } else {
            Err(EditorError::IoError(
                "No file path set for document".to_string(),
            ))
        }
    }

    /// Save document to a specific file path and remember it
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::IoError`] if the file cannot be written.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_vtt_string())
            .map_err(|e| EditorError::IoError(e.to_string()))?;
        self.modified = false;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Render the document as WebVTT text
    #[must_use]
    pub fn to_vtt_string(&self) -> String {
        crate::formats::webvtt::to_string(self)
    }

    /// Cues in timing order
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Keys in the same order as [`Self::cues`]
    #[must_use]
    pub fn keys(&self) -> &[CueKey] {
        &self.keys
    }

    /// Cues paired with their keys
    pub fn iter(&self) -> impl Iterator<Item = (CueKey, &Cue)> {
        self.keys.iter().copied().zip(self.cues.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue with the given key
    #[must_use]
    pub fn cue(&self, key: CueKey) -> Option<&Cue> {
        self.index_of(key).map(|index| &self.cues[index])
    }

    #[must_use]
    pub fn style_blocks(&self) -> &[String] {
        &self.style_blocks
    }

    /// Issues recorded when the document was parsed
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Insert a new cue holding one string under `tag`
    ///
    /// The cue goes after every cue that starts earlier, or starts at the
    /// same time and ends no earlier, so a shorter cue follows a longer one
    /// sharing its start.
    ///
    /// # Errors
    ///
    /// Returns a core timing error if either time is not a whole
    /// millisecond, `start_time_us` is negative or `end_time_us` precedes
    /// it. Returns [`EditorError::UnsupportedTag`] or
    /// [`EditorError::UnwritableContent`] when the cue could not be saved
    /// and read back unchanged.
    pub fn add_cue(
        &mut self,
        start_time_us: i64,
        end_time_us: i64,
        tag: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<CueContentHandle> {
        let tag = tag.into();
        let content = content.into();
        check_whole_millis(start_time_us)?;
        check_whole_millis(end_time_us)?;
        check_writable(&tag, slice::from_ref(&content))?;
        let cue = Cue::new(
            start_time_us,
            end_time_us,
            TagContent::single(tag.clone(), content.clone()),
        )?;

        let index = self
            .cues
            .partition_point(|existing| cue_order(existing, &cue) != Ordering::Greater);
        let key = self.allocate_key();
        self.cues.insert(index, cue);
        self.keys.insert(index, key);
        self.modified = true;

        Ok(CueContentHandle {
            key,
            tag,
            slot: 0,
            content,
        })
    }

    /// Remove a cue, returning it
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] if the key is unknown.
    pub fn remove_cue(&mut self, key: CueKey) -> Result<Cue> {
        let index = self.index_of(key).ok_or(EditorError::CueNotFound { key })?;
        self.keys.remove(index);
        self.modified = true;
        Ok(self.cues.remove(index))
    }

    /// Strings stored under `tag` on the cue `key`, empty if absent
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] if the key is unknown.
    pub fn contents_for_tag(&self, key: CueKey, tag: &str) -> Result<&[String]> {
        self.cue(key)
            .map(|cue| cue.content_for_tag(tag))
            .ok_or(EditorError::CueNotFound { key })
    }

    /// A handle for every string stored under `tag`, in cue order
    #[must_use]
    pub fn cue_contents_of_tag(&self, tag: &str) -> Vec<CueContentHandle> {
        self.iter()
            .flat_map(|(key, cue)| {
                cue.content_for_tag(tag)
                    .iter()
                    .enumerate()
                    .map(move |(slot, content)| CueContentHandle {
                        key,
                        tag: tag.to_owned(),
                        slot,
                        content: content.clone(),
                    })
            })
            .collect()
    }

    /// Every tag used in the document, in first-seen order
    #[must_use]
    pub fn tags(&self) -> IndexSet<&str> {
        self.cues
            .iter()
            .flat_map(|cue| cue.content().tags())
            .collect()
    }

    /// Replace the string a handle points to
    ///
    /// If the cue no longer has the handle's tag, the bucket is recreated
    /// with the new string as its only entry.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] for a stale key,
    /// [`EditorError::ContentSlotMissing`] when the bucket has shrunk below
    /// the handle's slot and [`EditorError::UnwritableContent`] when the
    /// edited bucket would not read back unchanged. A rejected edit leaves
    /// the document untouched.
    pub fn set_content(
        &mut self,
        handle: &mut CueContentHandle,
        content: impl Into<String>,
    ) -> Result<()> {
        let content = content.into();
        let tags = self.cue_mut(handle.key)?.content_mut();

        if let Some(bucket) = tags.get_mut(&handle.tag) {
            if handle.slot >= bucket.len() {
                return Err(EditorError::ContentSlotMissing {
                    tag: handle.tag.clone(),
                    slot: handle.slot,
                    len: bucket.len(),
                });
            }
            let mut edited = bucket.clone();
            edited[handle.slot].clone_from(&content);
            check_writable(&handle.tag, &edited)?;
            *bucket = edited;
        } else {
            check_writable(&handle.tag, slice::from_ref(&content))?;
            tags.push(handle.tag.clone(), content.clone());
            handle.slot = 0;
        }

        handle.content = content;
        self.modified = true;
        Ok(())
    }

    /// Move the handle's whole tag bucket to `new_tag`
    ///
    /// An existing bucket under `new_tag` is replaced, not merged; the
    /// replacement is logged at warn level. When the handle's bucket is
    /// gone, the new bucket holds just the handle's content.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] for a stale key,
    /// [`EditorError::UnsupportedTag`] for a tag the parser would not read
    /// back and [`EditorError::UnwritableContent`] when the bucket cannot be
    /// written under `new_tag` (narration entries are single lines).
    pub fn rename_tag(
        &mut self,
        handle: &mut CueContentHandle,
        new_tag: impl Into<String>,
    ) -> Result<()> {
        let new_tag = new_tag.into();
        if new_tag == handle.tag {
            return Ok(());
        }

        let key = handle.key;
        let tags = self.cue_mut(key)?.content_mut();
        let bucket = tags
            .get(&handle.tag)
            .map_or_else(|| vec![handle.content.clone()], <[String]>::to_vec);
        check_writable(&new_tag, &bucket)?;

        tags.remove(&handle.tag);
        if let Some(replaced) = tags.insert(new_tag.clone(), bucket) {
            warn!(
                "renaming '{}' to '{new_tag}' on {key} replaced {} existing entries",
                handle.tag,
                replaced.len()
            );
        }

        handle.tag = new_tag;
        self.modified = true;
        Ok(())
    }

    /// Move the start of the handle's cue without re-sorting
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] for a stale key or a core timing
    /// error if the time is not a whole millisecond or the cue would end
    /// before it starts.
    pub fn set_start_time_us(&mut self, handle: &CueContentHandle, start_time_us: i64) -> Result<()> {
        check_whole_millis(start_time_us)?;
        self.cue_mut(handle.key)?.set_start_time_us(start_time_us)?;
        self.modified = true;
        Ok(())
    }

    /// Move the end of the handle's cue without re-sorting
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CueNotFound`] for a stale key or a core timing
    /// error if the time is not a whole millisecond or the cue would end
    /// before it starts.
    pub fn set_end_time_us(&mut self, handle: &CueContentHandle, end_time_us: i64) -> Result<()> {
        check_whole_millis(end_time_us)?;
        self.cue_mut(handle.key)?.set_end_time_us(end_time_us)?;
        self.modified = true;
        Ok(())
    }

    /// Restore timing order after timing edits; stable for equal cues
    pub fn sort_cues(&mut self) {
        let mut entries: Vec<(CueKey, Cue)> = self
            .keys
            .drain(..)
            .zip(self.cues.drain(..))
            .collect();
        entries.sort_by(|(_, a), (_, b)| cue_order(a, b));
        (self.keys, self.cues) = entries.into_iter().unzip();
    }

    /// Event-time index over the current cues
    #[must_use]
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(&self.cues)
    }

    /// Emit the current cues as timed windows
    ///
    /// # Errors
    ///
    /// Propagates [`vtt_core::CoreError::Timeline`] from the export routine.
    pub fn to_cues_with_timing<'a, F>(&'a self, options: OutputOptions, sink: F) -> Result<()>
    where
        F: FnMut(CuesWithTiming<'a>),
    {
        to_cues_with_timing(&self.timeline(), options, sink)?;
        Ok(())
    }

    fn allocate_key(&mut self) -> CueKey {
        let key = CueKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn index_of(&self, key: CueKey) -> Option<usize> {
        self.keys.iter().position(|&candidate| candidate == key)
    }

    fn cue_mut(&mut self, key: CueKey) -> Result<&mut Cue> {
        let index = self.index_of(key).ok_or(EditorError::CueNotFound { key })?;
        Ok(&mut self.cues[index])
    }
}

/// Edited times must survive the millisecond timestamps the writer emits
fn check_whole_millis(time_us: i64) -> Result<()> {
    if time_us % 1_000 == 0 {
        Ok(())
    } else {
        Err(CoreError::invalid_time(format!("{time_us}us"), "not a whole millisecond").into())
    }
}

/// Start ascending, then longer cues first
fn cue_order(a: &Cue, b: &Cue) -> Ordering {
    a.start_time_us()
        .cmp(&b.start_time_us())
        .then_with(|| b.end_time_us().cmp(&a.end_time_us()))
}
