//! WebVTT serializer and format handler
//!
//! Writes a document in canonical form: `WEBVTT`, retained style blocks,
//! then one block per cue with `HHH:MM:SS.mmm` timestamps. Every non-text
//! tag bucket becomes `<tag>entries</tag>` and the `"text"` bucket becomes
//! dash-prefixed lines, so parsing the output yields the same buckets.

use std::io::{Read, Write};

use vtt_core::{
    format_timestamp_us,
    markup::{escape_text, is_supported_tag},
    Cue, TEXT_TAG,
};

use super::{FormatExporter, FormatImporter, FormatInfo, FormatOptions, FormatResult};
use crate::core::{EditorError, VttDocument};

/// WebVTT format handler
#[derive(Debug)]
pub struct WebVttFormat {
    info: FormatInfo,
}

impl WebVttFormat {
    /// Create a new WebVTT format handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: FormatInfo {
                name: "WebVTT".to_string(),
                extensions: vec!["vtt".to_string(), "webvtt".to_string()],
                mime_type: "text/vtt".to_string(),
            },
        }
    }
}

impl Default for WebVttFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatImporter for WebVttFormat {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn import_from_reader(
        &self,
        reader: &mut dyn Read,
        options: &FormatOptions,
    ) -> Result<(VttDocument, FormatResult), EditorError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| EditorError::IoError(format!("Failed to read input: {e}")))?;

        let document = VttDocument::from_bytes(&bytes, &options.parser)?;
        let warnings = document
            .issues()
            .iter()
            .map(ToString::to_string)
            .collect();
        let result = FormatResult::success(document.len()).with_warnings(warnings);
        Ok((document, result))
    }
}

impl FormatExporter for WebVttFormat {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn export_to_writer(
        &self,
        document: &VttDocument,
        writer: &mut dyn Write,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError> {
        write_document_with(document, writer, options)?;
        Ok(FormatResult::success(document.len()))
    }
}

/// Write `document` in canonical form
///
/// # Errors
///
/// Returns [`EditorError::IoError`] if the writer fails.
pub fn write_document<W: Write + ?Sized>(document: &VttDocument, writer: &mut W) -> Result<(), EditorError> {
    write_document_with(document, writer, &FormatOptions::default())
}

/// Write `document`, honouring `options.preserve_cue_metadata`
///
/// # Errors
///
/// Returns [`EditorError::IoError`] if the writer fails.
pub fn write_document_with<W: Write + ?Sized>(
    document: &VttDocument,
    writer: &mut W,
    options: &FormatOptions,
) -> Result<(), EditorError> {
    let mut buffer = String::new();
    write_header(document, &mut buffer);
    writer.write_all(buffer.as_bytes()).map_err(EditorError::io)?;

    for cue in document.cues() {
        buffer.clear();
        write_cue(cue, options, &mut buffer);
        writer.write_all(buffer.as_bytes()).map_err(EditorError::io)?;
    }
    writer.flush().map_err(EditorError::io)
}

/// Render `document` in canonical form
#[must_use]
pub fn to_string(document: &VttDocument) -> String {
    let options = FormatOptions::default();
    let mut out = String::new();
    write_header(document, &mut out);
    for cue in document.cues() {
        write_cue(cue, &options, &mut out);
    }
    out
}

fn write_header(document: &VttDocument, out: &mut String) {
    out.push_str("WEBVTT\n\n");
    for style in document.style_blocks() {
        out.push_str("STYLE\n");
        out.push_str(style);
        out.push_str("\n\n");
    }
}

fn write_cue(cue: &Cue, options: &FormatOptions, out: &mut String) {
    if options.preserve_cue_metadata {
        if let Some(id) = cue.id() {
            out.push_str(id);
            out.push('\n');
        }
    }

    out.push_str(&format_timestamp_us(cue.start_time_us()));
    out.push_str(" --> ");
    out.push_str(&format_timestamp_us(cue.end_time_us()));
    if options.preserve_cue_metadata && !cue.settings().is_empty() {
        out.push(' ');
        out.push_str(&cue.settings().to_string());
    }
    out.push('\n');

    let mut wrote_tags = false;
    for (tag, contents) in cue.content().iter() {
        if tag == TEXT_TAG {
            continue;
        }
        out.push('<');
        out.push_str(tag);
        out.push('>');
        push_joined(out, contents, "\n");
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        wrote_tags = true;
    }

    if let Some(text) = cue.content().get(TEXT_TAG) {
        if wrote_tags {
            out.push('\n');
        }
        out.push_str("- ");
        push_joined(out, text, "\n -");
    }

    out.push_str("\n\n");
}

/// Check that a tag bucket reads back unchanged once written
///
/// Body lines are trimmed on parse and a blank line ends the cue, so a tag
/// bucket (one element, entries joined by `\n`) must not put whitespace at
/// an inner line edge or leave an inner line empty. Narration entries are
/// single trimmed lines; after the first, a leading `-` would be taken for
/// the line marker.
///
/// # Errors
///
/// Returns [`EditorError::UnsupportedTag`] for a tag the parser rejects and
/// [`EditorError::UnwritableContent`] for content that would not survive.
pub fn check_writable(tag: &str, entries: &[String]) -> Result<(), EditorError> {
    if tag != TEXT_TAG && !is_supported_tag(tag) {
        return Err(EditorError::UnsupportedTag {
            tag: tag.to_string(),
        });
    }
    let unwritable = |reason: &str| EditorError::UnwritableContent {
        tag: tag.to_string(),
        reason: reason.to_string(),
    };

    if entries.iter().any(|entry| entry.contains('\r')) {
        return Err(unwritable("carriage return"));
    }

    if tag == TEXT_TAG {
        for (index, entry) in entries.iter().enumerate() {
            if entry.contains('\n') {
                return Err(unwritable("line break in narration"));
            }
            if entry.trim() != entry {
                return Err(unwritable("leading or trailing whitespace"));
            }
            if index > 0 && entry.starts_with('-') {
                return Err(unwritable("narration after the first line starts with '-'"));
            }
        }
        return Ok(());
    }

    let joined = entries.join("\n");
    let lines: Vec<&str> = joined.split('\n').collect();
    let last = lines.len() - 1;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 && index < last && line.trim().is_empty() {
            return Err(unwritable("blank line"));
        }
        if index > 0 && line.starts_with(|c: char| c.is_whitespace() || c == '\u{feff}') {
            return Err(unwritable("whitespace at the start of a line"));
        }
        if index < last && line.ends_with(char::is_whitespace) {
            return Err(unwritable("whitespace at the end of a line"));
        }
    }
    Ok(())
}

fn push_joined(out: &mut String, contents: &[String], separator: &str) {
    for (index, content) in contents.iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        out.push_str(&escape_text(content));
    }
}
