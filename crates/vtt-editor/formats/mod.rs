//! Format import/export functionality for subtitle files.
//!
//! Defines the importer/exporter traits and the options shared by them.
//! WebVTT is the only format; it reuses vtt-core's parser for import.

pub mod webvtt;

pub use webvtt::{check_writable, write_document, WebVttFormat};

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use vtt_core::parser::ParserConfig;

use crate::core::{EditorError, VttDocument};

/// Metadata about a subtitle format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format name (e.g., "WebVTT")
    pub name: String,
    /// File extensions supported by this format
    pub extensions: Vec<String>,
    /// MIME type for this format
    pub mime_type: String,
}

/// Configuration options for format import/export operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Charset and size limit used on import
    pub parser: ParserConfig,
    /// Also write cue identifiers and settings on export
    pub preserve_cue_metadata: bool,
}

/// Result of an import/export operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatResult {
    /// Number of cues processed
    pub cues_processed: usize,
    /// Warnings encountered during processing
    pub warnings: Vec<String>,
}

impl FormatResult {
    #[must_use]
    pub fn success(cues_processed: usize) -> Self {
        Self {
            cues_processed,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Trait for importing subtitle files into a `VttDocument`
pub trait FormatImporter: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn format_info(&self) -> &FormatInfo;

    /// Check if this importer can handle the given file extension
    fn can_import(&self, extension: &str) -> bool {
        self.format_info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Import from a reader with the given options
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading fails or the parser's errors.
    fn import_from_reader(
        &self,
        reader: &mut dyn Read,
        options: &FormatOptions,
    ) -> Result<(VttDocument, FormatResult), EditorError>;

    /// Import from a file path
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened.
    fn import_from_path(
        &self,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<(VttDocument, FormatResult), EditorError> {
        let mut file = std::fs::File::open(path)
            .map_err(|e| EditorError::IoError(format!("Failed to open file: {e}")))?;
        self.import_from_reader(&mut file, options)
    }

    /// Import from a string
    ///
    /// # Errors
    ///
    /// Returns the parser's errors.
    fn import_from_string(
        &self,
        content: &str,
        options: &FormatOptions,
    ) -> Result<(VttDocument, FormatResult), EditorError> {
        let mut cursor = std::io::Cursor::new(content.as_bytes());
        self.import_from_reader(&mut cursor, options)
    }
}

/// Trait for exporting a `VttDocument` to subtitle files
pub trait FormatExporter: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn format_info(&self) -> &FormatInfo;

    /// Check if this exporter can handle the given file extension
    fn can_export(&self, extension: &str) -> bool {
        self.format_info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Export to a writer with the given options
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    fn export_to_writer(
        &self,
        document: &VttDocument,
        writer: &mut dyn Write,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError>;

    /// Export to a file path
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    fn export_to_path(
        &self,
        document: &VttDocument,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| EditorError::IoError(format!("Failed to create file: {e}")))?;
        self.export_to_writer(document, &mut file, options)
    }

    /// Export to a string
    ///
    /// # Errors
    ///
    /// Returns an error if the output is not valid UTF-8.
    fn export_to_string(
        &self,
        document: &VttDocument,
        options: &FormatOptions,
    ) -> Result<(String, FormatResult), EditorError> {
        let mut buffer = Vec::new();
        let result = self.export_to_writer(document, &mut buffer, options)?;
        let content = String::from_utf8(buffer)
            .map_err(|e| EditorError::InvalidFormat(format!("Invalid UTF-8 output: {e}")))?;
        Ok((content, result))
    }
}
