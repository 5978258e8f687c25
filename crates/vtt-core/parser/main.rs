//! Block-level parser state machine
//!
//! Pulls lines from a [`LineSource`], splits the file into header, comment,
//! style and cue blocks, and folds each cue body into tag buckets. Bad cues
//! are dropped and recorded as issues; only structural violations abort.

use log::{debug, warn};

use super::{
    ast::Cue,
    cue_header::{is_comment_start, is_style_start, CueHeader, WEBVTT_SIGNATURE},
    errors::{IssueCategory, ParseError, ParseIssue},
    ParsedVtt,
};
use crate::{markup::fold_cue_text, source::LineSource, utils::parse_timestamp_us, Result};

/// Cursor position paired with the line count at that position
type Mark = (usize, usize);

/// Internal parser state
pub(super) struct Parser<'s, S: LineSource> {
    /// Line source being consumed
    source: &'s mut S,
    /// Number of lines read so far (the current line number, 1-based)
    line: usize,
    /// Whether a cue timing line has been consumed
    seen_cue: bool,
    cues: Vec<Cue>,
    style_blocks: Vec<String>,
    issues: Vec<ParseIssue>,
}

impl<'s, S: LineSource> Parser<'s, S> {
    pub fn new(source: &'s mut S) -> Self {
        Self {
            source,
            line: 0,
            seen_cue: false,
            cues: Vec::new(),
            style_blocks: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Parse the whole source
    pub fn parse(mut self) -> Result<ParsedVtt> {
        self.parse_header()?;

        while let Some(line) = self.read_line() {
            if is_blank(&line) {
                continue;
            }

            if is_style_start(&line) {
                if self.seen_cue {
                    return Err(ParseError::StyleAfterCue { line: self.line }.into());
                }
                self.read_style_block();
            } else if is_comment_start(&line) {
                debug!("skipping comment block at line {}", self.line);
                self.skip_block();
            } else {
                self.parse_cue(line)?;
            }
        }

        Ok(ParsedVtt::from_parts(
            self.cues,
            self.style_blocks,
            self.issues,
        ))
    }

    /// Check the signature line and skip the rest of the header block
    fn parse_header(&mut self) -> Result<()> {
        let Some(first) = self.read_line() else {
            return Err(ParseError::InvalidHeader { found: None }.into());
        };
        if !first.starts_with(WEBVTT_SIGNATURE) {
            return Err(ParseError::InvalidHeader { found: Some(first) }.into());
        }
        self.skip_block();
        Ok(())
    }

    /// Parse one cue starting at `first_line` (identifier or timing line)
    fn parse_cue(&mut self, first_line: String) -> Result<()> {
        let second_line;
        let (id, header) = if let Some(header) = CueHeader::parse(&first_line) {
            (None, header)
        } else {
            let mark = self.mark();
            second_line = self.read_line();
            match second_line.as_deref().and_then(CueHeader::parse) {
                Some(header) => (Some(first_line.trim()), header),
                None => {
                    self.rewind(mark)?;
                    self.stray_line(&first_line, mark.1);
                    return Ok(());
                }
            }
        };

        self.seen_cue = true;
        let header_line = self.line;
        let id = id.map(str::to_owned);
        let settings = header.cue_settings();
        let timing = parse_timestamp_us(header.start)
            .and_then(|start| Ok((start, parse_timestamp_us(header.end)?)));

        let body = self.read_cue_body();
        let fold = fold_cue_text(&body);

        match timing.and_then(|(start, end)| Cue::new(start, end, fold.content)) {
            Ok(cue) => {
                if fold.aborted_blocks > 0 {
                    self.issues.push(ParseIssue::warning(
                        IssueCategory::Markup,
                        format!(
                            "unsupported tag cut short {} block(s) of cue markup",
                            fold.aborted_blocks
                        ),
                        header_line,
                    ));
                }
                let cue = cue.with_settings(settings);
                self.cues.push(match id {
                    Some(id) => cue.with_id(id),
                    None => cue,
                });
            }
            Err(err) => {
                warn!("dropping cue at line {header_line}: {err}");
                self.issues.push(ParseIssue::error(
                    IssueCategory::Timing,
                    format!("cue dropped: {err}"),
                    header_line,
                ));
            }
        }
        Ok(())
    }

    /// Read body lines up to a blank line, trimmed and joined with `\n`
    fn read_cue_body(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line() {
            if is_blank(&line) {
                break;
            }
            lines.push(line.trim().to_owned());
        }
        lines.join("\n")
    }

    fn read_style_block(&mut self) {
        let start_line = self.line;
        let mut lines = Vec::new();
        while let Some(line) = self.read_line() {
            if is_blank(&line) {
                break;
            }
            lines.push(line);
        }
        debug!("kept style block at line {start_line} ({} lines)", lines.len());
        self.style_blocks.push(lines.join("\n"));
    }

    /// Skip lines up to and including the next blank line
    fn skip_block(&mut self) {
        while let Some(line) = self.read_line() {
            if is_blank(&line) {
                break;
            }
        }
    }

    fn stray_line(&mut self, text: &str, line: usize) {
        warn!("skipping stray line {line}: {text:?}");
        self.issues.push(ParseIssue::warning(
            IssueCategory::Structure,
            format!("text {text:?} is not part of a cue"),
            line,
        ));
    }

    fn read_line(&mut self) -> Option<String> {
        let line = self.source.read_line()?;
        self.line += 1;
        Some(line)
    }

    fn mark(&self) -> Mark {
        (self.source.position(), self.line)
    }

    fn rewind(&mut self, (position, line): Mark) -> Result<()> {
        self.source.set_position(position)?;
        self.line = line;
        Ok(())
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
