//! Cue markup tag-stack parser
//!
//! Converts the raw text of a cue into completed [`Element`]s: one per
//! closed `<b>`, `<c.class>`, `<v Speaker>` (etc.) span, carrying the
//! entity-decoded text it enclosed. Parsing is a single left-to-right pass
//! over the markup with an explicit stack of open tags; no recursion.
//!
//! Recovery rules for malformed markup:
//!
//! - A closing tag pops frames until one with the same name is popped, and
//!   every popped frame becomes an element (`<b><i>x</b>` closes both).
//! - Void tags (`<i/>`) consume their span and produce nothing.
//! - An unsupported tag name ends the parse; what completed before it is
//!   kept and [`MarkupScan::aborted`] is set.
//! - A `<` without a matching `>` is kept as plain text.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::markup::parse_cue_markup;
//!
//! let elements = parse_cue_markup("<v Esme><b>Hi</b> there</v>");
//! assert_eq!(elements[0].tag_name, "b");
//! assert_eq!(elements[0].content, "Hi");
//! assert_eq!(elements[1].tag_name, "v");
//! assert_eq!(elements[1].voice, "Esme");
//! assert_eq!(elements[1].content, "Hi there");
//! ```

pub mod entities;
pub mod fold;

pub use entities::{decode_entity, escape_text};
pub use fold::{fold_cue_text, CueTextFold};

use ahash::AHashSet;
use log::debug;

/// Tag names the parser understands
pub const SUPPORTED_TAGS: &[&str] = &["b", "c", "i", "lang", "ruby", "rt", "u", "v"];

/// Bucket name for cue text without recognised markup
pub const TEXT_TAG: &str = "text";

/// Check whether a tag name is one of [`SUPPORTED_TAGS`]
#[must_use]
pub fn is_supported_tag(name: &str) -> bool {
    SUPPORTED_TAGS.contains(&name)
}

/// A completed markup span
///
/// Offsets index into the decoded plain text of the parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (`b`, `v`, ...) or [`TEXT_TAG`] for the fallback element
    pub tag_name: String,
    /// Annotation after the first space, e.g. the speaker of `<v Esme>`
    pub voice: String,
    /// Dot-separated classes, e.g. `{"loud"}` for `<c.loud>`
    pub classes: AHashSet<String>,
    /// Decoded text between the opening and closing tag
    pub content: String,
    /// Start offset (bytes) in the decoded text
    pub start_offset: usize,
    /// End offset (bytes, exclusive) in the decoded text
    pub end_offset: usize,
}

/// Open tag frame on the parser stack
#[derive(Debug, Clone)]
struct StartTag {
    name: String,
    voice: String,
    classes: AHashSet<String>,
    position: usize,
}

impl StartTag {
    /// Build a frame from the text between `<` and `>`
    fn parse(expression: &str, position: usize) -> Option<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return None;
        }

        let (head, voice) = match expression.split_once(' ') {
            Some((head, voice)) => (head, voice.trim()),
            None => (expression, ""),
        };
        let mut parts = head.split('.');
        let name = parts.next().unwrap_or_default();
        let classes = parts
            .filter(|class| !class.is_empty())
            .map(str::to_owned)
            .collect();

        Some(Self {
            name: name.to_owned(),
            voice: voice.to_owned(),
            classes,
            position,
        })
    }

    fn complete(self, text: &str) -> Element {
        Element {
            content: text[self.position..].to_owned(),
            start_offset: self.position,
            end_offset: text.len(),
            tag_name: self.name,
            voice: self.voice,
            classes: self.classes,
        }
    }
}

/// Raw result of scanning one markup string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupScan {
    /// Completed elements in completion order (inner spans first)
    pub elements: Vec<Element>,
    /// Decoded text with all markup removed
    pub plain_text: String,
    /// Frames still open at the end of input
    pub open_tags: usize,
    /// Whether an unsupported tag cut the parse short
    pub aborted: bool,
}

impl MarkupScan {
    /// Elements, or a single [`TEXT_TAG`] element when none were completed
    ///
    /// The fallback carries the plain text with leading dashes and
    /// surrounding whitespace removed.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        if !self.elements.is_empty() {
            return self.elements;
        }

        let content = self.plain_text.trim_start_matches('-').trim().to_owned();
        vec![Element {
            tag_name: TEXT_TAG.to_owned(),
            voice: String::new(),
            classes: AHashSet::new(),
            content,
            start_offset: 0,
            end_offset: self.plain_text.len(),
        }]
    }
}

/// Scan markup without applying the plain-text fallback
#[must_use]
pub fn scan_markup(markup: &str) -> MarkupScan {
    MarkupScanner::new(markup).run()
}

/// Parse markup into elements, falling back to one [`TEXT_TAG`] element
#[must_use]
pub fn parse_cue_markup(markup: &str) -> Vec<Element> {
    scan_markup(markup).into_elements()
}

/// Internal scanner state
struct MarkupScanner<'a> {
    markup: &'a str,
    pos: usize,
    text: String,
    stack: Vec<StartTag>,
    elements: Vec<Element>,
    aborted: bool,
}

impl<'a> MarkupScanner<'a> {
    fn new(markup: &'a str) -> Self {
        Self {
            markup,
            pos: 0,
            text: String::with_capacity(markup.len()),
            stack: Vec::new(),
            elements: Vec::new(),
            aborted: false,
        }
    }

    fn run(mut self) -> MarkupScan {
        while self.pos < self.markup.len() {
            let rest = &self.markup[self.pos..];
            match rest.as_bytes()[0] {
                b'<' => {
                    if !self.consume_tag() {
                        break;
                    }
                }
                b'&' => self.consume_entity(),
                _ => {
                    let run = rest.find(['<', '&']).unwrap_or(rest.len());
                    self.text.push_str(&rest[..run]);
                    self.pos += run;
                }
            }
        }

        MarkupScan {
            elements: self.elements,
            plain_text: self.text,
            open_tags: self.stack.len(),
            aborted: self.aborted,
        }
    }

    /// Consume a `<...>` span; returns false when parsing must stop
    fn consume_tag(&mut self) -> bool {
        let lt = self.pos;
        let Some(gt) = self.markup[lt + 1..].find('>').map(|i| lt + 1 + i) else {
            self.text.push_str(&self.markup[lt..]);
            self.pos = self.markup.len();
            return true;
        };
        self.pos = gt + 1;

        let bytes = self.markup.as_bytes();
        let closing = bytes[lt + 1] == b'/';
        let void = gt > lt + 1 && bytes[gt - 1] == b'/';
        let start = lt + if closing { 2 } else { 1 };
        let end = if void { gt - 1 } else { gt };
        if start >= end {
            return true;
        }

        let expression = &self.markup[start..end];
        let name = expression
            .trim()
            .split([' ', '.'])
            .next()
            .unwrap_or_default();
        if name.is_empty() {
            return true;
        }
        if !is_supported_tag(name) {
            debug!("unsupported tag <{expression}> ends markup parse");
            self.aborted = true;
            return false;
        }

        if closing {
            self.close(name);
        } else if !void {
            if let Some(tag) = StartTag::parse(expression, self.text.len()) {
                self.stack.push(tag);
            }
        }
        true
    }

    /// Pop frames until one named `name` is popped, completing each
    fn close(&mut self, name: &str) {
        while let Some(tag) = self.stack.pop() {
            let matched = tag.name == name;
            self.elements.push(tag.complete(&self.text));
            if matched {
                break;
            }
        }
    }

    /// Consume a character reference terminated by `;` or a space
    fn consume_entity(&mut self) {
        let rest = &self.markup[self.pos + 1..];
        let semicolon = rest.find(';');
        let space = rest.find(' ');
        let end = match (semicolon, space) {
            (Some(semicolon), Some(space)) => Some(semicolon.min(space)),
            (semicolon, space) => semicolon.or(space),
        };

        let Some(end) = end else {
            self.text.push('&');
            self.pos += 1;
            return;
        };

        if Some(end) == space {
            self.text.push(' ');
        } else {
            let name = &rest[..end];
            match decode_entity(name) {
                Some(decoded) => self.text.push(decoded),
                None => debug!("dropping unknown character reference &{name};"),
            }
        }
        self.pos += end + 2;
    }
}
