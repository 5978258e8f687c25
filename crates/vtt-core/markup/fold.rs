//! Folding a multi-line cue body into tag buckets

use super::scan_markup;
use crate::parser::ast::TagContent;

/// Tag buckets built from one cue body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTextFold {
    /// Element contents grouped by tag name
    pub content: TagContent,
    /// Blocks whose markup was cut short by an unsupported tag
    pub aborted_blocks: usize,
}

/// Fold a cue body into tag buckets, block by block
///
/// A block starts at a line and keeps absorbing the following lines while
/// supported tags remain open, so an element spanning several lines keeps
/// its line breaks. Each block contributes its elements, or its fallback
/// `"text"` element when it has none.
///
/// # Example
///
/// ```rust
/// use vtt_core::markup::fold_cue_text;
///
/// let fold = fold_cue_text("<i>first\nsecond</i>\n- narration");
/// assert_eq!(fold.content.get("i"), Some(&["first\nsecond".to_string()][..]));
/// assert_eq!(fold.content.get("text"), Some(&["narration".to_string()][..]));
/// ```
#[must_use]
pub fn fold_cue_text(text: &str) -> CueTextFold {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut fold = CueTextFold::default();

    let mut index = 0;
    while index < lines.len() {
        let mut block = lines[index].to_owned();
        let mut scan = scan_markup(&block);
        index += 1;

        while scan.open_tags > 0 && !scan.aborted && index < lines.len() {
            block.push('\n');
            block.push_str(lines[index]);
            scan = scan_markup(&block);
            index += 1;
        }

        if scan.aborted {
            fold.aborted_blocks += 1;
        }
        for element in scan.into_elements() {
            fold.content.push(element.tag_name, element.content);
        }
    }

    fold
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_body_has_empty_text_bucket() {
        let fold = fold_cue_text("");
        assert_eq!(fold.content, TagContent::single("text", ""));
    }

    #[test]
    fn each_plain_line_is_one_entry() {
        let fold = fold_cue_text("- one\n -two");
        assert_eq!(fold.content.get("text").unwrap(), ["one", "two"]);
    }

    #[test]
    fn tag_buckets_come_before_later_text() {
        let fold = fold_cue_text("<v Bob>Hi</v><b>there</b>\n- aside");
        assert_eq!(fold.content.tags().collect::<Vec<_>>(), ["v", "b", "text"]);
    }

    #[test]
    fn unclosed_tag_absorbs_rest_of_body() {
        let fold = fold_cue_text("<b>never closed\nsecond line");
        assert_eq!(
            fold.content.get("text").unwrap(),
            ["never closed\nsecond line"]
        );
    }

    #[test]
    fn aborted_blocks_are_counted() {
        let fold = fold_cue_text("<b>ok</b>\n<font>gone</font>\n<i>fine</i>");
        assert_eq!(fold.aborted_blocks, 1);
        assert_eq!(fold.content.get("b").unwrap(), ["ok"]);
        assert_eq!(fold.content.get("i").unwrap(), ["fine"]);
        assert_eq!(fold.content.get("text").unwrap(), [""]);
    }
}
