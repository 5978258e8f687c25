//! Property-based tests for vtt-editor
//!
//! Uses proptest to check that canonical output is stable under
//! re-parsing, also after arbitrary edits, and that insertion keeps timing
//! order.

use proptest::prelude::*;
use vtt_editor::{Cue, CueContentHandle, VttDocument};

/// Word-like content without edge whitespace
fn arb_content() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]([a-zA-Z0-9 ]{0,10}[a-zA-Z0-9])?"
}

/// One cue block body: a run of distinct tags on the first line, then text lines
fn arb_body() -> impl Strategy<Value = String> {
    (
        prop::sample::subsequence(vec!["b", "i", "u", "v Ann", "c.loud", "lang en"], 0..=3),
        prop::collection::vec(arb_content(), 3),
        prop::collection::vec(arb_content(), 0..3),
    )
        .prop_map(|(tags, contents, text)| {
            let mut lines = Vec::new();
            let run: String = tags
                .iter()
                .zip(&contents)
                .map(|(tag, content)| {
                    let name = tag.split([' ', '.']).next().unwrap_or_default();
                    format!("<{tag}>{content}</{name}>")
                })
                .collect();
            if !run.is_empty() {
                lines.push(run);
            }
            lines.extend(text.iter().map(|line| format!("- {line}")));
            if lines.is_empty() {
                lines.push("-".to_string());
            }
            lines.join("\n")
        })
}

/// A whole WebVTT file with millisecond timings in arbitrary order
fn arb_file() -> impl Strategy<Value = String> {
    prop::collection::vec((0i64..100_000, 0i64..10_000, arb_body()), 0..8).prop_map(|cues| {
        let mut file = String::from("WEBVTT\n\n");
        for (start_ms, length_ms, body) in cues {
            let end_ms = start_ms + length_ms;
            file.push_str(&format!(
                "00:{:02}:{:02}.{:03} --> 00:{:02}:{:02}.{:03}\n{body}\n\n",
                start_ms / 60_000,
                start_ms / 1_000 % 60,
                start_ms % 1_000,
                end_ms / 60_000,
                end_ms / 1_000 % 60,
                end_ms % 1_000,
            ));
        }
        file
    })
}

/// Tag names an editor user might type, supported or not
fn arb_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["text", "b", "c", "i", "lang", "ruby", "rt", "u", "v"])
            .prop_map(str::to_string),
        "[a-z]{1,7}",
    ]
}

/// Content mixing words with line breaks, blank lines, edge whitespace,
/// dashes and markup characters
fn arb_edit_content() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9]{1,5}",
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\n".to_string()),
            Just("\n\n".to_string()),
            Just("\n \n".to_string()),
            Just("\r".to_string()),
            Just("-".to_string()),
            Just("<&>".to_string()),
        ],
        0..6,
    )
    .prop_map(|pieces| pieces.concat())
}

#[derive(Debug, Clone)]
enum Edit {
    Add {
        start_ms: i64,
        length_ms: i64,
        tag: String,
        content: String,
    },
    SetContent {
        pick: usize,
        content: String,
    },
    Rename {
        pick: usize,
        tag: String,
    },
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0i64..20_000, 0i64..5_000, arb_tag(), arb_edit_content()).prop_map(
            |(start_ms, length_ms, tag, content)| Edit::Add {
                start_ms,
                length_ms,
                tag,
                content,
            }
        ),
        (any::<usize>(), arb_edit_content())
            .prop_map(|(pick, content)| Edit::SetContent { pick, content }),
        (any::<usize>(), arb_tag()).prop_map(|(pick, tag)| Edit::Rename { pick, tag }),
    ]
}

/// Every content handle in the document, over all tags
fn all_handles(doc: &VttDocument) -> Vec<CueContentHandle> {
    doc.tags()
        .into_iter()
        .flat_map(|tag| doc.cue_contents_of_tag(tag))
        .collect()
}

fn timing(cue: &Cue) -> (i64, i64) {
    (cue.start_time_us(), cue.end_time_us())
}

proptest! {
    /// Canonical output parses back to the same canonical output
    #[test]
    fn serialization_is_idempotent(file in arb_file()) {
        let doc = VttDocument::from_content(&file).unwrap();
        prop_assert!(doc.issues().is_empty());
        let first = doc.to_vtt_string();
        let second = VttDocument::from_content(&first).unwrap().to_vtt_string();
        prop_assert_eq!(first, second);
    }

    /// Re-parsed canonical output keeps timing and tag buckets
    #[test]
    fn canonical_output_keeps_buckets(file in arb_file()) {
        let doc = VttDocument::from_content(&file).unwrap();
        let reloaded = VttDocument::from_content(&doc.to_vtt_string()).unwrap();
        prop_assert_eq!(doc.len(), reloaded.len());
        for (before, after) in doc.cues().iter().zip(reloaded.cues()) {
            prop_assert_eq!(timing(before), timing(after));
            for (tag, contents) in before.content().iter() {
                prop_assert_eq!(after.content_for_tag(tag), contents);
            }
        }
    }

    /// Edits are either rejected or keep the canonical output stable
    #[test]
    fn edited_documents_serialize_idempotently(
        file in arb_file(),
        edits in prop::collection::vec(arb_edit(), 1..12),
    ) {
        let mut doc = VttDocument::from_content(&file).unwrap();
        for edit in edits {
            let _ = match edit {
                Edit::Add { start_ms, length_ms, tag, content } => doc
                    .add_cue(start_ms * 1_000, (start_ms + length_ms) * 1_000, tag, content)
                    .map(|_| ()),
                Edit::SetContent { pick, content } => {
                    let mut handles = all_handles(&doc);
                    if handles.is_empty() {
                        continue;
                    }
                    let index = pick % handles.len();
                    doc.set_content(&mut handles[index], content)
                }
                Edit::Rename { pick, tag } => {
                    let mut handles = all_handles(&doc);
                    if handles.is_empty() {
                        continue;
                    }
                    let index = pick % handles.len();
                    doc.rename_tag(&mut handles[index], tag)
                }
            };
        }

        let first = doc.to_vtt_string();
        let reloaded = VttDocument::from_content(&first).unwrap();
        prop_assert!(reloaded.issues().is_empty());
        prop_assert_eq!(first, reloaded.to_vtt_string());
    }

    /// Inserted cues keep the document in start-then-longer-first order
    #[test]
    fn add_cue_keeps_timing_order(
        spans in prop::collection::vec((0i64..50, 0i64..20), 1..20)
    ) {
        let mut doc = VttDocument::new();
        for (start, length) in spans {
            doc.add_cue(start * 1_000, (start + length) * 1_000, "text", "x").unwrap();
        }
        for pair in doc.cues().windows(2) {
            let (a, b) = (timing(&pair[0]), timing(&pair[1]));
            prop_assert!(a.0 < b.0 || (a.0 == b.0 && a.1 >= b.1));
        }
    }
}
