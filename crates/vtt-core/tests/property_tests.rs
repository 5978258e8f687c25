//! Property-based tests for vtt-core
//!
//! Uses proptest to check timestamp round-trips, the half-open interval
//! rule of the event-time index and markup text preservation.

use proptest::prelude::*;
use vtt_core::{
    format_timestamp_us,
    markup::scan_markup,
    parse_timestamp_us,
    parser::ast::{Cue, TagContent},
    timeline::{to_cues_with_timing, EventTimeline, OutputOptions, Timeline},
};

/// Generate a list of cues with valid timing (microseconds, small range)
fn arb_cues() -> impl Strategy<Value = Vec<Cue>> {
    prop::collection::vec((0i64..1_000, 0i64..200), 0..12).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(index, (start, length))| {
                Cue::new(start, start + length, TagContent::single("text", index.to_string()))
                    .unwrap()
            })
            .collect()
    })
}

/// Generate entity-bearing text without markup
fn arb_text() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ]{1,6}".prop_map(|text| (text.clone(), text)),
            Just(("&amp;".to_string(), "&".to_string())),
            Just(("&lt;".to_string(), "<".to_string())),
            Just(("&gt;".to_string(), ">".to_string())),
        ],
        0..4,
    )
    .prop_map(|pieces| {
        pieces
            .into_iter()
            .fold((String::new(), String::new()), |(mut raw, mut decoded), (r, d)| {
                raw.push_str(&r);
                decoded.push_str(&d);
                (raw, decoded)
            })
    })
}

/// Generate nested, balanced markup from supported tags
fn arb_nested_markup() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,8}".prop_recursive(3, 24, 3, |inner| {
        (
            prop::sample::select(vec!["b", "i", "u", "c.note", "v Ann", "lang en"]),
            prop::collection::vec(inner, 1..3),
        )
            .prop_map(|(tag, children)| {
                let name = tag.split([' ', '.']).next().unwrap_or_default();
                format!("<{tag}>{}</{name}>", children.concat())
            })
    })
}

proptest! {
    /// Formatting a parsed canonical timestamp reproduces it
    #[test]
    fn timestamp_round_trip(
        hours in 0i64..1_000,
        minutes in 0i64..60,
        seconds in 0i64..60,
        millis in 0i64..1_000,
    ) {
        let text = format!("{hours:03}:{minutes:02}:{seconds:02}.{millis:03}");
        let parsed = parse_timestamp_us(&text).unwrap();
        prop_assert_eq!(format_timestamp_us(parsed), text);
    }

    /// Parsing a formatted time gives back the millisecond-truncated value
    #[test]
    fn format_then_parse_truncates_to_millis(time_us in 0i64..10_000_000_000_000) {
        let reparsed = parse_timestamp_us(&format_timestamp_us(time_us)).unwrap();
        prop_assert_eq!(reparsed, time_us - time_us % 1_000);
    }

    /// Active cues are exactly those with start <= t < end, in insertion order
    #[test]
    fn active_cues_match_half_open_interval(cues in arb_cues(), time_us in -10i64..1_300) {
        let timeline = Timeline::new(&cues);
        let expected: Vec<&Cue> = cues
            .iter()
            .filter(|cue| cue.start_time_us() <= time_us && time_us < cue.end_time_us())
            .collect();
        prop_assert_eq!(timeline.active_cues(time_us), expected);
    }

    /// A cue is never active at its own end time
    #[test]
    fn cue_inactive_at_end_time(cues in arb_cues()) {
        let timeline = Timeline::new(&cues);
        for cue in &cues {
            let active = timeline.active_cues(cue.end_time_us());
            prop_assert!(!active.iter().any(|other| std::ptr::eq(*other, cue)));
        }
    }

    /// The ceiling search returns the first strictly greater event time
    #[test]
    fn next_event_index_is_strict_ceiling(cues in arb_cues(), time_us in -10i64..1_300) {
        let timeline = Timeline::new(&cues);
        let times = timeline.event_times_us();
        match timeline.next_event_index_after(time_us) {
            Some(index) => {
                prop_assert!(times[index] > time_us);
                prop_assert!(index == 0 || times[index - 1] <= time_us);
            }
            None => prop_assert!(times.iter().all(|&t| t <= time_us)),
        }
    }

    /// Grouped export never fails on real timelines and windows do not overlap
    #[test]
    fn grouped_windows_are_disjoint(cues in arb_cues()) {
        let mut windows = Vec::new();
        to_cues_with_timing(&Timeline::new(&cues), OutputOptions::all_cues(), |window| {
            windows.push((window.start_time_us, window.end_time_us()));
        })
        .unwrap();
        for pair in windows.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
        for (start, end) in windows {
            prop_assert!(start < end);
        }
    }

    /// Sibling element contents concatenate to the decoded plain text
    #[test]
    fn sibling_elements_concatenate_to_plain_text(
        parts in prop::collection::vec(
            (prop::sample::select(vec!["b", "i", "u", "rt"]), arb_text()),
            1..5,
        )
    ) {
        let markup: String = parts
            .iter()
            .map(|(tag, (raw, _))| format!("<{tag}>{raw}</{tag}>"))
            .collect();
        let decoded: String = parts.iter().map(|(_, (_, decoded))| decoded.as_str()).collect();

        let scan = scan_markup(&markup);
        let joined: String = scan.elements.iter().map(|e| e.content.as_str()).collect();
        prop_assert_eq!(&joined, &decoded);
        prop_assert_eq!(&scan.plain_text, &decoded);
    }

    /// Balanced nesting closes every tag and every content is a plain-text slice
    #[test]
    fn nested_markup_is_fully_closed(markup in arb_nested_markup()) {
        let scan = scan_markup(&markup);
        prop_assert!(!scan.aborted);
        prop_assert_eq!(scan.open_tags, 0);
        for element in &scan.elements {
            prop_assert_eq!(
                &scan.plain_text[element.start_offset..element.end_offset],
                element.content.as_str()
            );
        }
    }
}
