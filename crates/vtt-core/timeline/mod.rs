//! Event-time index over a fixed list of cues
//!
//! A [`Timeline`] records every cue's start and end time in sorted order so
//! callers can binary-search for the next change point and ask which cues
//! are active at a given time. It borrows the cue list and is rebuilt, never
//! updated, when the list changes.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::{parser::ast::{Cue, TagContent}, timeline::{EventTimeline, Timeline}};
//!
//! let cues = vec![
//!     Cue::new(0, 4_000, TagContent::single("text", "a"))?,
//!     Cue::new(2_000, 6_000, TagContent::single("text", "b"))?,
//! ];
//! let timeline = Timeline::new(&cues);
//! assert_eq!(timeline.event_time_count(), 4);
//! assert_eq!(timeline.next_event_index_after(2_000), Some(2));
//! assert_eq!(timeline.active_cues(3_000).len(), 2);
//! assert!(timeline.active_cues(6_000).is_empty());
//! # Ok::<(), vtt_core::CoreError>(())
//! ```

pub mod output;

pub use output::{to_cues_with_timing, CuesWithTiming, OutputOptions};

use crate::{parser::ast::Cue, utils::CoreError, Result};

/// Queries answered by an event-time index
///
/// The export routine in [`output`] is written against this trait so it
/// works with any index that keeps the same contract.
pub trait EventTimeline<'a> {
    /// Cues the index was built from, in insertion order
    fn cues(&self) -> &'a [Cue];

    /// Number of event times (two per cue)
    fn event_time_count(&self) -> usize;

    /// Event time at `index` in ascending order
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `index` is not below
    /// [`Self::event_time_count`].
    fn event_time(&self, index: usize) -> Result<i64>;

    /// Smallest index whose event time is strictly after `time_us`
    fn next_event_index_after(&self, time_us: i64) -> Option<usize>;

    /// Cues with `start <= time_us < end`, in insertion order
    fn active_cues(&self, time_us: i64) -> Vec<&'a Cue>;
}

/// Sorted event times over a borrowed cue list
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    cues: &'a [Cue],
    sorted_event_times_us: Vec<i64>,
}

impl<'a> Timeline<'a> {
    /// Build the index; O(n log n) in the number of cues
    #[must_use]
    pub fn new(cues: &'a [Cue]) -> Self {
        let mut sorted_event_times_us: Vec<i64> = cues
            .iter()
            .flat_map(|cue| [cue.start_time_us(), cue.end_time_us()])
            .collect();
        sorted_event_times_us.sort_unstable();

        Self {
            cues,
            sorted_event_times_us,
        }
    }

    /// All event times in ascending order, duplicates included
    #[must_use]
    pub fn event_times_us(&self) -> &[i64] {
        &self.sorted_event_times_us
    }
}

impl<'a> EventTimeline<'a> for Timeline<'a> {
    fn cues(&self) -> &'a [Cue] {
        self.cues
    }

    fn event_time_count(&self) -> usize {
        self.sorted_event_times_us.len()
    }

    fn event_time(&self, index: usize) -> Result<i64> {
        self.sorted_event_times_us
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOutOfBounds {
                index,
                len: self.sorted_event_times_us.len(),
            })
    }

    fn next_event_index_after(&self, time_us: i64) -> Option<usize> {
        let index = self
            .sorted_event_times_us
            .partition_point(|&event| event <= time_us);
        (index < self.sorted_event_times_us.len()).then_some(index)
    }

    fn active_cues(&self, time_us: i64) -> Vec<&'a Cue> {
        self.cues
            .iter()
            .filter(|cue| cue.is_active_at(time_us))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::TagContent;
    use pretty_assertions::assert_eq;

    fn cue(start: i64, end: i64, text: &str) -> Cue {
        Cue::new(start, end, TagContent::single("text", text)).unwrap()
    }

    #[test]
    fn empty_timeline_has_no_events() {
        let timeline = Timeline::new(&[]);
        assert_eq!(timeline.event_time_count(), 0);
        assert_eq!(timeline.next_event_index_after(0), None);
        assert!(timeline.active_cues(0).is_empty());
        assert!(timeline.event_time(0).is_err());
    }

    #[test]
    fn ceiling_skips_duplicates() {
        let cues = [cue(0, 10, "a"), cue(0, 10, "b"), cue(10, 20, "c")];
        let timeline = Timeline::new(&cues);
        assert_eq!(timeline.event_times_us(), [0, 0, 10, 10, 10, 20]);
        assert_eq!(timeline.next_event_index_after(-1), Some(0));
        assert_eq!(timeline.next_event_index_after(0), Some(2));
        assert_eq!(timeline.next_event_index_after(10), Some(5));
        assert_eq!(timeline.next_event_index_after(20), None);
    }

    #[test]
    fn event_time_is_bounds_checked() {
        let cues = [cue(5, 7, "a")];
        let timeline = Timeline::new(&cues);
        assert_eq!(timeline.event_time(1).unwrap(), 7);
        assert_eq!(
            timeline.event_time(2),
            Err(CoreError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn active_cues_keep_insertion_order() {
        let cues = [cue(5, 15, "late"), cue(0, 20, "early")];
        let timeline = Timeline::new(&cues);
        let active: Vec<_> = timeline
            .active_cues(10)
            .into_iter()
            .map(|c| c.text()[0].as_str())
            .collect();
        assert_eq!(active, ["late", "early"]);
    }

    #[test]
    fn zero_length_cue_is_never_active() {
        let cues = [cue(5, 5, "instant")];
        let timeline = Timeline::new(&cues);
        assert!(timeline.active_cues(5).is_empty());
    }
}
