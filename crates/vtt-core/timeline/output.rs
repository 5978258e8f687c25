//! Export of a timeline as non-overlapping timed windows
//!
//! Walks the event times of an [`EventTimeline`] and hands each span with
//! a constant set of active cues to a sink as a [`CuesWithTiming`].

use super::EventTimeline;
use crate::{parser::ast::Cue, utils::CoreError, Result};

/// Which windows to emit, and in what order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Windows starting at or after this time are emitted first; `None`
    /// emits everything from the beginning
    pub start_time_us: Option<i64>,
    /// Afterwards, also emit the windows before `start_time_us`
    pub output_all_cues: bool,
    /// Group overlapping cues into change-point windows; when false every
    /// cue becomes its own window
    pub group_cues_in_range: bool,
}

impl OutputOptions {
    /// Every window, grouped by change point
    #[must_use]
    pub const fn all_cues() -> Self {
        Self {
            start_time_us: None,
            output_all_cues: false,
            group_cues_in_range: true,
        }
    }

    /// One window per cue, overlaps ignored
    #[must_use]
    pub const fn all_cues_ungrouped() -> Self {
        Self {
            start_time_us: None,
            output_all_cues: false,
            group_cues_in_range: false,
        }
    }

    /// Only windows from `start_time_us` on
    #[must_use]
    pub const fn only_cues_after(start_time_us: i64) -> Self {
        Self {
            start_time_us: Some(start_time_us),
            output_all_cues: false,
            group_cues_in_range: true,
        }
    }

    /// Windows from `start_time_us` on, then the ones before it
    #[must_use]
    pub const fn cues_after_then_remaining_cues_before(start_time_us: i64) -> Self {
        Self {
            start_time_us: Some(start_time_us),
            output_all_cues: true,
            group_cues_in_range: true,
        }
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::all_cues()
    }
}

/// Cues active throughout one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuesWithTiming<'a> {
    pub cues: Vec<&'a Cue>,
    pub start_time_us: i64,
    pub duration_us: i64,
}

impl CuesWithTiming<'_> {
    #[must_use]
    pub const fn end_time_us(&self) -> i64 {
        self.start_time_us + self.duration_us
    }
}

/// Emit the windows of `timeline` to `sink` according to `options`
///
/// The last event time of the timeline must have no active cues; a
/// timeline that breaks this is reported as [`CoreError::Timeline`].
/// Windows of zero length (repeated event times) are not emitted.
///
/// # Example
///
/// ```rust
/// use vtt_core::{parser::ParsedVtt, timeline::{to_cues_with_timing, OutputOptions}};
///
/// let parsed = ParsedVtt::parse(
///     "WEBVTT\n\n00:00.000 --> 00:02.000\na\n\n00:01.000 --> 00:03.000\nb\n",
/// )?;
/// let mut windows = Vec::new();
/// to_cues_with_timing(&parsed.timeline(), OutputOptions::all_cues(), |w| {
///     windows.push((w.start_time_us, w.end_time_us(), w.cues.len()));
/// })?;
/// assert_eq!(
///     windows,
///     [(0, 1_000_000, 1), (1_000_000, 2_000_000, 2), (2_000_000, 3_000_000, 1)]
/// );
/// # Ok::<(), vtt_core::CoreError>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::Timeline`] when cues are still active at the final
/// event time, or a bounds error from a misbehaving timeline.
pub fn to_cues_with_timing<'a, T, F>(timeline: &T, options: OutputOptions, mut sink: F) -> Result<()>
where
    T: EventTimeline<'a> + ?Sized,
    F: FnMut(CuesWithTiming<'a>),
{
    if !options.group_cues_in_range {
        for cue in timeline.cues() {
            sink(CuesWithTiming {
                cues: vec![cue],
                start_time_us: cue.start_time_us(),
                duration_us: cue.duration_us(),
            });
        }
        return Ok(());
    }

    let count = timeline.event_time_count();
    let start_index = start_index(timeline, options)?;

    let mut started_in_middle_at = None;
    if let Some(start_time_us) = options.start_time_us {
        let cues_at_start = timeline.active_cues(start_time_us);
        if !cues_at_start.is_empty() && start_index < count {
            let first_event_time_us = timeline.event_time(start_index)?;
            if start_time_us < first_event_time_us {
                sink(CuesWithTiming {
                    cues: cues_at_start,
                    start_time_us,
                    duration_us: first_event_time_us - start_time_us,
                });
                started_in_middle_at = Some(start_time_us);
            }
        }
    }

    for index in start_index..count {
        emit_event(timeline, index, &mut sink)?;
    }

    if options.output_all_cues {
        let end_index = if started_in_middle_at.is_some() {
            start_index.saturating_sub(1)
        } else {
            start_index
        };
        for index in 0..end_index {
            emit_event(timeline, index, &mut sink)?;
        }
        if let Some(start_time_us) = started_in_middle_at {
            let window_start_us = timeline.event_time(end_index)?;
            sink(CuesWithTiming {
                cues: timeline.active_cues(start_time_us),
                start_time_us: window_start_us,
                duration_us: start_time_us - window_start_us,
            });
        }
    }

    Ok(())
}

/// First event index to emit for `options`
fn start_index<'a, T>(timeline: &T, options: OutputOptions) -> Result<usize>
where
    T: EventTimeline<'a> + ?Sized,
{
    let Some(start_time_us) = options.start_time_us else {
        return Ok(0);
    };
    let Some(mut index) = timeline.next_event_index_after(start_time_us) else {
        return Ok(timeline.event_time_count());
    };
    if index > 0 && timeline.event_time(index - 1)? == start_time_us {
        index -= 1;
    }
    Ok(index)
}

/// Emit the window starting at event `index`, if any cue is active in it
fn emit_event<'a, T, F>(timeline: &T, index: usize, sink: &mut F) -> Result<()>
where
    T: EventTimeline<'a> + ?Sized,
    F: FnMut(CuesWithTiming<'a>),
{
    let start_time_us = timeline.event_time(index)?;
    let cues = timeline.active_cues(start_time_us);
    if cues.is_empty() {
        return Ok(());
    }
    if index + 1 == timeline.event_time_count() {
        return Err(CoreError::Timeline(format!(
            "{} cue(s) still active at final event time {start_time_us}us",
            cues.len()
        )));
    }

    let duration_us = timeline.event_time(index + 1)? - start_time_us;
    if duration_us > 0 {
        sink(CuesWithTiming {
            cues,
            start_time_us,
            duration_us,
        });
    }
    Ok(())
}
