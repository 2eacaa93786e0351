//! Count-up animation for the headline statistics.
//!
//! Each counter climbs from 0 to its end value in steps of
//! `max(1, end / COUNTER_FRAMES)`, one step per tick. The displayed value is
//! clamped so it lands exactly on the end value, after which the animation
//! reports itself finished and its tick source is dropped.

use crate::config::{COUNTERS, COUNTER_FRAMES, PLUS_SUFFIX_THRESHOLD};
use futures::{pin_mut, Stream, StreamExt};
use log::debug;

/// A configured counter: the id of the element it writes to and where it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSpec {
    pub id: &'static str,
    pub end: u32,
}

/// The counters shown on the landing page.
pub fn configured_counters() -> Vec<CounterSpec> {
    COUNTERS
        .iter()
        .map(|&(id, end)| CounterSpec { id, end })
        .collect()
}

/// Increment applied on every tick for a counter ending at `end`.
pub fn step_for(end: u32) -> u32 {
    (end / COUNTER_FRAMES).max(1)
}

/// Render `value` the way the page shows it; large totals get a trailing `+`.
pub fn format_count(value: u32, end: u32) -> String {
    if end > PLUS_SUFFIX_THRESHOLD {
        format!("{}+", value)
    } else {
        value.to_string()
    }
}

/// Something that can display a counter's text.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

/// Running state of a single count-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    end: u32,
    step: u32,
    current: u32,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(end: u32) -> Self {
        Self {
            end,
            step: step_for(end),
            current: 0,
            finished: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one frame and return the text to display for it.
    pub fn tick(&mut self) -> String {
        if !self.finished {
            self.current = self.current.saturating_add(self.step);
            if self.current >= self.end {
                self.current = self.end;
                self.finished = true;
            }
        }
        format_count(self.current, self.end)
    }
}

/// Drive `animation` to completion, writing one frame into `target` per item
/// yielded by `ticks`.
///
/// Returns once the end value has been written, or early if the tick source
/// runs dry. The tick source is dropped on return, which cancels it.
pub async fn run_counter<T, S>(mut animation: CounterAnimation, target: &T, ticks: S)
where
    T: TextTarget + ?Sized,
    S: Stream<Item = ()>,
{
    pin_mut!(ticks);
    while !animation.is_finished() {
        if ticks.next().await.is_none() {
            debug!(
                "Tick source ended at {} of {}",
                animation.current(),
                animation.end
            );
            return;
        }
        target.set_text(&animation.tick());
    }
    debug!("Counter reached {}", animation.end);
}
