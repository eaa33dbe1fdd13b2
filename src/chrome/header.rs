//! Header shrink on scroll.
//!
//! Scroll events arrive far faster than the header needs to change, so the
//! handler only records the latest offset and schedules a recompute after a
//! fixed quiet delay. Scheduling replaces any pending recompute — last
//! scheduled timer wins — and the recompute itself compares the recorded
//! offset against the configured threshold: past it the header carries one
//! extra class, above it the class is removed.
//!
//! Time is passed in explicitly (milliseconds on the caller's clock) so the
//! debounce is deterministic.

use super::page::{ElementId, Page};
use crate::config::ChromeConfig;

/// Class the header gains past the scroll threshold.
pub const SHRINK_CLASS: &str = "shrink";

/// Debounced scroll state for the page header.
#[derive(Debug)]
pub struct HeaderShrink {
    header: ElementId,
    threshold: u32,
    delay_ms: u64,
    last_offset: u32,
    deadline: Option<u64>,
}

impl HeaderShrink {
    pub fn new(header: ElementId, chrome: &ChromeConfig) -> Self {
        Self {
            header,
            threshold: chrome.scroll_threshold,
            delay_ms: chrome.scroll_debounce_ms,
            last_offset: 0,
            deadline: None,
        }
    }

    /// Record a scroll offset and (re)schedule the recompute. Any previously
    /// scheduled recompute is superseded.
    pub fn on_scroll(&mut self, offset: u32, now_ms: u64) {
        self.last_offset = offset;
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Fire the pending recompute once its deadline has passed. Returns
    /// whether the recompute ran.
    pub fn tick(&mut self, page: &mut Page, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                let header = page.get_mut(self.header);
                if self.last_offset > self.threshold {
                    header.add_class(SHRINK_CLASS);
                } else {
                    header.remove_class(SHRINK_CLASS);
                }
                true
            }
            _ => false,
        }
    }

    /// Whether a recompute is currently scheduled.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}
