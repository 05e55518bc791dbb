use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding-window pointer-move rate tracker.
///
/// Counts pointer events inside `window`; when the count crosses
/// `threshold` it fires at most once per window, not once per event past
/// the threshold. Screenshot tools sweep the pointer far faster than a
/// human reading quiz questions does.
#[derive(Debug)]
pub(crate) struct PointerRateTracker {
    window: Duration,
    threshold: u32,
    timestamps: VecDeque<Instant>,
    last_fired: Option<Instant>,
}

impl PointerRateTracker {
    pub(crate) fn new(window: Duration, threshold: u32) -> Self {
        Self {
            window,
            threshold,
            timestamps: VecDeque::new(),
            last_fired: None,
        }
    }

    /// Record one pointer-move event.
    ///
    /// Returns true when the rate threshold is crossed and the debounce
    /// window has elapsed since the last fire.
    pub(crate) fn record(&mut self, now: Instant) -> bool {
        self.timestamps.push_back(now);
        while let Some(&front) = self.timestamps.front() {
            if now.duration_since(front) > self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }

        if (self.timestamps.len() as u32) <= self.threshold {
            return false;
        }

        match self.last_fired {
            Some(t) if now.duration_since(t) < self.window => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.timestamps.clear();
        self.last_fired = None;
    }
}
