use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debugger-timing probes above this are treated as a paused or
/// instrumented execution environment. Environment-specific heuristic;
/// only consulted when the `devtools_timing` capability is on.
pub(crate) const TIMING_PROBE_THRESHOLD: Duration = Duration::from_millis(100);

/// Outer/inner window dimensions sampled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowMetrics {
    pub outer_width: u32,
    pub outer_height: u32,
    pub inner_width: u32,
    pub inner_height: u32,
}

impl WindowMetrics {
    /// Docked devtools show up as a large delta between the outer window
    /// and the viewport on one axis. Zoomed or odd-DPI displays can trip
    /// this too, which is why the blur it causes is re-evaluated every
    /// poll tick instead of latched.
    pub(crate) fn exceeds(&self, threshold: u32) -> bool {
        self.outer_height.saturating_sub(self.inner_height) > threshold
            || self.outer_width.saturating_sub(self.inner_width) > threshold
    }
}
