use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const DEFAULT_BLUR_DURATION_MS: i64 = 3_000;
pub(crate) const DEFAULT_WARNING_DURATION_MS: i64 = 3_000;
pub(crate) const DEFAULT_DEVTOOLS_POLL_INTERVAL_MS: i64 = 1_000;
pub(crate) const DEFAULT_DEVTOOLS_SIZE_THRESHOLD: u32 = 160;
pub(crate) const DEFAULT_POINTER_RATE_THRESHOLD: u32 = 10;
pub(crate) const DEFAULT_POINTER_WINDOW_MS: i64 = 100;
pub(crate) const DEFAULT_ACTIVITY_ESCALATION_THRESHOLD: u32 = 3;
pub(crate) const DEFAULT_VISIBILITY_GRACE_MS: i64 = 1_000;
pub(crate) const DEFAULT_FOCUS_GRACE_MS: i64 = 500;

/// Optional host capabilities.
///
/// An absent capability degrades the matching handler to a no-op; it is
/// never an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Clipboard can be overwritten after a screenshot attempt.
    pub clipboard: bool,
    /// Host delivers visibility-change events.
    pub visibility: bool,
    /// Host runs debugger-timing probes.
    pub devtools_timing: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            clipboard: true,
            visibility: true,
            devtools_timing: true,
        }
    }
}

/// Monitor configuration.
///
/// Durations are milliseconds as supplied by the host (signed, since they
/// may arrive from untyped JSON). Out-of-range values are clamped to their
/// defaults at start rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Show warning text alongside state transitions.
    pub warnings_enabled: bool,
    /// How long a blocking signal keeps the display blurred.
    pub blur_duration_ms: i64,
    /// How long a warning banner stays up.
    pub warning_duration_ms: i64,
    /// Cadence of the devtools dimension re-evaluation in `tick()`.
    pub devtools_poll_interval_ms: i64,
    /// Outer/inner window delta (px) that suggests docked devtools.
    pub devtools_size_threshold: u32,
    /// Pointer-move events per window that count as rapid movement.
    pub pointer_rate_threshold: u32,
    /// Sliding window for the pointer rate, also the debounce interval.
    pub pointer_window_ms: i64,
    /// Activity count that must be exceeded before rapid pointer movement
    /// escalates to a blur.
    pub activity_escalation_threshold: u32,
    /// Delay before unblurring after the tab becomes visible again.
    pub visibility_grace_ms: i64,
    /// Delay before unblurring after the window regains focus.
    pub focus_grace_ms: i64,
    pub capabilities: Capabilities,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warnings_enabled: true,
            blur_duration_ms: DEFAULT_BLUR_DURATION_MS,
            warning_duration_ms: DEFAULT_WARNING_DURATION_MS,
            devtools_poll_interval_ms: DEFAULT_DEVTOOLS_POLL_INTERVAL_MS,
            devtools_size_threshold: DEFAULT_DEVTOOLS_SIZE_THRESHOLD,
            pointer_rate_threshold: DEFAULT_POINTER_RATE_THRESHOLD,
            pointer_window_ms: DEFAULT_POINTER_WINDOW_MS,
            activity_escalation_threshold: DEFAULT_ACTIVITY_ESCALATION_THRESHOLD,
            visibility_grace_ms: DEFAULT_VISIBILITY_GRACE_MS,
            focus_grace_ms: DEFAULT_FOCUS_GRACE_MS,
            capabilities: Capabilities::default(),
        }
    }
}

impl MonitorConfig {
    /// Clamp out-of-range values to their defaults.
    ///
    /// Invalid configuration is never a start-up error; the worst outcome
    /// of a bad threshold would be a stuck blur, so clamping keeps every
    /// recovery timer positive.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.blur_duration_ms <= 0 {
            warn!(
                "blur_duration_ms {} out of range, using {}",
                self.blur_duration_ms, DEFAULT_BLUR_DURATION_MS
            );
            self.blur_duration_ms = DEFAULT_BLUR_DURATION_MS;
        }
        if self.warning_duration_ms <= 0 {
            warn!(
                "warning_duration_ms {} out of range, using {}",
                self.warning_duration_ms, DEFAULT_WARNING_DURATION_MS
            );
            self.warning_duration_ms = DEFAULT_WARNING_DURATION_MS;
        }
        if self.devtools_poll_interval_ms <= 0 {
            warn!(
                "devtools_poll_interval_ms {} out of range, using {}",
                self.devtools_poll_interval_ms, DEFAULT_DEVTOOLS_POLL_INTERVAL_MS
            );
            self.devtools_poll_interval_ms = DEFAULT_DEVTOOLS_POLL_INTERVAL_MS;
        }
        if self.devtools_size_threshold == 0 {
            warn!(
                "devtools_size_threshold 0 would blur unconditionally, using {}",
                DEFAULT_DEVTOOLS_SIZE_THRESHOLD
            );
            self.devtools_size_threshold = DEFAULT_DEVTOOLS_SIZE_THRESHOLD;
        }
        if self.pointer_rate_threshold == 0 {
            warn!(
                "pointer_rate_threshold 0 out of range, using {}",
                DEFAULT_POINTER_RATE_THRESHOLD
            );
            self.pointer_rate_threshold = DEFAULT_POINTER_RATE_THRESHOLD;
        }
        if self.pointer_window_ms <= 0 {
            warn!(
                "pointer_window_ms {} out of range, using {}",
                self.pointer_window_ms, DEFAULT_POINTER_WINDOW_MS
            );
            self.pointer_window_ms = DEFAULT_POINTER_WINDOW_MS;
        }
        if self.visibility_grace_ms <= 0 {
            warn!(
                "visibility_grace_ms {} out of range, using {}",
                self.visibility_grace_ms, DEFAULT_VISIBILITY_GRACE_MS
            );
            self.visibility_grace_ms = DEFAULT_VISIBILITY_GRACE_MS;
        }
        if self.focus_grace_ms <= 0 {
            warn!(
                "focus_grace_ms {} out of range, using {}",
                self.focus_grace_ms, DEFAULT_FOCUS_GRACE_MS
            );
            self.focus_grace_ms = DEFAULT_FOCUS_GRACE_MS;
        }
        self
    }

    pub(crate) fn blur_duration(&self) -> Duration {
        Duration::from_millis(self.blur_duration_ms as u64)
    }

    pub(crate) fn warning_duration(&self) -> Duration {
        Duration::from_millis(self.warning_duration_ms as u64)
    }

    pub(crate) fn devtools_poll_interval(&self) -> Duration {
        Duration::from_millis(self.devtools_poll_interval_ms as u64)
    }

    pub(crate) fn pointer_window(&self) -> Duration {
        Duration::from_millis(self.pointer_window_ms as u64)
    }

    pub(crate) fn visibility_grace(&self) -> Duration {
        Duration::from_millis(self.visibility_grace_ms as u64)
    }

    pub(crate) fn focus_grace(&self) -> Duration {
        Duration::from_millis(self.focus_grace_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MonitorConfig::default();
        assert!(config.warnings_enabled);
        assert_eq!(config.blur_duration_ms, 3_000);
        assert_eq!(config.devtools_size_threshold, 160);
        assert_eq!(config.pointer_rate_threshold, 10);
        assert_eq!(config.activity_escalation_threshold, 3);
        assert!(config.capabilities.clipboard);
    }

    #[test]
    fn test_sanitized_clamps_negative_durations() {
        let config = MonitorConfig {
            blur_duration_ms: -500,
            warning_duration_ms: 0,
            visibility_grace_ms: -1,
            focus_grace_ms: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.blur_duration_ms, DEFAULT_BLUR_DURATION_MS);
        assert_eq!(config.warning_duration_ms, DEFAULT_WARNING_DURATION_MS);
        assert_eq!(config.visibility_grace_ms, DEFAULT_VISIBILITY_GRACE_MS);
        assert_eq!(config.focus_grace_ms, DEFAULT_FOCUS_GRACE_MS);
    }

    #[test]
    fn test_sanitized_clamps_zero_thresholds() {
        let config = MonitorConfig {
            devtools_size_threshold: 0,
            pointer_rate_threshold: 0,
            pointer_window_ms: -10,
            devtools_poll_interval_ms: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.devtools_size_threshold, DEFAULT_DEVTOOLS_SIZE_THRESHOLD);
        assert_eq!(config.pointer_rate_threshold, DEFAULT_POINTER_RATE_THRESHOLD);
        assert_eq!(config.pointer_window_ms, DEFAULT_POINTER_WINDOW_MS);
        assert_eq!(
            config.devtools_poll_interval_ms,
            DEFAULT_DEVTOOLS_POLL_INTERVAL_MS
        );
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let config = MonitorConfig {
            blur_duration_ms: 50,
            pointer_rate_threshold: 5,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.blur_duration_ms, 50);
        assert_eq!(config.pointer_rate_threshold, 5);
    }

    #[test]
    fn test_duration_accessors() {
        let config = MonitorConfig::default();
        assert_eq!(config.blur_duration(), Duration::from_secs(3));
        assert_eq!(config.focus_grace(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_deserializes_with_partial_fields() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"blur_duration_ms": 1500, "warnings_enabled": false}"#)
                .expect("deserialization failed");
        assert_eq!(config.blur_duration_ms, 1_500);
        assert!(!config.warnings_enabled);
        // Unspecified fields fall back to defaults
        assert_eq!(config.focus_grace_ms, DEFAULT_FOCUS_GRACE_MS);
    }
}
