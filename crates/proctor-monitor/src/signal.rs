use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Kind of a classified capture/inspection signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Context-menu (right-click) attempt.
    RightClick,
    /// Blocked key or modifier chord.
    KeyCombo,
    /// Screenshot shortcut (PrintScreen, function keys).
    Screenshot,
    /// Tab visibility toggled.
    VisibilityChange,
    /// Window lost focus.
    WindowBlur,
    /// Window regained focus.
    WindowFocus,
    /// Pointer-move rate crossed the configured threshold.
    RapidPointer,
    /// Developer tools suspected (window-dimension delta or timing probe).
    DevToolsSuspected,
    /// Clipboard could not be cleared after a screenshot attempt.
    ClipboardSuspected,
}

/// A classified event. Ephemeral: produced by classification, consumed by
/// the monitor's dispatch, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub kind: SignalKind,
    pub at: Instant,
}

/// What the display layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Content visible, no banner.
    #[default]
    Normal,
    /// Content hidden behind a blur filter.
    Blurred,
    /// Content visible with a warning banner.
    Warned,
}

/// The monitor's renderable state. Owned exclusively by the monitor and
/// mutated only by its signal handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionState {
    pub display: DisplayMode,
    /// Diagnostic counter, monotonically non-decreasing within a monitor
    /// lifetime. Never drives an irreversible action.
    pub activity_count: u32,
    pub last_warning: Option<String>,
}

/// What the host should do with the raw event it just delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    /// Suppress the event's default action (preventDefault).
    pub suppress_default: bool,
}

impl EventDisposition {
    pub(crate) fn suppress() -> Self {
        Self {
            suppress_default: true,
        }
    }

    pub(crate) fn allow() -> Self {
        Self::default()
    }
}
