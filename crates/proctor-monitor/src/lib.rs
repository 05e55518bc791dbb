// proctor-monitor: client-side capture/inspection signal monitor
//
// Classifies raw host events (key chords, pointer activity, focus and
// visibility changes, window-dimension samples, timing probes) into signals
// and drives a timer-bounded protection display state the host UI renders.
//
// Nothing here is a security boundary: the host environment controls script
// execution, so every measure is best-effort deterrence. The one hard rule
// is that a blurred display always recovers on its own; no signal may hide
// content permanently.

mod config;
mod devtools;
mod event;
mod guard;
mod hooks;
mod monitor;
mod pointer;
mod signal;

pub use config::{Capabilities, MonitorConfig};
pub use devtools::WindowMetrics;
pub use event::{Key, Modifiers, RawEvent};
pub use guard::MonitorGuard;
pub use hooks::{HookError, HostHooks, NoopHooks};
pub use monitor::ThreatSignalMonitor;
pub use signal::{DisplayMode, EventDisposition, ProtectionState, Signal, SignalKind};
