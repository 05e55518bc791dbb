use crate::monitor::ThreatSignalMonitor;
use std::sync::Arc;

/// RAII handle for a running monitor.
///
/// Ensures `stop()` is called when the guard is dropped, so deadlines,
/// hold conditions, and injected styles are released even if the caller
/// never stops the monitor explicitly.
///
/// # Example
///
/// ```rust
/// use proctor_monitor::{MonitorConfig, NoopHooks, RawEvent, ThreatSignalMonitor};
///
/// let guard = ThreatSignalMonitor::start(MonitorConfig::default(), NoopHooks);
/// guard.monitor().handle_event(RawEvent::ContextMenu);
/// // When the guard drops (end of scope), stop() is called automatically
/// ```
pub struct MonitorGuard {
    monitor: Arc<ThreatSignalMonitor>,
}

impl MonitorGuard {
    pub(crate) fn new(monitor: Arc<ThreatSignalMonitor>) -> Self {
        Self { monitor }
    }

    /// The monitor this guard owns. Clone the `Arc` to share it with
    /// display-layer subscribers.
    pub fn monitor(&self) -> &Arc<ThreatSignalMonitor> {
        &self.monitor
    }
}

impl Drop for MonitorGuard {
    fn drop(&mut self) {
        self.monitor.stop();
    }
}
