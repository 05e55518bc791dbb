use crate::config::MonitorConfig;
use crate::devtools::TIMING_PROBE_THRESHOLD;
use crate::event::{classify_key, KeyClass, RawEvent};
use crate::guard::MonitorGuard;
use crate::hooks::HostHooks;
use crate::pointer::PointerRateTracker;
use crate::signal::{DisplayMode, EventDisposition, ProtectionState, Signal, SignalKind};
use log::{debug, trace, warn};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

type StateCallback = Box<dyn Fn(&ProtectionState) + Send + Sync>;

/// Interior monitor state. Single `ProtectionState` owner plus the timer
/// deadlines and hold conditions that drive it. Deadlines are plain fields,
/// one per timer kind: scheduling overwrites only the previous deadline of
/// the same kind, which gives last-write-wins supersession without letting
/// a short grace write cancel a longer blocking blur.
struct Inner {
    config: MonitorConfig,
    state: ProtectionState,
    running: bool,
    /// Tab currently hidden; holds the blur without a deadline.
    hidden: bool,
    /// Window currently focused; `false` holds the blur.
    focused: bool,
    /// Dimension-delta condition currently holds; re-evaluated per poll
    /// tick, never latched.
    devtools_open: bool,
    /// Deadline from a blocking signal (screenshot, timing probe,
    /// escalated pointer activity).
    blur_until: Option<Instant>,
    /// Deadline from a recovering signal (focus regained, tab visible
    /// again). Independent of `blur_until` so regaining focus never
    /// shortens an active blocking blur.
    grace_until: Option<Instant>,
    warning_until: Option<Instant>,
    devtools_next_poll: Option<Instant>,
    last_metrics: Option<crate::devtools::WindowMetrics>,
    pointer: PointerRateTracker,
}

/// Aggregates browser-level threat signals into a renderable
/// [`ProtectionState`].
///
/// Single-threaded, event-driven: the host delivers raw events through
/// [`handle_event`](Self::handle_event) and pumps timers through
/// [`tick`](Self::tick) from its own scheduling. Interior state sits behind
/// a mutex only so the monitor can be shared via `Arc` with the guard and
/// subscribers; no cross-thread contention is assumed.
pub struct ThreatSignalMonitor {
    inner: Mutex<Inner>,
    subscribers: RwLock<Vec<StateCallback>>,
    hooks: Box<dyn HostHooks>,
}

impl ThreatSignalMonitor {
    /// Start a monitor.
    ///
    /// Always succeeds: out-of-range config values are clamped to their
    /// defaults, and missing host capabilities degrade handlers to no-ops.
    /// The returned [`MonitorGuard`] stops the monitor when dropped, so
    /// teardown happens even if the caller never calls
    /// [`stop`](Self::stop) explicitly.
    pub fn start(config: MonitorConfig, hooks: impl HostHooks + 'static) -> MonitorGuard {
        let config = config.sanitized();
        let now = Instant::now();
        let pointer = PointerRateTracker::new(config.pointer_window(), config.pointer_rate_threshold);

        let monitor = Arc::new(Self {
            inner: Mutex::new(Inner {
                state: ProtectionState::default(),
                running: true,
                hidden: false,
                focused: true,
                devtools_open: false,
                blur_until: None,
                grace_until: None,
                warning_until: None,
                devtools_next_poll: Some(now + config.devtools_poll_interval()),
                last_metrics: None,
                pointer,
                config,
            }),
            subscribers: RwLock::new(Vec::new()),
            hooks: Box::new(hooks),
        });

        if let Err(e) = monitor.hooks.inject_protection_styles() {
            debug!("protection style injection unavailable: {}", e);
        }
        debug!("monitor started");

        MonitorGuard::new(monitor)
    }

    /// Classify and dispatch one raw host event.
    ///
    /// Never fails: best-effort side effects that error are logged and
    /// swallowed so sibling handling is unaffected. After `stop()` this is
    /// a no-op that allows everything.
    pub fn handle_event(&self, event: RawEvent) -> EventDisposition {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        if !inner.running {
            return EventDisposition::allow();
        }
        let before = inner.state.clone();

        let disposition = match event {
            RawEvent::ContextMenu => {
                self.on_signal(
                    &mut inner,
                    Signal {
                        kind: SignalKind::RightClick,
                        at: now,
                    },
                );
                EventDisposition::suppress()
            }
            RawEvent::Key {
                key,
                modifiers,
                in_input_field,
            } => match classify_key(&key, modifiers, in_input_field) {
                KeyClass::Allowed => EventDisposition::allow(),
                KeyClass::Blocked { warning } => {
                    trace!("blocked key: {}", key.name());
                    self.on_signal(
                        &mut inner,
                        Signal {
                            kind: SignalKind::KeyCombo,
                            at: now,
                        },
                    );
                    self.show_warning(&mut inner, now, &warning);
                    EventDisposition::suppress()
                }
                KeyClass::Screenshot => {
                    self.on_signal(
                        &mut inner,
                        Signal {
                            kind: SignalKind::Screenshot,
                            at: now,
                        },
                    );
                    EventDisposition::suppress()
                }
            },
            RawEvent::PointerMove => {
                if inner.pointer.record(now) {
                    self.on_signal(
                        &mut inner,
                        Signal {
                            kind: SignalKind::RapidPointer,
                            at: now,
                        },
                    );
                }
                EventDisposition::allow()
            }
            RawEvent::VisibilityChanged { hidden } => {
                if inner.config.capabilities.visibility {
                    inner.hidden = hidden;
                    self.on_signal(
                        &mut inner,
                        Signal {
                            kind: SignalKind::VisibilityChange,
                            at: now,
                        },
                    );
                }
                EventDisposition::allow()
            }
            RawEvent::FocusLost => {
                inner.focused = false;
                self.on_signal(
                    &mut inner,
                    Signal {
                        kind: SignalKind::WindowBlur,
                        at: now,
                    },
                );
                EventDisposition::allow()
            }
            RawEvent::FocusGained => {
                inner.focused = true;
                self.on_signal(
                    &mut inner,
                    Signal {
                        kind: SignalKind::WindowFocus,
                        at: now,
                    },
                );
                EventDisposition::allow()
            }
            RawEvent::SelectionStart | RawEvent::DragStart => EventDisposition::suppress(),
            RawEvent::WindowMetrics(metrics) => {
                inner.last_metrics = Some(metrics);
                self.evaluate_devtools(&mut inner, now);
                EventDisposition::allow()
            }
        };

        self.refresh(&mut inner, now);
        let after = inner.state.clone();
        drop(inner);
        if after != before {
            self.notify(&after);
        }
        disposition
    }

    /// Feed one debugger-timing probe measurement.
    ///
    /// Capability-gated and best-effort: above-threshold probes blur for
    /// the configured duration rather than latching, since zoomed or
    /// instrumented-but-legitimate environments trip this heuristic too.
    pub fn record_timing_probe(&self, elapsed: Duration) {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        if !inner.running || !inner.config.capabilities.devtools_timing {
            return;
        }
        let before = inner.state.clone();
        if elapsed > TIMING_PROBE_THRESHOLD {
            self.on_signal(
                &mut inner,
                Signal {
                    kind: SignalKind::DevToolsSuspected,
                    at: now,
                },
            );
            inner.blur_until = Some(now + inner.config.blur_duration());
        }
        self.refresh(&mut inner, now);
        let after = inner.state.clone();
        drop(inner);
        if after != before {
            self.notify(&after);
        }
    }

    /// Drive timer expiry and the devtools dimension poll.
    ///
    /// The host calls this from its own scheduling (e.g. an interval
    /// timer). All reversion to `Normal` happens here or on the next
    /// event, whichever comes first, so the display is always bounded by a
    /// timer and never needs manual recovery.
    pub fn tick(&self) {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        if !inner.running {
            return;
        }
        let before = inner.state.clone();

        if let Some(next) = inner.devtools_next_poll {
            if now >= next {
                self.evaluate_devtools(&mut inner, now);
                inner.devtools_next_poll = Some(now + inner.config.devtools_poll_interval());
            }
        }

        self.refresh(&mut inner, now);
        let after = inner.state.clone();
        drop(inner);
        if after != before {
            self.notify(&after);
        }
    }

    /// Stop the monitor.
    ///
    /// Idempotent. Clears all pending deadlines in one synchronous pass
    /// before removing injected styles, and restores the display to
    /// `Normal`.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if !inner.running {
            return;
        }
        inner.running = false;
        // Deadlines first, teardown in reverse of start order
        inner.blur_until = None;
        inner.grace_until = None;
        inner.warning_until = None;
        inner.devtools_next_poll = None;
        inner.devtools_open = false;
        inner.hidden = false;
        inner.focused = true;
        inner.pointer.reset();
        inner.state.display = DisplayMode::Normal;
        inner.state.last_warning = None;
        let snapshot = inner.state.clone();
        drop(inner);

        if let Err(e) = self.hooks.remove_protection_styles() {
            debug!("protection style removal unavailable: {}", e);
        }
        debug!("monitor stopped");
        self.notify(&snapshot);
    }

    /// Whether the monitor is still running.
    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Snapshot of the current protection state.
    pub fn state(&self) -> ProtectionState {
        self.inner.lock().state.clone()
    }

    /// Register an observer called after every state change.
    ///
    /// Observers are isolated from each other: a panicking observer is
    /// logged and skipped, the rest still run.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&ProtectionState) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Box::new(callback));
    }

    /// Internal dispatch: per-kind state effects. Side effects are state
    /// transitions only; hook failures are logged and swallowed.
    fn on_signal(&self, inner: &mut Inner, signal: Signal) {
        trace!("signal: {:?}", signal.kind);
        match signal.kind {
            SignalKind::RightClick => {
                self.show_warning(inner, signal.at, "Right-click disabled for content protection");
            }
            SignalKind::KeyCombo => {
                // Warning text carries the specific key; supplied by the caller
            }
            SignalKind::Screenshot => {
                inner.state.activity_count += 1;
                inner.blur_until = Some(signal.at + inner.config.blur_duration());
                self.show_warning(
                    inner,
                    signal.at,
                    "Screenshot attempt detected! Content temporarily hidden.",
                );
                if inner.config.capabilities.clipboard {
                    if let Err(e) = self.hooks.clear_clipboard() {
                        self.on_signal(
                            inner,
                            Signal {
                                kind: SignalKind::ClipboardSuspected,
                                at: signal.at,
                            },
                        );
                        debug!("clipboard clear unavailable: {}", e);
                    }
                }
            }
            SignalKind::VisibilityChange => {
                if inner.hidden {
                    self.show_warning(inner, signal.at, "Tab visibility changed - content protected");
                } else {
                    // Grace period before unblurring avoids flicker on a
                    // fast tab-switch-back
                    inner.grace_until = Some(signal.at + inner.config.visibility_grace());
                }
            }
            SignalKind::WindowBlur => {
                inner.state.activity_count += 1;
            }
            SignalKind::WindowFocus => {
                inner.grace_until = Some(signal.at + inner.config.focus_grace());
            }
            SignalKind::RapidPointer => {
                inner.state.activity_count += 1;
                if inner.state.activity_count > inner.config.activity_escalation_threshold {
                    inner.blur_until = Some(signal.at + inner.config.blur_duration());
                    self.show_warning(inner, signal.at, "Suspicious pointer activity detected");
                }
            }
            SignalKind::DevToolsSuspected => {
                self.show_warning(inner, signal.at, "Developer tools detected! Please close them.");
            }
            SignalKind::ClipboardSuspected => {
                // Diagnostic only; the capture may have reached the clipboard
            }
        }
    }

    /// Re-check the dimension-delta condition from the last sample. The
    /// blur it causes holds exactly while the condition does.
    fn evaluate_devtools(&self, inner: &mut Inner, now: Instant) {
        let open = inner
            .last_metrics
            .map_or(false, |m| m.exceeds(inner.config.devtools_size_threshold));
        if open && !inner.devtools_open {
            self.on_signal(
                inner,
                Signal {
                    kind: SignalKind::DevToolsSuspected,
                    at: now,
                },
            );
        }
        inner.devtools_open = open;
    }

    fn show_warning(&self, inner: &mut Inner, now: Instant, message: &str) {
        if !inner.config.warnings_enabled {
            return;
        }
        // A newer warning supersedes the previous dismissal deadline
        inner.state.last_warning = Some(message.to_string());
        inner.warning_until = Some(now + inner.config.warning_duration());
        debug!("warning: {}", message);
    }

    /// Recompute `display` from hold conditions and deadlines.
    fn refresh(&self, inner: &mut Inner, now: Instant) {
        if let Some(t) = inner.blur_until {
            if now >= t {
                inner.blur_until = None;
            }
        }
        if let Some(t) = inner.grace_until {
            if now >= t {
                inner.grace_until = None;
            }
        }
        if let Some(t) = inner.warning_until {
            if now >= t {
                inner.warning_until = None;
            }
        }

        let held = inner.hidden || !inner.focused || inner.devtools_open;
        let display = if held || inner.blur_until.is_some() || inner.grace_until.is_some() {
            DisplayMode::Blurred
        } else if inner.warning_until.is_some() {
            DisplayMode::Warned
        } else {
            DisplayMode::Normal
        };

        if display != inner.state.display {
            debug!("display {:?} -> {:?}", inner.state.display, display);
            inner.state.display = display;
        }
    }

    fn notify(&self, state: &ProtectionState) {
        for callback in self.subscribers.read().iter() {
            if catch_unwind(AssertUnwindSafe(|| callback(state))).is_err() {
                warn!("state observer panicked; skipping");
            }
        }
    }
}
