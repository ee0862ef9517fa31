//! Event Scheduler
//!
//! Two subscriptions with different lifecycles drive sweeps: page load is
//! one-shot and disarms after its first sweep; resize is persistent and
//! trailing-edge debounced so a resize storm yields one sweep per
//! quiescence window.

use std::time::{Duration, Instant};

use crate::SweepEvent;

/// Quiescence window for resize storms.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debounce.
///
/// Every signal pushes the deadline out by the full window; only once the
/// window passes with no further signal does [`Debouncer::poll`] fire, and
/// it fires exactly once per quiet period. Deterministic state machine so
/// it is testable without timers; [`Debouncer::wait`] wires it to smol's
/// timer for async drivers.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record a signal at `now`, restarting the quiescence window.
    pub fn signal(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True while a signal awaits its window.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the window has elapsed since the last signal.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Sleep until the current deadline. Returns immediately when nothing
    /// is pending; a caller then polls to consume the firing.
    pub async fn wait(&self) {
        if let Some(deadline) = self.deadline {
            smol::Timer::at(deadline).await;
        }
    }
}

/// A page event as delivered by the embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Load,
    Resize,
}

/// Maps page events to sweeps.
#[derive(Debug)]
pub struct EventScheduler {
    load_armed: bool,
    resize: Debouncer,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::with_window(RESIZE_DEBOUNCE)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            load_armed: true,
            resize: Debouncer::new(window),
        }
    }

    /// Feed one page event. A returned sweep must run immediately; resize
    /// events never sweep here, they only arm the debouncer.
    pub fn on_event(&mut self, event: PageEvent, now: Instant) -> Option<SweepEvent> {
        match event {
            PageEvent::Load => {
                if self.load_armed {
                    self.load_armed = false;
                    Some(SweepEvent::PageLoad)
                } else {
                    tracing::trace!("duplicate load event ignored");
                    None
                }
            }
            PageEvent::Resize => {
                self.resize.signal(now);
                None
            }
        }
    }

    /// Check the resize debouncer; returns a sweep when a quiet window has
    /// passed since the last resize signal.
    pub fn poll(&mut self, now: Instant) -> Option<SweepEvent> {
        self.resize.poll(now).then_some(SweepEvent::Resize)
    }

    /// True while a debounced resize sweep is still due.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Async wait for the pending resize window, if any.
    pub async fn wait_resize(&self) {
        self.resize.wait().await;
    }
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}
