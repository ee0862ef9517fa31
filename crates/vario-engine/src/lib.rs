//! vario-engine - Reload decisions
//!
//! Keeps rendered images synchronized with the smallest server-generated
//! variant that still covers their displayed size. A sweep walks every
//! managed element, decides per element whether a new variant is worth
//! fetching, and renders the request URLs; the event scheduler turns page
//! load and debounced resize events into sweeps.

mod engine;
mod scheduler;

pub use engine::{DecisionEngine, ReloadIntent, ReloadRequest, RATIO_EPSILON};
pub use scheduler::{Debouncer, EventScheduler, PageEvent, RESIZE_DEBOUNCE};

/// The page event driving one full sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepEvent {
    /// Initial page load; every element refreshes unconditionally.
    PageLoad,
    /// Viewport resize; elements reload only past the delta thresholds.
    Resize,
}
