//! vario-dom - Element model
//!
//! Stable element identities, per-element configuration, and the host
//! trait through which the engine observes and mutates the document.

mod config;
mod host;

pub use config::{Action, AspectRatio, ConfigError, ImageConfig};
pub use host::{ImageHost, MemoryHost};

/// CSS class opting an image element into management.
pub const MARKER_CLASS: &str = "lt-responsive-img";

/// Stable element identifier.
///
/// Stands in for a DOM node reference; all engine state is keyed by it
/// instead of being attached to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);
