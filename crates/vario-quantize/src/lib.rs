//! vario-quantize - Size quantization
//!
//! Maps a requested display size to a discrete bucket size that is never
//! smaller than requested (except explicitly allowed undersized cases) and
//! is chosen from a small, predictable set so that repeated near-identical
//! requests converge on cache hits at the image-serving tier.

mod flags;
mod size;
mod strategy;

pub use flags::{FeatureFlags, NoFlags, StaticFlags, STRATEGY_FLAG};
pub use size::{scale_from_step, scale_size, Size};
pub use strategy::{first_candidate, quantize, TruncationStrategy};

/// Pixel granularity separating adjacent quantized sizes.
///
/// The effective step is scaled proportionally to the source image's
/// native resolution; see [`scale_from_step`].
pub const STEP_MIN: u32 = 50;
