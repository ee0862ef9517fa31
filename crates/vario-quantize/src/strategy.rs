//! Quantization Strategies
//!
//! Two historical variants of the round-up walk survive in production and
//! are selected at runtime by feature flag. They share the same contract
//! and differ only in where integer truncation happens, which can move the
//! result by a pixel at boundary sizes. They must stay distinct and
//! swappable; callers pick one via [`TruncationStrategy::from_flags`].

use crate::flags::{FeatureFlags, STRATEGY_FLAG};
use crate::size::{scale_from_step, scale_size, Size};
use crate::STEP_MIN;

/// Where truncation happens while walking the quantization sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationStrategy {
    /// Each step is computed from the undivided candidate as
    /// `trunc(candidate / scale^k)`; truncation applied once per step.
    #[default]
    Geometric,
    /// Each step truncates the previous truncated value,
    /// `trunc(previous / scale)`.
    Iterative,
}

impl TruncationStrategy {
    /// Select the strategy from the external flag service.
    pub fn from_flags(flags: &dyn FeatureFlags) -> Self {
        if flags.is_active(STRATEGY_FLAG) {
            Self::Iterative
        } else {
            Self::Geometric
        }
    }
}

/// Largest size we would serve, reshaped to the requested aspect ratio.
///
/// Starts from the original resolution. With `allow_undersized` the
/// original is first grown step-by-step until it covers the requested
/// size, so callers may ask for more pixels than the source has (the
/// matte border fills the remainder).
pub fn first_candidate(requested: Size, original: Size, allow_undersized: bool) -> Size {
    let ratio = requested.ratio();
    let mut base = original;

    if allow_undersized {
        let scale = scale_from_step(original, STEP_MIN);
        while !base.covers(requested) {
            // Reciprocal of the shrink scale grows the size instead.
            base = scale_size(base, 1.0 / scale);
        }
    }

    Size::new(
        if requested.width < requested.height {
            base.width
        } else {
            (base.height as f64 * ratio) as u32
        },
        if requested.height < requested.width {
            base.height
        } else {
            (base.width as f64 / ratio) as u32
        },
    )
}

/// Round `requested` up to a size from the discrete geometric sequence
/// `candidate / scale^k`, so that many near-identical requests land on the
/// same cached variant.
///
/// Walks down from the candidate and returns the last size that still
/// covered `requested` in both dimensions. If even the candidate does not
/// cover it (undersized source without permission), the candidate is
/// returned unchanged.
///
/// Both `requested` and `original` must have non-zero dimensions.
pub fn quantize(
    requested: Size,
    original: Size,
    allow_undersized: bool,
    strategy: TruncationStrategy,
) -> Size {
    let candidate = first_candidate(requested, original, allow_undersized);
    let scale = scale_from_step(original, STEP_MIN);

    let mut chosen = candidate;
    let mut current = candidate;

    match strategy {
        TruncationStrategy::Geometric => {
            let mut exponent = 1;
            while current.covers(requested) {
                chosen = current;
                current = scale_size(candidate, scale.powi(exponent));
                exponent += 1;
            }
        }
        TruncationStrategy::Iterative => {
            while current.covers(requested) {
                chosen = current;
                current = scale_size(current, scale);
            }
        }
    }

    tracing::trace!(
        requested.width,
        requested.height,
        chosen.width,
        chosen.height,
        ?strategy,
        "quantized size"
    );
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{NoFlags, StaticFlags};

    const STRATEGIES: [TruncationStrategy; 2] =
        [TruncationStrategy::Geometric, TruncationStrategy::Iterative];

    #[test]
    fn test_strategy_from_flags() {
        assert_eq!(
            TruncationStrategy::from_flags(&NoFlags),
            TruncationStrategy::Geometric
        );
        let flags = StaticFlags::new().enable(STRATEGY_FLAG);
        assert_eq!(
            TruncationStrategy::from_flags(&flags),
            TruncationStrategy::Iterative
        );
    }

    #[test]
    fn test_first_candidate_keeps_requested_ratio() {
        // Original 1000x500, requesting landscape 600x300 (same 2:1 ratio).
        let candidate = first_candidate(Size::new(600, 300), Size::new(1000, 500), false);
        assert_eq!(candidate, Size::new(1000, 500));
    }

    #[test]
    fn test_first_candidate_reshapes_to_narrower_ratio() {
        // 4:3 request against a 2:1 original: the original height stays
        // and the width is rebuilt from the requested ratio.
        let candidate = first_candidate(Size::new(400, 300), Size::new(1000, 500), false);
        // width = trunc(500 * 4/3) = 666, height = original 500
        assert_eq!(candidate, Size::new(666, 500));
    }

    #[test]
    fn test_first_candidate_inflates_when_undersized_allowed() {
        let requested = Size::new(1200, 600);
        let original = Size::new(1000, 500);
        let candidate = first_candidate(requested, original, true);
        assert!(candidate.covers(requested));
    }

    #[test]
    fn test_quantize_never_underserves() {
        for strategy in STRATEGIES {
            for (rw, rh) in [(100, 80), (640, 480), (799, 599), (333, 217)] {
                let requested = Size::new(rw, rh);
                let q = quantize(requested, Size::new(800, 600), false, strategy);
                assert!(
                    q.covers(requested),
                    "{strategy:?} underserved {requested:?} with {q:?}"
                );
            }
        }
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let requested = Size::new(613, 402);
        let original = Size::new(1920, 1080);
        for strategy in STRATEGIES {
            let a = quantize(requested, original, false, strategy);
            let b = quantize(requested, original, false, strategy);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_quantize_is_monotonic() {
        // Fixed 16:9 request ratio so only the requested area varies.
        let original = Size::new(1600, 900);
        for strategy in STRATEGIES {
            let mut prev = Size::new(0, 0);
            for w in (160..=1600).step_by(16) {
                let h = w * 9 / 16;
                let q = quantize(Size::new(w, h), original, false, strategy);
                assert!(
                    q.width >= prev.width && q.height >= prev.height,
                    "{strategy:?} regressed from {prev:?} to {q:?} at width {w}"
                );
                prev = q;
            }
        }
    }

    #[test]
    fn test_strategies_agree_within_one_pixel() {
        let original = Size::new(1000, 500);
        for (rw, rh) in [(600, 300), (720, 360), (901, 450), (820, 410)] {
            let requested = Size::new(rw, rh);
            let g = quantize(requested, original, false, TruncationStrategy::Geometric);
            let i = quantize(requested, original, false, TruncationStrategy::Iterative);
            assert!(g.width.abs_diff(i.width) <= 1, "{g:?} vs {i:?}");
            assert!(g.height.abs_diff(i.height) <= 1, "{g:?} vs {i:?}");
        }
    }

    #[test]
    fn test_geometric_walk_from_candidate() {
        // Original 1000x500, requested 600x300: scale = (500+50)/500 = 1.1.
        // The walk goes 1000x500, 909x454, 826x413, 751x375, 683x341,
        // 620x310, 564x282 (first size below the request) and must return
        // the 620x310 step.
        let q = quantize(
            Size::new(600, 300),
            Size::new(1000, 500),
            false,
            TruncationStrategy::Geometric,
        );
        assert_eq!(q, Size::new(620, 310));
        assert!(q.covers(Size::new(600, 300)));
    }

    #[test]
    fn test_undersized_candidate_returned_unchanged() {
        // Without undersized permission the candidate cannot cover the
        // request; the walk never starts and the candidate comes back.
        let q = quantize(
            Size::new(2000, 1000),
            Size::new(1000, 500),
            false,
            TruncationStrategy::Geometric,
        );
        assert_eq!(q, Size::new(1000, 500));
    }

    #[test]
    fn test_undersized_result_covers_request() {
        for strategy in STRATEGIES {
            let requested = Size::new(1400, 700);
            let q = quantize(requested, Size::new(1000, 500), true, strategy);
            assert!(q.covers(requested), "{strategy:?} gave {q:?}");
        }
    }
}
