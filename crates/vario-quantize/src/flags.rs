//! Feature Flags
//!
//! Synchronous boolean flag lookup. The quantizer consults one flag on
//! every call, so implementations must be cheap and never block.

use std::collections::HashSet;

/// Flag selecting the iterative truncation strategy.
pub const STRATEGY_FLAG: &str = "D-01463";

/// Boolean feature-flag lookup.
pub trait FeatureFlags {
    /// True when the named flag is active.
    fn is_active(&self, flag: &str) -> bool;
}

/// All flags inactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlags;

impl FeatureFlags for NoFlags {
    fn is_active(&self, _flag: &str) -> bool {
        false
    }
}

/// Fixed flag set decided at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticFlags {
    active: HashSet<String>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a flag
    pub fn enable(mut self, flag: &str) -> Self {
        self.active.insert(flag.to_string());
        self
    }
}

impl FeatureFlags for StaticFlags {
    fn is_active(&self, flag: &str) -> bool {
        self.active.contains(flag)
    }
}
