//! Checker configuration.

use rbz_common::limits::MAX_SUBTYPE_DEPTH;

/// Policy knobs for a subtype checking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Most nested type pairs the checker descends into before failing with
    /// `DepthExceeded`. Method and overload trace entries are not counted.
    pub max_depth: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SUBTYPE_DEPTH,
        }
    }
}

impl CheckerConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
