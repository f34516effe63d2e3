//! Query cache sizing.

use std::num::NonZeroUsize;

use serde::Deserialize;

const DEFAULT_LIST_LIMIT: usize = 50;
const DEFAULT_DETAIL_LIMIT: usize = 200;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum list entries (one per resource and filter combination).
    pub list_limit: usize,
    /// Maximum detail entries across all resources.
    pub detail_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            detail_limit: DEFAULT_DETAIL_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns the list limit as NonZeroUsize, clamping to 1 if zero.
    pub fn list_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.list_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the detail limit as NonZeroUsize, clamping to 1 if zero.
    pub fn detail_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.detail_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
