//! Matcher configuration

use std::num::NonZeroUsize;

/// Which raw occurrences take part in ordinal counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OccurrencePolicy {
    /// Every non-overlapping occurrence counts, wherever it appears
    #[default]
    Literal,
    /// Only occurrences sitting on markup boundaries a candidate node could
    /// occupy count (a text node `a` does not occur inside the tag `<a>`)
    MarkupAligned,
}

/// Options for [`MatchSession`](super::MatchSession) and
/// [`is_matching_node_context_with`](super::is_matching_node_context_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub policy: OccurrencePolicy,
    /// Number of per-needle occurrence lists a session keeps
    pub cache_capacity: NonZeroUsize,
}

impl MatchOptions {
    pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    pub fn with_policy(mut self, policy: OccurrencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            policy: OccurrencePolicy::Literal,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }
}
