//! Search policy types.

use crate::error::SearchError;

/// Budget, dedup and recording configuration for one search.
///
/// The default is unbounded: no step cap, one entry per node, no trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on driver steps (live pops). `None` runs until a solution or
    /// exhaustion, which may be forever on infinite graphs.
    pub max_steps: Option<u64>,
    /// How rediscovered nodes are matched to existing entries.
    pub dedup: DedupPolicy,
    /// Record a [`crate::SearchTraceV1`] event log while searching.
    pub record_trace: bool,
}

impl SearchPolicy {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_steps` is `Some(0)`,
    /// which would stop the search before the start node is checked.
    pub fn validate<E>(&self) -> Result<(), SearchError<E>> {
        if self.max_steps == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_steps must be at least 1 (use None for no cap)".into(),
            });
        }
        Ok(())
    }

    /// Policy echo recorded in trace metadata.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "dedup": self.dedup.as_str(),
            "max_steps": self.max_steps,
            "record_trace": self.record_trace,
        })
    }

    /// Default policy with trace recording switched on.
    #[must_use]
    pub fn traced() -> Self {
        Self {
            record_trace: true,
            ..Self::default()
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_steps: None,
            dedup: DedupPolicy::BestKnownCost,
            record_trace: false,
        }
    }
}

/// Dedup policy: whether the registry is keyed by node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// One entry per distinct node; candidates that do not strictly improve
    /// the best-known cost are pruned. Default.
    BestKnownCost,
    /// Every discovery is a new entry and nothing is pruned. Only sound on
    /// tree-shaped spaces, where it saves the node index.
    Off,
}

impl DedupPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestKnownCost => "best_known_cost",
            Self::Off => "off",
        }
    }
}
