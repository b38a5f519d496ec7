//! Harness runner: drives a traced search over a world and packages the
//! result as a [`RunReportV1`].
//!
//! The runner uses only `frontier_search` APIs. It does not implement any
//! search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! policy (record_trace forced on) → Search::new(world, start, initial_cost)
//!   → next_outcome() → trace() → to_canonical_json_bytes() → digest()
//!   → RunReportV1 (report JSON + trace bytes + trace digest)
//! ```

use serde::Serialize;
use sha2::{Digest, Sha256};

use frontier_search::{Failure, Search, SearchError, SearchOutcome, SearchPolicy, TraceError};

use crate::contract::WorldV1;

/// Domain prefix for the report digest.
pub const DOMAIN_RUN_REPORT: &[u8] = b"FRONTIER::RUN_REPORT::V1\0";

/// Schema tag written into every report.
pub const RUN_REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError<E> {
    /// The search rejected the policy or a world callback failed.
    Search(SearchError<E>),
    /// Trace or report serialization failed.
    Trace(TraceError),
    /// The search returned without a trace even though one was requested.
    MissingTrace,
}

impl<E: std::fmt::Display> std::fmt::Display for RunError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Trace(e) => write!(f, "trace failed: {e}"),
            Self::MissingTrace => write!(f, "search produced no trace"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for RunError<E> {}

impl<E> From<SearchError<E>> for RunError<E> {
    fn from(e: SearchError<E>) -> Self {
        Self::Search(e)
    }
}

impl<E> From<TraceError> for RunError<E> {
    fn from(e: TraceError) -> Self {
        Self::Trace(e)
    }
}

/// How a run ended, with nodes and costs already in JSON form.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcomeV1 {
    Solved {
        path: Vec<serde_json::Value>,
        cost: serde_json::Value,
        steps: u64,
    },
    Failed(Failure),
}

impl RunOutcomeV1 {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Solved { path, cost, steps } => serde_json::json!({
                "cost": cost,
                "path": path,
                "path_len": path.len(),
                "steps": steps,
                "type": "solved",
            }),
            Self::Failed(Failure::Exhausted) => serde_json::json!({"type": "exhausted"}),
            Self::Failed(Failure::StepBudgetExceeded { steps }) => serde_json::json!({
                "steps": steps,
                "type": "step_budget_exceeded",
            }),
            Self::Failed(Failure::Aborted) => serde_json::json!({"type": "aborted"}),
        }
    }
}

/// Self-contained result of one harness run.
///
/// `trace_bytes` is the canonical JSON of the search trace and
/// `trace_digest` its content digest; the report JSON binds the digest, so
/// the two travel together.
#[derive(Debug, Clone)]
pub struct RunReportV1 {
    pub world_id: String,
    pub outcome: RunOutcomeV1,
    pub total_steps: u64,
    pub total_pulls: u64,
    pub registry_size: u64,
    pub policy: serde_json::Value,
    pub trace_bytes: Vec<u8>,
    pub trace_digest: String,
}

impl RunReportV1 {
    /// Report as JSON. Object keys are sorted by `serde_json::Map`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "outcome": self.outcome.to_json_value(),
            "policy": self.policy,
            "registry_size": self.registry_size,
            "schema_version": RUN_REPORT_SCHEMA_VERSION,
            "total_pulls": self.total_pulls,
            "total_steps": self.total_steps,
            "trace_digest": self.trace_digest,
            "world_id": self.world_id,
        })
    }

    /// Canonical report bytes: compact JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Serialize`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, TraceError> {
        serde_json::to_vec(&self.to_json_value()).map_err(|e| TraceError::Serialize {
            detail: e.to_string(),
        })
    }

    /// `sha256:` digest of the canonical report bytes under
    /// [`DOMAIN_RUN_REPORT`].
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Serialize`] if serialization fails.
    pub fn digest(&self) -> Result<String, TraceError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(domain_digest(DOMAIN_RUN_REPORT, &bytes))
    }
}

/// `"sha256:" + hex(sha256(domain || bytes))`.
#[must_use]
pub fn domain_digest(domain: &[u8], bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Run a world to its first solution (or failure) with tracing forced on.
///
/// Budget and dedup settings come from `policy`; `record_trace` is always
/// enabled because the report binds the trace digest.
///
/// # Errors
///
/// Returns [`RunError::Search`] on policy rejection or callback failure,
/// and [`RunError::Trace`] if a node, cost or the trace fails to serialize.
pub fn run_world<W>(world: &W, policy: &SearchPolicy) -> Result<RunReportV1, RunError<W::Error>>
where
    W: WorldV1,
    W::Node: Serialize,
    W::Cost: Serialize,
{
    let policy = SearchPolicy {
        record_trace: true,
        ..policy.clone()
    };
    let world_id = world.world_id().to_string();
    tracing::info!(world_id = %world_id, "harness run started");

    let mut search = Search::new(world, world.start(), world.initial_cost(), &policy)?;
    let outcome = match search.next_outcome()? {
        SearchOutcome::Success(solution) => RunOutcomeV1::Solved {
            path: solution
                .path
                .iter()
                .map(to_json)
                .collect::<Result<_, _>>()?,
            cost: to_json(&solution.cost)?,
            steps: solution.steps,
        },
        SearchOutcome::Failure(failure) => RunOutcomeV1::Failed(failure),
    };

    let trace = search.trace().ok_or(RunError::MissingTrace)?;
    let trace_bytes = trace.to_canonical_json_bytes()?;
    let trace_digest = trace.digest()?;

    tracing::info!(
        world_id = %world_id,
        solved = outcome.is_solved(),
        steps = trace.metadata.total_steps,
        trace_digest = %trace_digest,
        "harness run finished"
    );

    Ok(RunReportV1 {
        world_id,
        outcome,
        total_steps: trace.metadata.total_steps,
        total_pulls: trace.metadata.total_pulls,
        registry_size: trace.metadata.registry_size,
        policy: policy.to_json_value(),
        trace_bytes,
        trace_digest,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, TraceError> {
    serde_json::to_value(value).map_err(|e| TraceError::Serialize {
        detail: e.to_string(),
    })
}
