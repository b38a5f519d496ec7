//! `SearchTraceV1`: ordered event log of one search.
//!
//! The event list is the decision surface: every pop that reached the
//! termination check, and every pulled edge with what the frontier did with
//! it, in the order it happened. Entry summaries are a derived index for
//! path reconstruction and inspection.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::node::{EntryId, EntryPhase};

/// Domain prefix for trace content hashing.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"FRONTIER::SEARCH_TRACE::V1\0";

/// The complete trace of a search, as of the moment it was taken.
#[derive(Debug, Clone)]
pub struct SearchTraceV1<N, C> {
    /// Ordered events.
    pub events: Vec<TraceEvent<C>>,
    /// One summary per registry entry, in discovery order.
    pub entries: Vec<EntrySummary<N, C>>,
    /// Aggregate counters and policy echo.
    pub metadata: TraceMetadata,
}

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent<C> {
    /// A new entry was created (the start node has no parent).
    Discovered {
        entry: EntryId,
        parent: Option<EntryId>,
        cost: C,
    },
    /// A strictly cheaper path replaced the known one.
    Relaxed {
        entry: EntryId,
        parent: EntryId,
        from: C,
        to: C,
        reopened: bool,
    },
    /// A pulled candidate that did not improve on the known cost.
    Pruned {
        entry: EntryId,
        parent: EntryId,
        cost: C,
    },
    /// A pending entry was popped and the termination predicate evaluated.
    Checked {
        step: u64,
        entry: EntryId,
        cost: C,
        is_goal: bool,
    },
    /// An entry's cursor reported end of sequence.
    CursorDone { entry: EntryId },
}

/// Derived per-entry summary.
#[derive(Debug, Clone)]
pub struct EntrySummary<N, C> {
    pub entry: EntryId,
    pub node: N,
    pub parent: Option<EntryId>,
    pub best_cost: C,
    pub phase: EntryPhase,
    pub pops: u64,
    pub pulls: u64,
}

/// Aggregate counters.
#[derive(Debug, Clone)]
pub struct TraceMetadata {
    pub termination: TerminationReason,
    pub total_steps: u64,
    pub total_pulls: u64,
    pub total_solutions: u64,
    pub stale_pops: u64,
    pub frontier_high_water: u64,
    pub registry_size: u64,
    /// Echo of [`crate::SearchPolicy::to_json_value`].
    pub policy: serde_json::Value,
}

/// Why the driver last stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The driver has not stopped yet.
    Running,
    /// The most recent stop yielded a solution at this entry.
    SolutionFound { entry: EntryId },
    /// The frontier emptied.
    FrontierExhausted,
    /// `max_steps` was reached.
    StepBudgetExceeded,
    /// A callback returned an error.
    CallbackFailed,
}

/// Failure to produce canonical trace bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A node or cost could not be represented as JSON.
    Serialize { detail: String },
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize { detail } => write!(f, "trace serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for TraceError {}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl<N: Serialize, C: Serialize> SearchTraceV1<N, C> {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// Object keys come out sorted (`serde_json::Map` is a `BTreeMap` without
    /// the `preserve_order` feature) and the output is compact, so equal
    /// traces give equal bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Serialize`] if a node or cost fails to serialize.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, TraceError> {
        let value = self.to_json_value()?;
        serde_json::to_vec(&value).map_err(|e| TraceError::Serialize {
            detail: e.to_string(),
        })
    }

    /// Content digest: `sha256:` + hex of `SHA-256(DOMAIN || canonical bytes)`.
    ///
    /// # Errors
    ///
    /// Same as [`SearchTraceV1::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<String, TraceError> {
        let bytes = self.to_canonical_json_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_SEARCH_TRACE);
        hasher.update(&bytes);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Serialize`] if a node or cost fails to serialize.
    pub fn to_json_value(&self) -> Result<serde_json::Value, TraceError> {
        let events = self
            .events
            .iter()
            .map(event_to_json)
            .collect::<Result<Vec<_>, _>>()?;
        let entries = self
            .entries
            .iter()
            .map(summary_to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serde_json::json!({
            "entries": entries,
            "events": events,
            "metadata": metadata_to_json(&self.metadata),
        }))
    }
}

impl<N, C> SearchTraceV1<N, C> {
    /// Edges pulled in search order as `(from, to)` entry pairs.
    #[must_use]
    pub fn pulled_edges(&self) -> Vec<(EntryId, EntryId)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Discovered {
                    entry,
                    parent: Some(parent),
                    ..
                }
                | TraceEvent::Relaxed { entry, parent, .. }
                | TraceEvent::Pruned { entry, parent, .. } => Some((*parent, *entry)),
                _ => None,
            })
            .collect()
    }

    /// Entries in the order their termination check ran.
    #[must_use]
    pub fn checked_order(&self) -> Vec<EntryId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Checked { entry, .. } => Some(*entry),
                _ => None,
            })
            .collect()
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value, TraceError> {
    serde_json::to_value(value).map_err(|e| TraceError::Serialize {
        detail: e.to_string(),
    })
}

fn event_to_json<C: Serialize>(event: &TraceEvent<C>) -> Result<serde_json::Value, TraceError> {
    let value = match event {
        TraceEvent::Discovered {
            entry,
            parent,
            cost,
        } => serde_json::json!({
            "cost": to_value(cost)?,
            "entry": entry.as_u64(),
            "parent": parent.map(EntryId::as_u64),
            "type": "discovered",
        }),
        TraceEvent::Relaxed {
            entry,
            parent,
            from,
            to,
            reopened,
        } => serde_json::json!({
            "entry": entry.as_u64(),
            "from": to_value(from)?,
            "parent": parent.as_u64(),
            "reopened": reopened,
            "to": to_value(to)?,
            "type": "relaxed",
        }),
        TraceEvent::Pruned {
            entry,
            parent,
            cost,
        } => serde_json::json!({
            "cost": to_value(cost)?,
            "entry": entry.as_u64(),
            "parent": parent.as_u64(),
            "type": "pruned",
        }),
        TraceEvent::Checked {
            step,
            entry,
            cost,
            is_goal,
        } => serde_json::json!({
            "cost": to_value(cost)?,
            "entry": entry.as_u64(),
            "is_goal": is_goal,
            "step": step,
            "type": "checked",
        }),
        TraceEvent::CursorDone { entry } => serde_json::json!({
            "entry": entry.as_u64(),
            "type": "cursor_done",
        }),
    };
    Ok(value)
}

fn summary_to_json<N: Serialize, C: Serialize>(
    s: &EntrySummary<N, C>,
) -> Result<serde_json::Value, TraceError> {
    Ok(serde_json::json!({
        "best_cost": to_value(&s.best_cost)?,
        "entry": s.entry.as_u64(),
        "node": to_value(&s.node)?,
        "parent": s.parent.map(EntryId::as_u64),
        "phase": s.phase.as_str(),
        "pops": s.pops,
        "pulls": s.pulls,
    }))
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "policy": m.policy,
        "registry_size": m.registry_size,
        "stale_pops": m.stale_pops,
        "termination": termination_reason_to_json(m.termination),
        "total_pulls": m.total_pulls,
        "total_solutions": m.total_solutions,
        "total_steps": m.total_steps,
    })
}

fn termination_reason_to_json(r: TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::Running => serde_json::json!({"type": "running"}),
        TerminationReason::SolutionFound { entry } => {
            serde_json::json!({"entry": entry.as_u64(), "type": "solution_found"})
        }
        TerminationReason::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReason::StepBudgetExceeded => {
            serde_json::json!({"type": "step_budget_exceeded"})
        }
        TerminationReason::CallbackFailed => serde_json::json!({"type": "callback_failed"}),
    }
}
