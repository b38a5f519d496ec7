//! Frontier Search: best-first search over lazily produced, cost-sorted
//! neighbor sequences.
//!
//! Each node hands the search a cursor over its neighbors in ascending edge
//! weight. The frontier keeps one resumable cursor per open node and pulls a
//! single neighbor at a time from whichever node currently holds the cheapest
//! unexplored edge, so a node's tail of expensive edges is never touched once
//! a goal has been settled below it.
//!
//! # Crate dependency graph
//!
//! ```text
//! frontier_search  ←  frontier_harness  ←  lock-tests / benchmarks
//! (cursor, frontier,   (worlds, oracle,
//!  driver, trace)       runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`] : the three caller callbacks (neighbors, goal, combine)
//! - [`NeighborCursor`] / [`Pull`] : explicit "try pull next" cursor contract
//! - [`FrontierManager`] : registry of entries plus the lazily-deleted queue
//! - [`Search`] : the driver; an iterator over solutions in cost order
//! - [`SearchPolicy`] : step budget, dedup policy, trace recording
//! - [`SearchTraceV1`] : ordered event log with a canonical digest

#![forbid(unsafe_code)]

pub mod combine;
pub mod contract;
pub mod cursor;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;

pub use combine::{Additive, Bottleneck, Combine};
pub use contract::{NeighborCursor, Pull, SearchProblem};
pub use cursor::{IterCursor, TryIterCursor};
pub use error::SearchError;
pub use frontier::{Discovery, FrontierManager};
pub use node::{EntryId, EntryPhase, SearchEntry};
pub use policy::{DedupPolicy, SearchPolicy};
pub use search::{best_first_search, Failure, FnProblem, Search, SearchOutcome, Solution};
pub use trace::{
    EntrySummary, SearchTraceV1, TerminationReason, TraceError, TraceEvent, TraceMetadata,
};
