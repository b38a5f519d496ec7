//! World contract: what the runner needs beyond the three search callbacks.

use frontier_search::SearchProblem;

/// A search problem with a fixed start, runnable by the harness.
///
/// A world provides:
/// - A unique identifier
/// - The start node and its initial cost
/// - The callbacks, through its [`SearchProblem`] impl
///
/// A world does NOT provide tracing, digests or report assembly (runner's
/// job).
pub trait WorldV1: SearchProblem {
    /// Unique world identifier (e.g., `"grid_walled_20"`).
    fn world_id(&self) -> &str;

    /// Where the search begins.
    fn start(&self) -> Self::Node;

    /// Cost assigned to the start node.
    fn initial_cost(&self) -> Self::Cost;
}
