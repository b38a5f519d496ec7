//! Caller-facing callback contracts.

use std::hash::Hash;

/// Result of asking a cursor for its next candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull<N, C> {
    /// The next `(neighbor, weight)` pair in ascending weight order.
    Next(N, C),
    /// End of sequence. The cursor will not be asked again.
    Done,
}

impl<N, C> Pull<N, C> {
    /// Returns `true` for the end-of-sequence sentinel.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A resumable, non-restartable handle over one node's neighbors.
///
/// # Contract
///
/// - Candidates are yielded in ascending weight order. This is assumed, not
///   verified: an unsorted cursor silently voids the optimality guarantee.
/// - Once `Pull::Done` is returned the cursor is dropped; it is never pulled
///   again.
/// - A pull never re-yields a candidate it already produced.
pub trait NeighborCursor<N, C> {
    /// Fault raised by the underlying producer.
    type Error;

    /// Pull the next candidate, or `Pull::Done` at end of sequence.
    ///
    /// # Errors
    ///
    /// Whatever the producer raises; the driver propagates it unchanged.
    fn pull(&mut self) -> Result<Pull<N, C>, Self::Error>;
}

/// The three callbacks a search is parameterised by.
///
/// # Contract
///
/// - `neighbors` returns a cursor sorted ascending by weight.
/// - `is_goal` is a pure function of the node.
/// - `combine` should be non-decreasing in both arguments for shortest-path
///   semantics. Violating this is allowed but the first solution is then no
///   longer guaranteed minimal.
///
/// Any `Err` returned by a callback ends the search and is handed back to the
/// caller as [`crate::SearchError::Callback`].
pub trait SearchProblem {
    /// Node identity. Used as a registry key.
    type Node: Clone + Eq + Hash;
    /// Path cost and edge weight.
    type Cost: Clone + Ord;
    /// Fault type shared by all callbacks.
    type Error;
    /// Cursor returned by [`SearchProblem::neighbors`].
    type Cursor: NeighborCursor<Self::Node, Self::Cost, Error = Self::Error>;

    /// Open a cursor over the neighbors of `node`.
    ///
    /// # Errors
    ///
    /// Domain faults while preparing the sequence.
    fn neighbors(&self, node: &Self::Node) -> Result<Self::Cursor, Self::Error>;

    /// Termination predicate.
    ///
    /// # Errors
    ///
    /// Domain faults while evaluating the predicate.
    fn is_goal(&self, node: &Self::Node) -> Result<bool, Self::Error>;

    /// Tentative path cost of extending a path of cost `cost` by an edge of
    /// weight `weight`.
    ///
    /// # Errors
    ///
    /// Domain faults (overflow, exhausted external budget, ...).
    fn combine(&self, cost: &Self::Cost, weight: &Self::Cost) -> Result<Self::Cost, Self::Error>;
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type Node = P::Node;
    type Cost = P::Cost;
    type Error = P::Error;
    type Cursor = P::Cursor;

    fn neighbors(&self, node: &Self::Node) -> Result<Self::Cursor, Self::Error> {
        (**self).neighbors(node)
    }

    fn is_goal(&self, node: &Self::Node) -> Result<bool, Self::Error> {
        (**self).is_goal(node)
    }

    fn combine(&self, cost: &Self::Cost, weight: &Self::Cost) -> Result<Self::Cost, Self::Error> {
        (**self).combine(cost, weight)
    }
}
