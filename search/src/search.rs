//! Search driver: the select / check / expand loop.

use std::convert::Infallible;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::combine::Combine;
use crate::contract::{Pull, SearchProblem};
use crate::cursor::IterCursor;
use crate::error::SearchError;
use crate::frontier::{Discovery, FrontierManager};
use crate::node::{EntryId, EntryPhase};
use crate::policy::SearchPolicy;
use crate::trace::{EntrySummary, SearchTraceV1, TerminationReason, TraceEvent, TraceMetadata};

/// A path that satisfied the termination predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<N, C> {
    /// Nodes from the start to the goal, inclusive.
    pub path: Vec<N>,
    /// Best-known cost of the goal when it was accepted.
    pub cost: C,
    /// Driver steps taken up to and including the accepting pop.
    pub steps: u64,
}

/// Why no (further) solution was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The frontier emptied: no reachable node satisfies the predicate.
    Exhausted,
    /// `max_steps` was reached first.
    StepBudgetExceeded { steps: u64 },
    /// An earlier call already returned a callback error; the search state
    /// is no longer advanced.
    Aborted,
}

/// Result of driving a search to its next stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    Success(Solution<N, C>),
    Failure(Failure),
}

impl<N, C> SearchOutcome<N, C> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The solution, if one was found.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution<N, C>> {
        match self {
            Self::Success(solution) => Some(solution),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution<N, C>> {
        match self {
            Self::Success(solution) => Some(solution),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(*failure),
        }
    }
}

/// Best-first search driver over a [`SearchProblem`].
///
/// Each step pops the cheapest live frontier item. A pending entry gets its
/// termination check; if it is not a goal its cursor is opened. The entry
/// then yields exactly one neighbor, which is discovered at
/// `combine(cost, weight)`, and the entry is re-queued keyed by that same
/// value: with ascending weights it bounds everything still in the cursor.
///
/// `Search` is also an iterator over solutions in non-decreasing cost order
/// (for monotone `combine`). Accepted goals are settled, not expanded.
pub struct Search<P: SearchProblem> {
    problem: P,
    frontier: FrontierManager<P::Node, P::Cost, P::Cursor>,
    policy: SearchPolicy,
    steps: u64,
    pulls: u64,
    solutions: u64,
    events: Option<Vec<TraceEvent<P::Cost>>>,
    termination: TerminationReason,
    stopped: Option<Failure>,
}

impl<P: SearchProblem> Search<P> {
    /// Prepare a search from `start` with cost `initial_cost` (normally the
    /// identity of `combine`, e.g. zero).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    /// No step is taken in that case.
    pub fn new(
        problem: P,
        start: P::Node,
        initial_cost: P::Cost,
        policy: &SearchPolicy,
    ) -> Result<Self, SearchError<P::Error>> {
        policy.validate()?;

        let mut frontier = FrontierManager::new(policy.dedup);
        let root = frontier.discover(start, initial_cost.clone(), None).id();
        let events = policy.record_trace.then(|| {
            vec![TraceEvent::Discovered {
                entry: root,
                parent: None,
                cost: initial_cost,
            }]
        });
        tracing::debug!(
            max_steps = ?policy.max_steps,
            dedup = policy.dedup.as_str(),
            "search started"
        );

        Ok(Self {
            problem,
            frontier,
            policy: policy.clone(),
            steps: 0,
            pulls: 0,
            solutions: 0,
            events,
            termination: TerminationReason::Running,
            stopped: None,
        })
    }

    /// Drive the search until the next solution or until it cannot continue.
    ///
    /// After a failure every later call returns the same failure.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Callback`] with the fault of the first callback
    /// that failed. Later calls then report [`Failure::Aborted`].
    pub fn next_outcome(
        &mut self,
    ) -> Result<SearchOutcome<P::Node, P::Cost>, SearchError<P::Error>> {
        if let Some(failure) = self.stopped {
            return Ok(SearchOutcome::Failure(failure));
        }

        loop {
            if let Some(max_steps) = self.policy.max_steps {
                if self.steps >= max_steps {
                    tracing::debug!(steps = self.steps, "step budget exceeded");
                    return Ok(self.stop(
                        Failure::StepBudgetExceeded { steps: self.steps },
                        TerminationReason::StepBudgetExceeded,
                    ));
                }
            }

            let Some(id) = self.frontier.pop_best() else {
                tracing::debug!(
                    steps = self.steps,
                    registry = self.frontier.registry_len(),
                    "frontier exhausted"
                );
                return Ok(self.stop(Failure::Exhausted, TerminationReason::FrontierExhausted));
            };
            self.steps += 1;

            match self.step(id) {
                Ok(Some(solution)) => return Ok(SearchOutcome::Success(solution)),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(steps = self.steps, entry = id.as_u64(), "callback failed");
                    self.stopped = Some(Failure::Aborted);
                    self.termination = TerminationReason::CallbackFailed;
                    return Err(e);
                }
            }
        }
    }

    /// One driver step on the popped entry `id`.
    fn step(
        &mut self,
        id: EntryId,
    ) -> Result<Option<Solution<P::Node, P::Cost>>, SearchError<P::Error>> {
        let entry = self.frontier.entry(id);
        let phase = entry.phase();
        let cost = entry.best_cost().clone();
        tracing::trace!(
            step = self.steps,
            entry = id.as_u64(),
            phase = phase.as_str(),
            "pop"
        );

        if phase == EntryPhase::Pending {
            let is_goal = self
                .problem
                .is_goal(entry.node())
                .map_err(SearchError::Callback)?;
            self.record(TraceEvent::Checked {
                step: self.steps,
                entry: id,
                cost: cost.clone(),
                is_goal,
            });

            if is_goal {
                self.frontier.settle(id);
                self.solutions += 1;
                self.termination = TerminationReason::SolutionFound { entry: id };
                let path = self.frontier.path_to(id);
                tracing::debug!(
                    steps = self.steps,
                    entry = id.as_u64(),
                    path_len = path.len(),
                    "solution found"
                );
                return Ok(Some(Solution {
                    path,
                    cost,
                    steps: self.steps,
                }));
            }

            let cursor = self
                .problem
                .neighbors(self.frontier.entry(id).node())
                .map_err(SearchError::Callback)?;
            self.frontier.open_cursor(id, cursor);
        }

        self.pulls += 1;
        match self
            .frontier
            .advance_cursor(id)
            .map_err(SearchError::Callback)?
        {
            Pull::Done => {
                self.record(TraceEvent::CursorDone { entry: id });
            }
            Pull::Next(neighbor, weight) => {
                let new_cost = self
                    .problem
                    .combine(&cost, &weight)
                    .map_err(SearchError::Callback)?;
                let previous = self
                    .events
                    .as_ref()
                    .and(self.frontier.lookup(&neighbor))
                    .map(|known| self.frontier.entry(known).best_cost().clone());
                let discovery = self.frontier.discover(neighbor, new_cost.clone(), Some(id));
                self.record_discovery(discovery, id, previous, &new_cost);
                self.frontier.requeue(id, new_cost);
            }
        }
        Ok(None)
    }

    fn record_discovery(
        &mut self,
        discovery: Discovery,
        parent: EntryId,
        previous: Option<P::Cost>,
        new_cost: &P::Cost,
    ) {
        if let Discovery::Relaxed { id, reopened: true } = discovery {
            tracing::debug!(
                entry = id.as_u64(),
                parent = parent.as_u64(),
                "relaxation reopened a checked entry"
            );
        }
        if self.events.is_none() {
            return;
        }
        let event = match (discovery, previous) {
            (Discovery::Created(entry), _) => TraceEvent::Discovered {
                entry,
                parent: Some(parent),
                cost: new_cost.clone(),
            },
            (Discovery::Relaxed { id, reopened }, Some(from)) => TraceEvent::Relaxed {
                entry: id,
                parent,
                from,
                to: new_cost.clone(),
                reopened,
            },
            (Discovery::Relaxed { id: entry, .. } | Discovery::Pruned(entry), _) => {
                TraceEvent::Pruned {
                    entry,
                    parent,
                    cost: new_cost.clone(),
                }
            }
        };
        self.record(event);
    }

    fn record(&mut self, event: TraceEvent<P::Cost>) {
        if let Some(events) = self.events.as_mut() {
            events.push(event);
        }
    }

    fn stop(
        &mut self,
        failure: Failure,
        reason: TerminationReason,
    ) -> SearchOutcome<P::Node, P::Cost> {
        self.stopped = Some(failure);
        self.termination = reason;
        SearchOutcome::Failure(failure)
    }

    /// Driver steps taken so far (live pops).
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Cursor pulls made so far, end-of-sequence answers included.
    #[must_use]
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    /// Read-only view of the frontier.
    #[must_use]
    pub fn frontier(&self) -> &FrontierManager<P::Node, P::Cost, P::Cursor> {
        &self.frontier
    }

    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    #[must_use]
    pub fn termination(&self) -> TerminationReason {
        self.termination
    }

    /// Snapshot of the trace recorded so far, if the policy asked for one.
    #[must_use]
    pub fn trace(&self) -> Option<SearchTraceV1<P::Node, P::Cost>> {
        let events = self.events.as_ref()?.clone();
        let entries = self
            .frontier
            .entries()
            .map(|(id, entry)| EntrySummary {
                entry: id,
                node: entry.node().clone(),
                parent: entry.parent(),
                best_cost: entry.best_cost().clone(),
                phase: entry.phase(),
                pops: entry.pops(),
                pulls: entry.pulls(),
            })
            .collect();
        Some(SearchTraceV1 {
            events,
            entries,
            metadata: TraceMetadata {
                termination: self.termination,
                total_steps: self.steps,
                total_pulls: self.pulls,
                total_solutions: self.solutions,
                stale_pops: self.frontier.stale_pops(),
                frontier_high_water: self.frontier.high_water(),
                registry_size: self.frontier.registry_len() as u64,
                policy: self.policy.to_json_value(),
            },
        })
    }
}

impl<P: SearchProblem> Iterator for Search<P> {
    type Item = Result<Solution<P::Node, P::Cost>, SearchError<P::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_outcome() {
            Ok(SearchOutcome::Success(solution)) => Some(Ok(solution)),
            Ok(SearchOutcome::Failure(_)) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// [`SearchProblem`] assembled from three closures. Infallible.
///
/// `neighbors` returns anything iterable over `(node, weight)` in ascending
/// weight order; it is wrapped in an [`IterCursor`] and consumed lazily.
pub struct FnProblem<N, C, I, FN, FG, FC> {
    neighbors: FN,
    is_goal: FG,
    combine: FC,
    _marker: PhantomData<fn() -> (N, C, I)>,
}

impl<N, C, I, FN, FG, FC> FnProblem<N, C, I, FN, FG, FC>
where
    FN: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    FG: Fn(&N) -> bool,
    FC: Combine<C>,
{
    pub fn new(neighbors: FN, is_goal: FG, combine: FC) -> Self {
        Self {
            neighbors,
            is_goal,
            combine,
            _marker: PhantomData,
        }
    }
}

impl<N, C, I, FN, FG, FC> SearchProblem for FnProblem<N, C, I, FN, FG, FC>
where
    N: Clone + Eq + Hash,
    C: Clone + Ord,
    FN: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    FG: Fn(&N) -> bool,
    FC: Combine<C>,
{
    type Node = N;
    type Cost = C;
    type Error = Infallible;
    type Cursor = IterCursor<I::IntoIter>;

    fn neighbors(&self, node: &N) -> Result<Self::Cursor, Infallible> {
        Ok(IterCursor::new((self.neighbors)(node).into_iter()))
    }

    fn is_goal(&self, node: &N) -> Result<bool, Infallible> {
        Ok((self.is_goal)(node))
    }

    fn combine(&self, cost: &C, weight: &C) -> Result<C, Infallible> {
        Ok(self.combine.combine(cost, weight))
    }
}

/// Find a minimum-cost path from `start` to a node accepted by `is_goal`.
///
/// `neighbors` must yield `(neighbor, weight)` pairs in ascending weight
/// order; `combine` turns a path cost and an edge weight into the extended
/// path cost (see [`crate::Additive`], [`crate::Bottleneck`]).
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
pub fn best_first_search<N, C, I, FN, FG, FC>(
    start: N,
    initial_cost: C,
    neighbors: FN,
    is_goal: FG,
    combine: FC,
    policy: &SearchPolicy,
) -> Result<SearchOutcome<N, C>, SearchError<Infallible>>
where
    N: Clone + Eq + Hash,
    C: Clone + Ord,
    FN: Fn(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    FG: Fn(&N) -> bool,
    FC: Combine<C>,
{
    let problem = FnProblem::new(neighbors, is_goal, combine);
    Search::new(problem, start, initial_cost, policy)?.next_outcome()
}
