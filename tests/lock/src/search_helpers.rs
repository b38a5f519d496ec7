//! Fault injection and small fixtures shared by the lock suites.

use frontier_harness::contract::WorldV1;
use frontier_harness::worlds::weighted_digraph::{GeneratorConfig, WeightedDigraph};
use frontier_search::{
    Search, SearchOutcome, SearchPolicy, SearchProblem, SearchTraceV1, TraceEvent, TryIterCursor,
};

/// Where a [`FaultyDigraph`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    /// `neighbors(node)` fails.
    Neighbors(u32),
    /// The second pull from `node`'s cursor fails.
    SecondPull(u32),
    /// `is_goal(node)` fails.
    IsGoal(u32),
    /// `combine` fails when the result would exceed the limit.
    CombineAbove(u64),
}

/// Fault raised by a [`FaultyDigraph`] callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedFault {
    pub stage: &'static str,
    pub detail: String,
}

impl std::fmt::Display for InjectedFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "injected fault in {}: {}", self.stage, self.detail)
    }
}

impl std::error::Error for InjectedFault {}

/// A [`WeightedDigraph`] whose callbacks fail at one chosen point.
pub struct FaultyDigraph {
    pub graph: WeightedDigraph,
    pub fault: FaultPoint,
}

type FaultyCursor = TryIterCursor<std::vec::IntoIter<Result<(u32, u64), InjectedFault>>>;

impl SearchProblem for FaultyDigraph {
    type Node = u32;
    type Cost = u64;
    type Error = InjectedFault;
    type Cursor = FaultyCursor;

    fn neighbors(&self, node: &u32) -> Result<FaultyCursor, InjectedFault> {
        if self.fault == FaultPoint::Neighbors(*node) {
            return Err(InjectedFault {
                stage: "neighbors",
                detail: format!("node {node}"),
            });
        }
        let mut items: Vec<_> = self.graph.edges(*node).iter().copied().map(Ok).collect();
        if self.fault == FaultPoint::SecondPull(*node) {
            items.insert(
                1.min(items.len()),
                Err(InjectedFault {
                    stage: "pull",
                    detail: format!("node {node}"),
                }),
            );
        }
        Ok(TryIterCursor::new(items.into_iter()))
    }

    fn is_goal(&self, node: &u32) -> Result<bool, InjectedFault> {
        if self.fault == FaultPoint::IsGoal(*node) {
            return Err(InjectedFault {
                stage: "is_goal",
                detail: format!("node {node}"),
            });
        }
        self.graph.is_goal(node).map_err(|never| match never {})
    }

    fn combine(&self, cost: &u64, weight: &u64) -> Result<u64, InjectedFault> {
        let total = cost + weight;
        match self.fault {
            FaultPoint::CombineAbove(limit) if total > limit => Err(InjectedFault {
                stage: "combine",
                detail: format!("{total} > {limit}"),
            }),
            _ => Ok(total),
        }
    }
}

/// Run `world` to its first outcome with a trace, returning the live search
/// for inspection.
///
/// # Panics
///
/// Panics if the policy is rejected or a callback fails.
pub fn traced_run<'a, W: WorldV1>(
    world: &'a W,
    policy: &SearchPolicy,
) -> (SearchOutcome<W::Node, W::Cost>, Search<&'a W>)
where
    W::Error: std::fmt::Debug,
{
    let policy = SearchPolicy {
        record_trace: true,
        ..policy.clone()
    };
    let mut search = Search::new(world, world.start(), world.initial_cost(), &policy).unwrap();
    let outcome = search.next_outcome().unwrap();
    (outcome, search)
}

/// Generated graphs covering sparse, dense, zero-weight-heavy and tiny
/// shapes, `count` seeds each.
#[must_use]
pub fn graph_corpus(count: u64) -> Vec<WeightedDigraph> {
    let shapes = [
        GeneratorConfig {
            node_count: 40,
            out_degree: 2,
            max_weight: 30,
        },
        GeneratorConfig {
            node_count: 64,
            out_degree: 6,
            max_weight: 10,
        },
        GeneratorConfig {
            node_count: 30,
            out_degree: 3,
            max_weight: 1,
        },
        GeneratorConfig {
            node_count: 5,
            out_degree: 1,
            max_weight: 4,
        },
    ];
    shapes
        .iter()
        .flat_map(|&config| (0..count).map(move |seed| WeightedDigraph::generate(seed, config)))
        .collect()
}

/// Costs of `Checked` events, in step order.
#[must_use]
pub fn checked_costs<N, C: Clone>(trace: &SearchTraceV1<N, C>) -> Vec<C> {
    trace
        .events
        .iter()
        .filter_map(|event| match event {
            TraceEvent::Checked { cost, .. } => Some(cost.clone()),
            _ => None,
        })
        .collect()
}
