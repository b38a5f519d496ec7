//! Shared helpers for frontier benchmark suites.

#![forbid(unsafe_code)]

use frontier_harness::contract::WorldV1;
use frontier_harness::worlds::grid::{GridWorld, Heuristic};
use frontier_harness::worlds::weighted_digraph::{GeneratorConfig, WeightedDigraph};
use frontier_search::{Search, SearchOutcome, SearchPolicy};

/// A named world plus the policy it is benchmarked under.
pub struct Regime {
    pub name: &'static str,
    pub world: RegimeWorld,
    pub policy: SearchPolicy,
}

/// The worlds benchmarks run over.
pub enum RegimeWorld {
    Grid(GridWorld),
    Digraph(WeightedDigraph),
}

/// Counters from one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub steps: u64,
    pub pulls: u64,
    pub registry_size: usize,
    pub frontier_high_water: u64,
    pub solved: bool,
}

/// Walled grid with the A* heuristic: goal-directed, few wasted pulls.
#[must_use]
pub fn regime_grid_astar() -> Regime {
    Regime {
        name: "grid_astar",
        world: RegimeWorld::Grid(GridWorld::walled(60).with_heuristic(Heuristic::Chebyshev)),
        policy: SearchPolicy::default(),
    }
}

/// Same grid without the heuristic: uniform-cost flood.
#[must_use]
pub fn regime_grid_uniform() -> Regime {
    Regime {
        name: "grid_uniform",
        world: RegimeWorld::Grid(GridWorld::walled(60)),
        policy: SearchPolicy::default(),
    }
}

/// Cut grid: the whole reachable half is searched before exhaustion.
#[must_use]
pub fn regime_exhaustive_dead_end() -> Regime {
    Regime {
        name: "exhaustive_dead_end",
        world: RegimeWorld::Grid(GridWorld::cut(60)),
        policy: SearchPolicy::default(),
    }
}

/// Dense random digraph: long sorted adjacency lists, mostly never pulled.
#[must_use]
pub fn regime_dense_digraph() -> Regime {
    Regime {
        name: "dense_digraph",
        world: RegimeWorld::Digraph(WeightedDigraph::generate(
            11,
            GeneratorConfig {
                node_count: 2_000,
                out_degree: 32,
                max_weight: 1_000,
            },
        )),
        policy: SearchPolicy::default(),
    }
}

/// Grid flood cut short by a step budget.
#[must_use]
pub fn regime_budget_limited() -> Regime {
    Regime {
        name: "budget_limited",
        world: RegimeWorld::Grid(GridWorld::walled(60)),
        policy: SearchPolicy {
            max_steps: Some(2_000),
            ..SearchPolicy::default()
        },
    }
}

/// Every regime, in report order.
#[must_use]
pub fn all_regimes() -> Vec<Regime> {
    vec![
        regime_grid_astar(),
        regime_grid_uniform(),
        regime_exhaustive_dead_end(),
        regime_dense_digraph(),
        regime_budget_limited(),
    ]
}

/// Run the bare engine (no trace, no report) to the first outcome.
///
/// # Panics
///
/// Panics if the policy is rejected. Benchmark setup failures are fatal.
#[must_use]
pub fn run_engine(regime: &Regime) -> EngineStats {
    match &regime.world {
        RegimeWorld::Grid(world) => run_world_engine(world, &regime.policy),
        RegimeWorld::Digraph(world) => run_world_engine(world, &regime.policy),
    }
}

fn run_world_engine<W>(world: &W, policy: &SearchPolicy) -> EngineStats
where
    W: WorldV1,
    W::Error: std::fmt::Debug,
{
    let mut search =
        Search::new(world, world.start(), world.initial_cost(), policy).expect("valid policy");
    let outcome = search.next_outcome().expect("infallible world");
    EngineStats {
        steps: search.steps(),
        pulls: search.pulls(),
        registry_size: search.frontier().registry_len(),
        frontier_high_water: search.frontier().high_water(),
        solved: matches!(outcome, SearchOutcome::Success(_)),
    }
}

/// Run the harness end to end: traced search, canonical JSON and digests.
///
/// # Panics
///
/// Panics if the run fails.
pub fn run_report(regime: &Regime) -> frontier_harness::runner::RunReportV1 {
    let result = match &regime.world {
        RegimeWorld::Grid(world) => frontier_harness::runner::run_world(world, &regime.policy)
            .map_err(|e| e.to_string()),
        RegimeWorld::Digraph(world) => frontier_harness::runner::run_world(world, &regime.policy)
            .map_err(|e| e.to_string()),
    };
    result.expect("run_world")
}
