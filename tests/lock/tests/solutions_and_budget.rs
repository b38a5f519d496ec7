//! Multiple solutions, step budgets and policy validation.

use std::collections::HashSet;

use frontier_harness::contract::WorldV1;
use frontier_harness::worlds::grid::{GridWorld, Heuristic};
use frontier_harness::worlds::weighted_digraph::{GeneratorConfig, WeightedDigraph};
use frontier_search::{
    Failure, Search, SearchError, SearchOutcome, SearchPolicy, TerminationReason,
};

fn many_goals(seed: u64) -> WeightedDigraph {
    WeightedDigraph::generate(
        seed,
        GeneratorConfig {
            node_count: 50,
            out_degree: 4,
            max_weight: 12,
        },
    )
    .with_goals((1..50).step_by(3))
}

#[test]
fn solutions_come_out_in_cost_order() {
    for seed in 0..20 {
        let world = many_goals(seed);
        let search =
            Search::new(&world, world.start(), world.initial_cost(), &SearchPolicy::default())
                .unwrap();
        let solutions: Vec<_> = search.map(Result::unwrap).collect();

        let costs: Vec<u64> = solutions.iter().map(|s| s.cost).collect();
        assert!(
            costs.windows(2).all(|w| w[0] <= w[1]),
            "seed {seed}: {costs:?}"
        );

        let goals: HashSet<u32> = solutions.iter().filter_map(|s| s.path.last().copied()).collect();
        assert_eq!(goals.len(), solutions.len(), "each goal is yielded once");

        if let Some(first) = solutions.first() {
            assert_eq!(Some(first.cost), world.dijkstra_distance());
        }
    }
}

#[test]
fn solution_steps_increase() {
    let world = many_goals(3);
    let search =
        Search::new(&world, world.start(), world.initial_cost(), &SearchPolicy::default()).unwrap();
    let steps: Vec<u64> = search.map(|s| s.unwrap().steps).collect();
    assert!(steps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn budget_stops_before_goal() {
    let world = GridWorld::walled(20).with_heuristic(Heuristic::Chebyshev);
    let policy = SearchPolicy {
        max_steps: Some(10),
        ..SearchPolicy::default()
    };
    let mut search = Search::new(&world, world.start(), world.initial_cost(), &policy).unwrap();
    let outcome = search.next_outcome().unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::Failure(Failure::StepBudgetExceeded { steps: 10 })
    );
    assert_eq!(search.steps(), 10);
    assert_eq!(search.termination(), TerminationReason::StepBudgetExceeded);
}

#[test]
fn generous_budget_changes_nothing() {
    let world = GridWorld::walled(20).with_heuristic(Heuristic::Chebyshev);
    let mut unbounded =
        Search::new(&world, world.start(), world.initial_cost(), &SearchPolicy::default())
            .unwrap();
    let expected = unbounded.next_outcome().unwrap();

    let policy = SearchPolicy {
        max_steps: Some(unbounded.steps()),
        ..SearchPolicy::default()
    };
    let mut bounded = Search::new(&world, world.start(), world.initial_cost(), &policy).unwrap();
    assert_eq!(bounded.next_outcome().unwrap(), expected);
}

#[test]
fn zero_budget_is_rejected_up_front() {
    let world = GridWorld::open(4);
    let policy = SearchPolicy {
        max_steps: Some(0),
        ..SearchPolicy::default()
    };
    let result = Search::new(&world, world.start(), world.initial_cost(), &policy);
    assert!(matches!(result, Err(SearchError::InvalidPolicy { .. })));
}
