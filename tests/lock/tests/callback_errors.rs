//! Callback faults propagate unmodified and stop the search for good.

use frontier_harness::worlds::weighted_digraph::WeightedDigraph;
use frontier_search::{Failure, Search, SearchError, SearchPolicy, TerminationReason};
use lock_tests::search_helpers::{FaultPoint, FaultyDigraph, InjectedFault};

fn chain() -> WeightedDigraph {
    WeightedDigraph::from_edges(
        "chain",
        4,
        &[(0, 1, 1), (0, 2, 3), (1, 2, 1), (2, 3, 1)],
        0,
        [3],
    )
    .unwrap()
}

fn fault_of(point: FaultPoint) -> (InjectedFault, Search<FaultyDigraph>) {
    let problem = FaultyDigraph {
        graph: chain(),
        fault: point,
    };
    let mut search = Search::new(problem, 0, 0, &SearchPolicy::traced()).unwrap();
    let err = search.next_outcome().unwrap_err();
    let fault = err.into_callback().expect("callback fault");
    (fault, search)
}

#[test]
fn neighbors_fault_surfaces() {
    let (fault, _) = fault_of(FaultPoint::Neighbors(1));
    assert_eq!(fault.stage, "neighbors");
    assert_eq!(fault.detail, "node 1");
}

#[test]
fn pull_fault_surfaces() {
    let (fault, search) = fault_of(FaultPoint::SecondPull(0));
    assert_eq!(fault.stage, "pull");
    assert!(search.pulls() >= 2);
}

#[test]
fn is_goal_fault_surfaces() {
    let (fault, _) = fault_of(FaultPoint::IsGoal(2));
    assert_eq!(fault.stage, "is_goal");
}

#[test]
fn combine_fault_surfaces() {
    let (fault, _) = fault_of(FaultPoint::CombineAbove(2));
    assert_eq!(fault.stage, "combine");
    assert_eq!(fault.detail, "3 > 2");
}

#[test]
fn search_is_aborted_after_fault() {
    let (_, mut search) = fault_of(FaultPoint::IsGoal(0));
    assert_eq!(search.termination(), TerminationReason::CallbackFailed);
    let steps = search.steps();

    let again = search.next_outcome().unwrap();
    assert_eq!(again.failure(), Some(Failure::Aborted));
    assert_eq!(search.steps(), steps, "no further steps after a fault");
    assert!(search.next().is_none(), "iterator ends after a fault");
}

#[test]
fn error_display_wraps_fault() {
    let problem = FaultyDigraph {
        graph: chain(),
        fault: FaultPoint::IsGoal(0),
    };
    let mut search = Search::new(problem, 0, 0, &SearchPolicy::default()).unwrap();
    let err = search.next_outcome().unwrap_err();
    assert_eq!(
        err.to_string(),
        "search callback failed: injected fault in is_goal: node 0"
    );
    assert!(std::error::Error::source(&err).is_some());
    assert!(matches!(err, SearchError::Callback(_)));
}

#[test]
fn fault_free_run_still_solves() {
    let problem = FaultyDigraph {
        graph: chain(),
        fault: FaultPoint::Neighbors(99),
    };
    let mut search = Search::new(problem, 0, 0, &SearchPolicy::default()).unwrap();
    let solution = search.next_outcome().unwrap().into_solution().unwrap();
    assert_eq!(solution.path, vec![0, 1, 2, 3]);
    assert_eq!(solution.cost, 3);
}
