//! Same inputs, same path, cost, trace bytes and digests.

use frontier_harness::runner::run_world;
use frontier_harness::worlds::grid::{GridWorld, Heuristic};
use frontier_harness::worlds::weighted_digraph::{GeneratorConfig, WeightedDigraph};
use frontier_search::{DedupPolicy, SearchPolicy};
use lock_tests::search_helpers::traced_run;

#[test]
fn trace_bytes_identical_inproc_n10() {
    let world = GridWorld::walled(20).with_heuristic(Heuristic::Chebyshev);
    let first = run_world(&world, &SearchPolicy::default()).unwrap();
    for _ in 1..10 {
        let again = run_world(&world, &SearchPolicy::default()).unwrap();
        assert_eq!(again.trace_bytes, first.trace_bytes);
        assert_eq!(again.trace_digest, first.trace_digest);
        assert_eq!(again.digest().unwrap(), first.digest().unwrap());
    }
}

#[test]
fn regenerated_graph_gives_identical_trace() {
    let config = GeneratorConfig::default();
    for seed in 0..10 {
        let a = run_world(&WeightedDigraph::generate(seed, config), &SearchPolicy::default())
            .unwrap();
        let b = run_world(&WeightedDigraph::generate(seed, config), &SearchPolicy::default())
            .unwrap();
        assert_eq!(a.trace_digest, b.trace_digest, "seed {seed}");
        assert_eq!(a.outcome, b.outcome, "seed {seed}");
    }
}

#[test]
fn policy_is_bound_into_digests() {
    let world = GridWorld::walled(14);
    let default = run_world(&world, &SearchPolicy::default()).unwrap();
    let budgeted = run_world(
        &world,
        &SearchPolicy {
            max_steps: Some(1_000_000),
            ..SearchPolicy::default()
        },
    )
    .unwrap();
    assert_eq!(default.outcome, budgeted.outcome);
    assert_ne!(default.trace_digest, budgeted.trace_digest);
    assert_ne!(default.digest().unwrap(), budgeted.digest().unwrap());
}

#[test]
fn dedup_policy_is_recorded() {
    let world = GridWorld::open(6);
    let report = run_world(
        &world,
        &SearchPolicy {
            dedup: DedupPolicy::Off,
            max_steps: Some(50),
            record_trace: false,
        },
    )
    .unwrap();
    assert_eq!(report.policy["dedup"], "off");
    assert_eq!(report.policy["record_trace"], true);
}

#[test]
fn trace_event_order_is_stable() {
    let world = WeightedDigraph::generate(42, GeneratorConfig::default());
    let (_, a) = traced_run(&world, &SearchPolicy::default());
    let (_, b) = traced_run(&world, &SearchPolicy::default());
    let (ta, tb) = (a.trace().unwrap(), b.trace().unwrap());
    assert_eq!(ta.events, tb.events);
    assert_eq!(ta.checked_order(), tb.checked_order());
    assert_eq!(ta.pulled_edges(), tb.pulled_edges());
}

#[test]
fn trace_bytes_are_canonical_json() {
    let world = GridWorld::walled(12).with_heuristic(Heuristic::Chebyshev);
    let report = run_world(&world, &SearchPolicy::default()).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&report.trace_bytes).unwrap();

    // Reserializing the parsed value reproduces the bytes exactly.
    assert_eq!(serde_json::to_vec(&parsed).unwrap(), report.trace_bytes);

    let metadata = &parsed["metadata"];
    assert_eq!(metadata["total_steps"], report.total_steps);
    assert_eq!(metadata["total_pulls"], report.total_pulls);
    assert_eq!(metadata["registry_size"], report.registry_size);

    let first = &parsed["events"][0];
    assert_eq!(first["type"], "discovered");
    assert!(first["parent"].is_null());
    assert_eq!(parsed["entries"][0]["node"], serde_json::json!([0, 0]));
}
