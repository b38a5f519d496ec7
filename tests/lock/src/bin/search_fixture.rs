//! Binary that runs the harness worlds and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `search_fixture [report_dir]`
//!
//! Output: `key=value` lines on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`). With `report_dir`, the walled-grid report is
//! also written there.

use std::path::Path;
use std::process::ExitCode;

use frontier_harness::report_dir::write_report_dir;
use frontier_harness::runner::{run_world, RunOutcomeV1};
use frontier_harness::worlds::grid::{GridWorld, Heuristic};
use frontier_harness::worlds::weighted_digraph::{GeneratorConfig, WeightedDigraph};
use frontier_search::SearchPolicy;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(std::env::args().nth(1).as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(%message, "search fixture failed");
            eprintln!("search_fixture: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(report_dir: Option<&str>) -> Result<(), String> {
    let policy = SearchPolicy::default();

    let grid = GridWorld::walled(20).with_heuristic(Heuristic::Chebyshev);
    let grid_report = run_world(&grid, &policy).map_err(|e| e.to_string())?;
    print_report("grid", &grid_report)?;

    let cut = GridWorld::cut(10);
    let cut_report = run_world(&cut, &policy).map_err(|e| e.to_string())?;
    print_report("cut", &cut_report)?;

    let digraph = WeightedDigraph::generate(7, GeneratorConfig::default());
    let digraph_report = run_world(&digraph, &policy).map_err(|e| e.to_string())?;
    print_report("digraph", &digraph_report)?;

    if let Some(dir) = report_dir {
        write_report_dir(&grid_report, Path::new(dir)).map_err(|e| e.to_string())?;
        println!("report_dir_written=true");
    }
    Ok(())
}

fn print_report(label: &str, report: &frontier_harness::runner::RunReportV1) -> Result<(), String> {
    let digest = report.digest().map_err(|e| e.to_string())?;
    println!("{label}.world_id={}", report.world_id);
    match &report.outcome {
        RunOutcomeV1::Solved { cost, path, steps } => {
            println!("{label}.outcome=solved");
            println!("{label}.cost={cost}");
            println!("{label}.path_len={}", path.len());
            println!("{label}.solution_steps={steps}");
        }
        RunOutcomeV1::Failed(failure) => println!("{label}.outcome={failure:?}"),
    }
    println!("{label}.total_steps={}", report.total_steps);
    println!("{label}.total_pulls={}", report.total_pulls);
    println!("{label}.trace_digest={}", report.trace_digest);
    println!("{label}.report_digest={digest}");
    Ok(())
}
