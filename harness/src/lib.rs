//! Frontier Harness: worlds, oracles and a report runner for the search core.
//!
//! Worlds supply a [`frontier_search::SearchProblem`] plus a start node and
//! initial cost. The runner drives a traced search over a world and packages
//! the outcome as a [`runner::RunReportV1`] whose canonical bytes and trace
//! digest are stable across runs and processes.
//!
//! The harness does not implement search logic; it delegates to
//! `frontier_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
