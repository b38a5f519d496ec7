//! World implementations for the harness runner.

pub mod grid;
pub mod weighted_digraph;
