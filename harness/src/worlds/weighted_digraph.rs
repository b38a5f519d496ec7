//! `WeightedDigraph`: explicit directed graphs with non-negative integer
//! weights, plus a seeded generator and an eager Dijkstra oracle.
//!
//! Adjacency lists are sorted once at construction by `(weight, target)`, so
//! each node's cursor is a position into a shared slice. Pulling never copies
//! the list.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};
use std::convert::Infallible;
use std::rc::Rc;

use frontier_search::{NeighborCursor, Pull, SearchProblem};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::contract::WorldV1;

/// Outgoing edge: `(target, weight)`.
pub type Edge = (u32, u64);

/// Error building a graph from an explicit edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    /// An edge endpoint, the start or a goal is not below `node_count`.
    NodeOutOfRange { node: u32, node_count: u32 },
}

impl std::fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range (node_count={node_count})")
            }
        }
    }
}

impl std::error::Error for GraphBuildError {}

/// Shape of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub node_count: u32,
    /// Edges drawn per node (duplicates and self-loops are kept).
    pub out_degree: u32,
    /// Weights are drawn uniformly from `0..=max_weight`.
    pub max_weight: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 64,
            out_degree: 4,
            max_weight: 20,
        }
    }
}

/// A directed graph world. Additive `u64` costs.
#[derive(Debug, Clone)]
pub struct WeightedDigraph {
    id: String,
    adjacency: Vec<Rc<[Edge]>>,
    start: u32,
    goals: BTreeSet<u32>,
}

impl WeightedDigraph {
    /// Build from `(from, to, weight)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError::NodeOutOfRange`] if any endpoint, the start
    /// or a goal is not below `node_count`.
    pub fn from_edges(
        id: impl Into<String>,
        node_count: u32,
        edges: &[(u32, u32, u64)],
        start: u32,
        goals: impl IntoIterator<Item = u32>,
    ) -> Result<Self, GraphBuildError> {
        let check = |node: u32| {
            if node < node_count {
                Ok(node)
            } else {
                Err(GraphBuildError::NodeOutOfRange { node, node_count })
            }
        };

        let mut lists: Vec<Vec<Edge>> = vec![Vec::new(); node_count as usize];
        for &(from, to, weight) in edges {
            check(from)?;
            check(to)?;
            lists[from as usize].push((to, weight));
        }
        let goals = goals.into_iter().map(check).collect::<Result<_, _>>()?;

        Ok(Self {
            id: id.into(),
            adjacency: lists.into_iter().map(sort_edges).collect(),
            start: check(start)?,
            goals,
        })
    }

    /// Generate a random graph from `seed`. Start is node 0, the single goal
    /// is the last node. Same seed and config, same graph.
    #[must_use]
    pub fn generate(seed: u64, config: GeneratorConfig) -> Self {
        let node_count = config.node_count.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let adjacency = (0..node_count)
            .map(|_| {
                let edges = (0..config.out_degree)
                    .map(|_| {
                        let to = rng.gen_range(0..node_count);
                        let weight = rng.gen_range(0..=config.max_weight);
                        (to, weight)
                    })
                    .collect();
                sort_edges(edges)
            })
            .collect();

        Self {
            id: format!(
                "digraph_s{seed}_n{node_count}_d{}_w{}",
                config.out_degree, config.max_weight
            ),
            adjacency,
            start: 0,
            goals: BTreeSet::from([node_count - 1]),
        }
    }

    /// Same graph, different goal set.
    #[must_use]
    pub fn with_goals(mut self, goals: impl IntoIterator<Item = u32>) -> Self {
        self.goals = goals.into_iter().collect();
        self
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    /// Sorted outgoing edges of `node`.
    #[must_use]
    pub fn edges(&self, node: u32) -> &[Edge] {
        match self.adjacency.get(node as usize) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// Eager Dijkstra distance from the start to the nearest goal, or `None`
    /// if no goal is reachable.
    #[must_use]
    pub fn dijkstra_distance(&self) -> Option<u64> {
        let mut dist: Vec<Option<u64>> = vec![None; self.adjacency.len()];
        let mut heap = BinaryHeap::new();
        dist[self.start as usize] = Some(0);
        heap.push(Reverse((0u64, self.start)));

        while let Some(Reverse((d, node))) = heap.pop() {
            if dist[node as usize].is_some_and(|best| d > best) {
                continue;
            }
            if self.goals.contains(&node) {
                return Some(d);
            }
            for &(to, weight) in self.edges(node) {
                let candidate = d + weight;
                let slot = &mut dist[to as usize];
                if !matches!(*slot, Some(best) if best <= candidate) {
                    *slot = Some(candidate);
                    heap.push(Reverse((candidate, to)));
                }
            }
        }
        None
    }

    /// Sum of edge weights along `path`, or `None` if some hop is not an edge.
    /// Parallel edges count at their cheapest weight.
    #[must_use]
    pub fn path_cost(&self, path: &[u32]) -> Option<u64> {
        path.windows(2).try_fold(0u64, |acc, hop| {
            let weight = self
                .edges(hop[0])
                .iter()
                .find(|&&(to, _)| to == hop[1])
                .map(|&(_, weight)| weight)?;
            Some(acc + weight)
        })
    }
}

fn sort_edges(mut edges: Vec<Edge>) -> Rc<[Edge]> {
    edges.sort_by_key(|&(to, weight)| (weight, to));
    edges.into()
}

/// Cursor over one node's shared, pre-sorted adjacency slice.
#[derive(Debug, Clone)]
pub struct AdjacencyCursor {
    edges: Rc<[Edge]>,
    position: usize,
}

impl AdjacencyCursor {
    /// Edges not yet pulled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.edges.len() - self.position
    }
}

impl NeighborCursor<u32, u64> for AdjacencyCursor {
    type Error = Infallible;

    fn pull(&mut self) -> Result<Pull<u32, u64>, Infallible> {
        Ok(match self.edges.get(self.position) {
            Some(&(to, weight)) => {
                self.position += 1;
                Pull::Next(to, weight)
            }
            None => Pull::Done,
        })
    }
}

impl SearchProblem for WeightedDigraph {
    type Node = u32;
    type Cost = u64;
    type Error = Infallible;
    type Cursor = AdjacencyCursor;

    fn neighbors(&self, node: &u32) -> Result<AdjacencyCursor, Infallible> {
        let edges = self
            .adjacency
            .get(*node as usize)
            .map_or_else(|| Rc::from(Vec::new()), Rc::clone);
        Ok(AdjacencyCursor { edges, position: 0 })
    }

    fn is_goal(&self, node: &u32) -> Result<bool, Infallible> {
        Ok(self.goals.contains(node))
    }

    fn combine(&self, cost: &u64, weight: &u64) -> Result<u64, Infallible> {
        Ok(cost + weight)
    }
}

impl WorldV1 for WeightedDigraph {
    fn world_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn initial_cost(&self) -> u64 {
        0
    }
}
