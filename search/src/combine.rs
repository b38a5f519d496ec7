//! Cost combination operators.

use std::ops::Add;

/// `combine(path_cost, edge_weight) -> new_path_cost`.
///
/// Implementations should be non-decreasing in both arguments; the driver
/// relies on it for the first-solution-is-minimal guarantee but never checks.
pub trait Combine<C> {
    fn combine(&self, cost: &C, weight: &C) -> C;
}

impl<C, F> Combine<C> for F
where
    F: Fn(&C, &C) -> C,
{
    fn combine(&self, cost: &C, weight: &C) -> C {
        self(cost, weight)
    }
}

/// Ordinary shortest-path accumulation: `cost + weight`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

impl<C> Combine<C> for Additive
where
    C: Clone + Add<Output = C>,
{
    fn combine(&self, cost: &C, weight: &C) -> C {
        cost.clone() + weight.clone()
    }
}

/// Bottleneck (minimax) paths: a path costs as much as its heaviest edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bottleneck;

impl<C> Combine<C> for Bottleneck
where
    C: Clone + Ord,
{
    fn combine(&self, cost: &C, weight: &C) -> C {
        if weight > cost {
            weight.clone()
        } else {
            cost.clone()
        }
    }
}
