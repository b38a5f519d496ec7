//! Cursor adapters over ordinary iterators.

use std::convert::Infallible;

use crate::contract::{NeighborCursor, Pull};

/// Cursor over an infallible iterator of `(neighbor, weight)` pairs.
///
/// The iterator is fused by the adapter: once it returns `None` every later
/// pull answers `Pull::Done` without touching it again.
#[derive(Debug, Clone)]
pub struct IterCursor<I> {
    inner: Option<I>,
}

impl<I> IterCursor<I> {
    pub fn new(inner: I) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<N, C, I> NeighborCursor<N, C> for IterCursor<I>
where
    I: Iterator<Item = (N, C)>,
{
    type Error = Infallible;

    fn pull(&mut self) -> Result<Pull<N, C>, Infallible> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(Pull::Done);
        };
        match inner.next() {
            Some((node, weight)) => Ok(Pull::Next(node, weight)),
            None => {
                self.inner = None;
                Ok(Pull::Done)
            }
        }
    }
}

/// Cursor over an iterator whose items may fail.
///
/// An `Err` item is returned from `pull` as-is; the cursor is not fused on
/// error because the driver stops at the first fault anyway.
#[derive(Debug, Clone)]
pub struct TryIterCursor<I> {
    inner: Option<I>,
}

impl<I> TryIterCursor<I> {
    pub fn new(inner: I) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<N, C, E, I> NeighborCursor<N, C> for TryIterCursor<I>
where
    I: Iterator<Item = Result<(N, C), E>>,
{
    type Error = E;

    fn pull(&mut self) -> Result<Pull<N, C>, E> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(Pull::Done);
        };
        match inner.next() {
            Some(item) => {
                let (node, weight) = item?;
                Ok(Pull::Next(node, weight))
            }
            None => {
                self.inner = None;
                Ok(Pull::Done)
            }
        }
    }
}
