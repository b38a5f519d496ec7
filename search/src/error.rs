//! Typed search errors.
//!
//! Running out of frontier is not an error: it is reported as
//! [`crate::Failure::Exhausted`] inside a normal outcome. `SearchError` covers
//! pre-flight rejection and faults raised by caller callbacks.

/// Failure that aborts a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError<E> {
    /// The policy was rejected before any step was taken.
    InvalidPolicy { detail: String },
    /// A callback (`neighbors`, cursor pull, `is_goal` or `combine`) failed.
    /// The fault is carried unmodified.
    Callback(E),
}

impl<E> SearchError<E> {
    /// The callback fault, if that is what stopped the search.
    pub fn into_callback(self) -> Option<E> {
        match self {
            Self::Callback(e) => Some(e),
            Self::InvalidPolicy { .. } => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Callback(e) => write!(f, "search callback failed: {e}"),
        }
    }
}

impl<E> std::error::Error for SearchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Callback(e) => Some(e),
            Self::InvalidPolicy { .. } => None,
        }
    }
}
