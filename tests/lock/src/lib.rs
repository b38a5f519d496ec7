//! Shared helpers for the lock test suites.

pub mod search_helpers;
