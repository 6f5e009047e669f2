//! Test support utilities for the join engine workspace.
//!
//! Provides `Table`/`Expression` builders and property-based generators so
//! `joinplan` and `executor` tests don't hand-roll expression literals.

pub mod fixtures;
pub mod proptest_generators;

/// Convenient re-exports for common testing patterns.
pub mod prelude {
    pub use crate::fixtures::*;
}
