//! The multi-way equi-join executor: three interchangeable algorithms
//! (nested-loop, sort-merge, hash) behind one entry point, plus the
//! column-store result builder they all share.
//!
//! All three algorithms consume a `joinplan::JoinPlan` and produce the
//! same output multiset on duplicate-free keys; they trade off expected
//! running time and row ordering, never correctness.

pub mod hash_join;
pub mod nested_loop;
pub mod result_builder;
pub mod sort_merge;

#[cfg(test)]
mod tests;

use common::{EngineConfig, EngineResult, JoinStrategy};
use joinplan::JoinPlan;
use types::Table;

/// Run `plan`'s hops using `config.strategy`, returning one merged
/// `Table` in the plan's schema order.
pub fn execute(plan: &JoinPlan, config: &EngineConfig) -> EngineResult<Table> {
    log::debug!(
        "executing {} tables / {} hops with {:?}",
        plan.tables.len(),
        plan.hops.len(),
        config.strategy
    );
    match config.strategy {
        JoinStrategy::NestedLoop => nested_loop::execute(plan),
        JoinStrategy::SortMerge => sort_merge::execute(plan),
        JoinStrategy::Hash => hash_join::execute(plan, config.hash_load_factor),
    }
}
