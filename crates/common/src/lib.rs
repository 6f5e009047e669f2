pub mod pretty;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical error type shared across the engine's subsystems.
///
/// Corresponds to spec.md §7's four error kinds: an unresolved column
/// symbol during plan extraction, an unsupported value type while reading
/// a table literal, a schema/row-count mismatch inside the result
/// builder, and a catch-all for anything lower-level.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown column symbol: {0}")]
    UnknownColumnSymbol(String),
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias that carries an `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Which multi-way join algorithm the executor runs.
///
/// All three produce the same observable output (spec.md §8, "Algorithm
/// agreement"); this only trades off expected running time and ordering
/// guarantees. The original C++ source shipped one compiled engine per
/// strategy — here it is a runtime choice on one engine instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinStrategy {
    NestedLoop,
    SortMerge,
    Hash,
}

impl Default for JoinStrategy {
    fn default() -> Self {
        JoinStrategy::Hash
    }
}

/// Runtime configuration for the join engine.
///
/// # Example
/// ```
/// use common::{EngineConfig, JoinStrategy};
///
/// let config = EngineConfig::builder()
///     .strategy(JoinStrategy::SortMerge)
///     .hash_load_factor(0.5)
///     .build();
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct EngineConfig {
    /// Which join algorithm `crates/executor` runs.
    #[builder(default = JoinStrategy::default())]
    pub strategy: JoinStrategy,
    /// Target load factor for the hash-join build tables; capacity per
    /// table is `ceil(row_count / hash_load_factor)`. spec.md §9 leaves
    /// the sizing policy as an open question and codifies `2 * |T|`,
    /// i.e. a load factor of `0.5`.
    #[builder(default = 0.5)]
    pub hash_load_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: JoinStrategy::default(),
            hash_load_factor: 0.5,
        }
    }
}

/// Initialize `env_logger` exactly once, ignoring the "already initialized"
/// error from repeated calls across test binaries.
///
/// Tests that want engine diagnostics on stderr call this before
/// exercising the engine, then run with `RUST_LOG=debug`.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
