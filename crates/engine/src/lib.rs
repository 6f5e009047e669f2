//! The module shell (spec.md §4.7): a process-wide singleton holding no
//! state between calls, a global lock serializing external entries, and
//! the `evaluate`/`reset` pair a host pipeline calls into.
//!
//! Grounded in the original reference's `enginePtr()` + `static std::mutex`
//! + `extern "C" evaluate`/`reset` shell (`JoinOnlyEngine/Source/*JoinOnly.cpp`):
//! one lazily-constructed engine handle behind one lock, recreated from
//! scratch whenever `reset` drops it.


use std::sync::Mutex;

use common::{EngineConfig, EngineResult};
use expr::{walk, ComplexExpression, Expression, HeadEvaluator, Outcome, Span};
use types::Column;

static SINGLETON: Mutex<Option<EngineConfig>> = Mutex::new(None);

/// Evaluate `expr`, recognizing every `Join` head and leaving everything
/// else untouched. Any failure during extraction or execution is caught
/// here and wrapped as `ErrorWhenEvaluatingExpression(original, message)`
/// (spec.md §7) rather than propagated to the caller as a `Result`.
pub fn evaluate(expr: Expression) -> Expression {
    let config = {
        let mut guard = SINGLETON.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get_or_insert_with(EngineConfig::default).clone()
    };

    let original = expr.clone();
    let mut evaluator = JoinHeadEvaluator { config };
    match walk(expr, &mut evaluator) {
        Ok(result) => result,
        Err(err) => {
            log::debug!("evaluate failed, wrapping as ErrorWhenEvaluatingExpression: {err}");
            original.into_evaluation_error(err.to_string())
        }
    }
}

/// Discard the singleton. The next `evaluate` call reconstructs it with
/// default configuration.
pub fn reset() {
    let mut guard = SINGLETON.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
    log::debug!("singleton reset");
}

/// Install non-default configuration (join strategy, hash load factor)
/// for subsequent `evaluate` calls, constructing the singleton if needed.
pub fn configure(config: EngineConfig) {
    let mut guard = SINGLETON.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(config);
}

struct JoinHeadEvaluator {
    config: EngineConfig,
}

impl HeadEvaluator for JoinHeadEvaluator {
    fn evaluate_head(&mut self, expr: &ComplexExpression) -> Outcome {
        if expr.head.name() != "Join" {
            return Ok(None);
        }
        // `joinplan::extract` consumes its input; the walker only lends us
        // a reference, so recognizing the head costs one clone.
        let plan = joinplan::extract(Expression::Complex(expr.clone()))?;
        let table = executor::execute(&plan, &self.config)?;
        Ok(Some(table_to_expression(table)))
    }
}

fn table_to_expression(table: types::Table) -> Expression {
    let columns = table
        .columns
        .into_iter()
        .map(|(name, column)| {
            let span = match column {
                Column::Ints(v) => Span::Ints(v),
                Column::Floats(v) => Span::Floats(v),
            };
            let list = Expression::Complex(ComplexExpression::with_spans("List", Vec::new(), vec![span]));
            Expression::complex(name, vec![list])
        })
        .collect();
    Expression::complex("Table", columns)
}

/// `EvaluateInEngines(List(engine_id, …), expr)` (spec.md §6): thread
/// `expr` through each named engine left to right, each seeing the
/// previous one's output. This core recognizes only the `"Join"` engine
/// identity; any other id passes its input through unchanged, standing in
/// for an external engine a real pipeline would substitute.
pub fn evaluate_in_engines(engine_ids: &[&str], expr: Expression) -> Expression {
    engine_ids.iter().fold(expr, |acc, &engine_id| match engine_id {
        "Join" => evaluate(acc),
        _ => acc,
    })
}

/// `evaluate`'s fallible core, for callers that want the `EngineResult`
/// directly instead of the expression-level error wrapping (e.g. a host
/// pipeline that wants to branch on the specific `EngineError` variant).
pub fn try_evaluate(expr: Expression, config: &EngineConfig) -> EngineResult<Expression> {
    let mut evaluator = JoinHeadEvaluator { config: config.clone() };
    walk(expr, &mut evaluator)
}
