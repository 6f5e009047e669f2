//! Symbolic expression tree and the generic post-order walker that
//! isolates join-only modules from the rest of the query language.
//!
//! An `Expression` is a sum type: a `Complex` node (`head(args…, spans…)`)
//! or one of the atomic leaves. The walker's job (spec.md §4.1) is to let
//! a module recognize exactly the heads it implements — here, `Join` —
//! and recurse through everything else unchanged, so `Select`, `Project`,
//! `Top`, and arithmetic reach whichever module downstream evaluates them.


use std::fmt;

/// A bare name used as both a symbol leaf and a complex expression's head.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// A typed, contiguous value buffer attached to a complex expression —
/// the "span" half of `head(args…, spans…)`. Table literals use this to
/// carry a column's values without boxing each one into an `Expression`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Span {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

/// The expression tree. `Complex` nodes carry a head, child expressions
/// ("dynamic arguments"), and optional typed spans; everything else is
/// an atomic leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    Complex(ComplexExpression),
    Symbol(Symbol),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComplexExpression {
    pub head: Symbol,
    pub arguments: Vec<Expression>,
    pub spans: Vec<Span>,
}

impl ComplexExpression {
    pub fn new(head: impl Into<Symbol>, arguments: Vec<Expression>) -> Self {
        Self {
            head: head.into(),
            arguments,
            spans: Vec::new(),
        }
    }

    pub fn with_spans(head: impl Into<Symbol>, arguments: Vec<Expression>, spans: Vec<Span>) -> Self {
        Self {
            head: head.into(),
            arguments,
            spans,
        }
    }
}

impl Expression {
    pub fn complex(head: impl Into<Symbol>, arguments: Vec<Expression>) -> Self {
        Expression::Complex(ComplexExpression::new(head, arguments))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Symbol(Symbol::new(name))
    }

    /// The head's name, if this is a complex expression.
    pub fn head_name(&self) -> Option<&str> {
        match self {
            Expression::Complex(c) => Some(c.head.name()),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexExpression> {
        match self {
            Expression::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Wrap `self` as `ErrorWhenEvaluatingExpression(self, message)`,
    /// per spec.md §4.1 and §7's propagation contract.
    pub fn into_evaluation_error(self, message: impl Into<String>) -> Expression {
        Expression::complex(
            "ErrorWhenEvaluatingExpression",
            vec![self, Expression::String(message.into())],
        )
    }
}

/// Recognizes and evaluates the complex-expression heads a module owns.
///
/// Implementations return `Ok(Some(result))` when they recognize `head`,
/// `Ok(None)` to let the walker recurse into the expression's own
/// arguments instead, and `Err` to abort the whole `evaluate` call (the
/// caller wraps it into `ErrorWhenEvaluatingExpression`).
pub trait HeadEvaluator {
    fn evaluate_head(&mut self, expr: &ComplexExpression) -> crate::Outcome;
}

/// The result of attempting to evaluate one complex expression's head.
pub type Outcome = Result<Option<Expression>, common::EngineError>;

/// Post-order walk: try `evaluator` on `expr`. If it recognizes the head,
/// return its result directly. Otherwise recurse into every dynamic
/// argument (preserving position and any spans), then rebuild the
/// expression with the same head. Atoms pass through untouched.
///
/// This is the mechanism spec.md §4.1 describes as "pass through
/// everything except `Join`" — a join-only module supplies a
/// `HeadEvaluator` that only recognizes `"Join"`.
pub fn walk(expr: Expression, evaluator: &mut dyn HeadEvaluator) -> Result<Expression, common::EngineError> {
    match expr {
        Expression::Complex(complex) => {
            if let Some(result) = evaluator.evaluate_head(&complex)? {
                return Ok(result);
            }
            let ComplexExpression { head, arguments, spans } = complex;
            let mut rebuilt = Vec::with_capacity(arguments.len());
            for arg in arguments {
                rebuilt.push(walk(arg, evaluator)?);
            }
            Ok(Expression::Complex(ComplexExpression {
                head,
                arguments: rebuilt,
                spans,
            }))
        }
        atom => Ok(atom),
    }
}
