//! Column-store value model: the tagged-union `Value`, variant-pure
//! `Column`, and named-column `Table`.
//!
//! A column holds values of exactly one variant; a table is an ordered
//! sequence of equal-length named columns. Cross-variant comparison is
//! undefined by design (see `Value::partial_cmp_same_variant`) — callers
//! that need to compare values must first establish they share a variant.

use std::cmp::Ordering;


/// A single cell value: a 64-bit signed integer or a 64-bit float.
///
/// Equality and ordering are defined only within a variant; comparing
/// across variants is not a supported operation for this engine (spec
/// treats it as undefined behavior the core need not handle).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Ordering between two same-variant values, or `None` across variants.
    pub fn partial_cmp_same_variant(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Equality between two same-variant values, or `None` across variants.
    pub fn eq_same_variant(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a == b),
            (Value::Float(a), Value::Float(b)) => Some(a == b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(_) => None,
        }
    }
}

/// A variant-pure column: every element is drawn from the same `Value`
/// variant, enforced by representation rather than by runtime checks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Column {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Ints(v) => v.len(),
            Column::Floats(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the value at `index`, boxed into the tagged union.
    ///
    /// Panics if `index` is out of bounds — callers index with a cursor
    /// they derived from this same column's length.
    pub fn get(&self, index: usize) -> Value {
        match self {
            Column::Ints(v) => Value::Int(v[index]),
            Column::Floats(v) => Value::Float(v[index]),
        }
    }

    /// Start an empty column matching `value`'s variant.
    pub fn empty_like(value: &Value) -> Column {
        match value {
            Value::Int(_) => Column::Ints(Vec::new()),
            Value::Float(_) => Column::Floats(Vec::new()),
        }
    }

    /// Push `value` onto this column.
    ///
    /// Returns `false` (and leaves the column untouched) if `value`'s
    /// variant does not match the column's — the caller surfaces this as
    /// a structural error rather than silently coercing.
    pub fn push(&mut self, value: Value) -> bool {
        match (self, value) {
            (Column::Ints(v), Value::Int(x)) => {
                v.push(x);
                true
            }
            (Column::Floats(v), Value::Float(x)) => {
                v.push(x);
                true
            }
            _ => false,
        }
    }

    /// Build a new column by reordering `self` according to `order`
    /// (a row-preserving permutation/selection used by the sort-merge path).
    pub fn select(&self, order: &[usize]) -> Column {
        match self {
            Column::Ints(v) => Column::Ints(order.iter().map(|&i| v[i]).collect()),
            Column::Floats(v) => Column::Floats(order.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Ordered, named column collection with uniform row count.
///
/// Construction does not re-validate equal column length; builders
/// (`crates/joinplan`, `crates/executor`) are responsible for the
/// invariant described in spec.md §3.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new(columns: Vec<(String, Column)>) -> Self {
        Self { columns }
    }

    /// Row count: the length of the first column, or 0 for a columnless table.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    /// Column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The schema: column names in order.
    pub fn schema(&self) -> Schema {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index].1
    }
}

/// Ordered column-name sequence; defines output column order for a join.
pub type Schema = Vec<String>;
