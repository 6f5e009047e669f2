//! Join plan extraction (spec.md §4.2): linearizes a possibly nested,
//! left-deep `Join` expression into an ordered list of base tables, the
//! per-hop equi-predicate column indices, and the merged output schema.

#[cfg(test)]
mod tests;

use common::{EngineError, EngineResult};
use expr::{ComplexExpression, Expression, Span, Symbol};
use types::{Column, Schema, Table, Value};

/// The linearized shape of a `Join` expression: an ordered list of base
/// tables, one less hop than there are tables, and the concatenated
/// schema (spec.md §3 "JoinPlan").
#[derive(Debug, Clone, PartialEq)]
pub struct JoinPlan {
    pub tables: Vec<Table>,
    /// Hop `k` is `(l_k, r_k)`: `l_k` is a column index local to
    /// `tables[k]`, `r_k` a column index local to `tables[k + 1]`.
    pub hops: Vec<(usize, usize)>,
    pub schema: Schema,
}

/// Extract a `JoinPlan` from a `Table` or `Join` expression.
///
/// Consumes `expr` (spec.md §5 "resource ownership": input expressions
/// are moved into the executor, never aliased).
pub fn extract(expr: Expression) -> EngineResult<JoinPlan> {
    match expr {
        Expression::Complex(c) => extract_complex(c),
        other => Err(EngineError::Internal(format!(
            "expected a Table or Join expression, got {other:?}"
        ))),
    }
}

fn extract_complex(c: ComplexExpression) -> EngineResult<JoinPlan> {
    match c.head.name() {
        "Table" => extract_table(c),
        "Join" => extract_join(c),
        other => Err(EngineError::Internal(format!(
            "expected Table or Join head, got '{other}'"
        ))),
    }
}

fn extract_table(c: ComplexExpression) -> EngineResult<JoinPlan> {
    let mut columns = Vec::with_capacity(c.arguments.len());
    for col_expr in c.arguments {
        let Expression::Complex(col) = col_expr else {
            return Err(EngineError::Internal(
                "expected a Name(List(...)) column expression inside Table".into(),
            ));
        };
        let name = col.head.name().to_string();
        if col.arguments.len() != 1 {
            return Err(EngineError::Internal(format!(
                "column '{name}' must wrap exactly one List expression"
            )));
        }
        let list_expr = col.arguments.into_iter().next().unwrap();
        let Expression::Complex(list) = list_expr else {
            return Err(EngineError::Internal(format!(
                "column '{name}' value must be a List expression"
            )));
        };
        let column = column_from_list(list)?;
        columns.push((name, column));
    }

    let table = Table::new(columns);
    let schema = table.schema();
    Ok(JoinPlan {
        tables: vec![table],
        hops: Vec::new(),
        schema,
    })
}

/// A `List` may be a bare argument sequence of `Int`/`Float` literals or
/// a typed span of `i64`/`f64` (spec.md §6, "Table literal").
fn column_from_list(list: ComplexExpression) -> EngineResult<Column> {
    if list.head.name() != "List" {
        return Err(EngineError::Internal(format!(
            "expected a List expression, got head '{}'",
            list.head.name()
        )));
    }

    if let Some(span) = list.spans.into_iter().next() {
        return Ok(match span {
            Span::Ints(values) => Column::Ints(values),
            Span::Floats(values) => Column::Floats(values),
        });
    }

    let mut column: Option<Column> = None;
    for arg in list.arguments {
        let value = match arg {
            Expression::Int(i) => Value::Int(i),
            Expression::Float(f) => Value::Float(f),
            other => {
                return Err(EngineError::UnsupportedValueType(format!(
                    "column literal must be Int or Float, got {other:?}"
                )));
            }
        };
        match &mut column {
            Some(col) => {
                col.push(value);
            }
            None => {
                let mut col = Column::empty_like(&value);
                col.push(value);
                column = Some(col);
            }
        }
    }

    // An empty List() with no spans has no way to infer a variant; an
    // empty integer column is as good a default as any since nothing
    // ever reads a zero-length column's contents.
    Ok(column.unwrap_or(Column::Ints(Vec::new())))
}

fn extract_join(c: ComplexExpression) -> EngineResult<JoinPlan> {
    if c.arguments.len() != 3 {
        return Err(EngineError::Internal(format!(
            "Join expects 3 arguments (left, right, Where(Equal(...))), got {}",
            c.arguments.len()
        )));
    }
    let mut args = c.arguments.into_iter();
    let left_expr = args.next().unwrap();
    let right_expr = args.next().unwrap();
    let where_expr = args.next().unwrap();

    let left = extract(left_expr)?;
    let right = extract(right_expr)?;

    let mut tables = left.tables;
    tables.extend(right.tables);

    let schemas: Vec<Schema> = tables.iter().map(Table::schema).collect();

    let (sym_a, sym_b) = extract_equal_predicate(where_expr)?;
    let idx_a = resolve_local_index(&schemas, sym_a.name())?;
    let idx_b = resolve_local_index(&schemas, sym_b.name())?;

    let mut hops = left.hops;
    hops.extend(right.hops);
    hops.push((idx_a, idx_b));

    let mut schema = left.schema;
    schema.extend(right.schema);

    log::debug!(
        "extracted hop ({idx_a}, {idx_b}) for {}={}, {} tables accumulated so far",
        sym_a.name(),
        sym_b.name(),
        tables.len()
    );

    Ok(JoinPlan { tables, hops, schema })
}

fn extract_equal_predicate(where_expr: Expression) -> EngineResult<(Symbol, Symbol)> {
    let Expression::Complex(where_c) = where_expr else {
        return Err(EngineError::Internal("Join's third argument must be Where(...)".into()));
    };
    if where_c.head.name() != "Where" || where_c.arguments.len() != 1 {
        return Err(EngineError::Internal(
            "Join's third argument must be Where(Equal(symA, symB))".into(),
        ));
    }
    let equal_expr = where_c.arguments.into_iter().next().unwrap();
    let Expression::Complex(equal_c) = equal_expr else {
        return Err(EngineError::Internal("Where must wrap an Equal(...) predicate".into()));
    };
    if equal_c.head.name() != "Equal" || equal_c.arguments.len() != 2 {
        return Err(EngineError::Internal(
            "Where must wrap exactly Equal(symA, symB)".into(),
        ));
    }
    let mut equal_args = equal_c.arguments.into_iter();
    let a = equal_args.next().unwrap();
    let b = equal_args.next().unwrap();

    let sym_a = match a {
        Expression::Symbol(s) => s,
        other => return Err(EngineError::Internal(format!("Equal's left side must be a symbol, got {other:?}"))),
    };
    let sym_b = match b {
        Expression::Symbol(s) => s,
        other => return Err(EngineError::Internal(format!("Equal's right side must be a symbol, got {other:?}"))),
    };
    Ok((sym_a, sym_b))
}

/// Scan per-table schemas in accumulation order; the first table whose
/// schema contains `name` wins, and the returned index is local to that
/// table (spec.md §4.2's "first match wins" rule).
fn resolve_local_index(schemas: &[Schema], name: &str) -> EngineResult<usize> {
    for schema in schemas {
        if let Some(idx) = schema.iter().position(|column_name| column_name == name) {
            return Ok(idx);
        }
    }
    Err(EngineError::UnknownColumnSymbol(name.to_string()))
}
