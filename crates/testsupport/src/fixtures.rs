//! `Table`/`Expression` builders and the spec's concrete join scenarios.

use expr::{ComplexExpression, Expression, Span};
use types::Column;

/// Build a named column for a `types::Table`.
pub fn int_column(name: &str, values: &[i64]) -> (String, Column) {
    (name.to_string(), Column::Ints(values.to_vec()))
}

pub fn float_column(name: &str, values: &[f64]) -> (String, Column) {
    (name.to_string(), Column::Floats(values.to_vec()))
}

pub fn table(columns: Vec<(String, Column)>) -> types::Table {
    types::Table::new(columns)
}

/// Build a `Table(Name(List(...)), ...)` expression from named columns.
pub fn table_expr(columns: Vec<(String, Column)>) -> Expression {
    let args = columns
        .into_iter()
        .map(|(name, column)| {
            let span = match column {
                Column::Ints(values) => Span::Ints(values),
                Column::Floats(values) => Span::Floats(values),
            };
            Expression::complex(
                name,
                vec![Expression::Complex(ComplexExpression::with_spans(
                    "List",
                    vec![],
                    vec![span],
                ))],
            )
        })
        .collect();
    Expression::complex("Table", args)
}

/// Build a `Table` expression from integer-only named columns.
pub fn int_table_expr(columns: &[(&str, &[i64])]) -> Expression {
    table_expr(
        columns
            .iter()
            .map(|(name, values)| int_column(name, values))
            .collect(),
    )
}

pub fn where_equal(sym_a: &str, sym_b: &str) -> Expression {
    Expression::complex(
        "Where",
        vec![Expression::complex(
            "Equal",
            vec![Expression::symbol(sym_a), Expression::symbol(sym_b)],
        )],
    )
}

pub fn join_expr(left: Expression, right: Expression, sym_a: &str, sym_b: &str) -> Expression {
    Expression::complex("Join", vec![left, right, where_equal(sym_a, sym_b)])
}

/// The concrete join scenarios spec.md §8 enumerates, reproduced from the
/// original test suite's "Basics"/"SimpleMultiWayJoin"/"OSM" cases.
pub mod scenarios {
    use super::*;

    fn table_a() -> Expression {
        int_table_expr(&[("A", &[1, 2]), ("B", &[3, 4])])
    }

    fn table_c() -> Expression {
        int_table_expr(&[("C", &[3, 4, 6]), ("D", &[4, 7, 10]), ("E", &[32, 94, 77])])
    }

    /// Scenario 1: a simple three-table chain join on `(B,C)` then `(D,F)`.
    /// Expects 2 rows: `{(1,3,3,4,32,4,1), (2,4,4,7,94,7,2)}`.
    pub fn simple_chain_join() -> Expression {
        let f = int_table_expr(&[("F", &[4, 7]), ("G", &[1, 2])]);
        let bc = join_expr(table_a(), table_c(), "B", "C");
        join_expr(bc, f, "D", "F")
    }

    /// Scenario 2: same chain, but `F`/`G` share no keys with `D` — expects
    /// the empty relation with the full merged schema.
    pub fn empty_join_non_overlapping() -> Expression {
        let f = int_table_expr(&[("F", &[1, 2]), ("G", &[4, 7])]);
        let bc = join_expr(table_a(), table_c(), "B", "C");
        join_expr(bc, f, "D", "F")
    }

    /// Scenario 3: same inputs as (1), joined on `(D,G)` instead of `(D,F)`.
    /// Expects `{(1,3,3,4,32,1,4), (2,4,4,7,94,2,7)}`.
    pub fn different_column_pair() -> Expression {
        let f = int_table_expr(&[("F", &[4, 7]), ("G", &[1, 2])]);
        let bc = join_expr(table_a(), table_c(), "B", "C");
        join_expr(bc, f, "D", "G")
    }

    const OSM_BEGIN: [i64; 9] = [1, 2, 3, 4, 5, 6, 4, 7, 1];
    const OSM_END: [i64; 9] = [2, 3, 1, 5, 4, 5, 6, 3, 7];
    const OSM_LENGTH: [f64; 9] = [10.0, 7.0, 8.0, 2.0, 15.0, 12.0, 4.0, 20.0, 6.0];

    fn osm_copy(prefix: &str) -> Expression {
        table_expr(vec![
            (format!("{prefix}Begin"), Column::Ints(OSM_BEGIN.to_vec())),
            (format!("{prefix}End"), Column::Ints(OSM_END.to_vec())),
            (format!("{prefix}Length"), Column::Floats(OSM_LENGTH.to_vec())),
        ])
    }

    /// Scenario 4 (first hop): joining two 9-row OSM adjacency copies on
    /// `FirstEnd=SecondBegin` closes 11 open paths.
    pub fn osm_first_join() -> Expression {
        join_expr(osm_copy("First"), osm_copy("Second"), "FirstEnd", "SecondBegin")
    }

    /// Scenario 4 (second hop): chaining a third OSM copy on
    /// `SecondEnd=ThirdBegin` produces 15 rows.
    pub fn osm_second_join() -> Expression {
        join_expr(osm_first_join(), osm_copy("Third"), "SecondEnd", "ThirdBegin")
    }

    /// Scenario 5: a bare `Table` expression, for passthrough tests.
    pub fn single_table() -> Expression {
        table_a()
    }

    /// Scenario 6: a join on a symbol absent from both schemas.
    pub fn unknown_symbol_join() -> Expression {
        let a = int_table_expr(&[("A", &[1])]);
        let b = int_table_expr(&[("B", &[1])]);
        join_expr(a, b, "A", "Z")
    }
}
