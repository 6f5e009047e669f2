//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random `Value`/`Column`/`Table`
//! instances for property-based testing of the join executor.

use proptest::prelude::*;
use types::{Column, Table, Value};

/// Strategy for generating a random `Value`, split evenly between variants.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::Float),
    ]
}

/// Strategy for generating a variant-pure `Column` of the given length.
pub fn arb_column(len: usize) -> impl Strategy<Value = Column> {
    prop_oneof![
        prop::collection::vec(any::<i64>(), len).prop_map(Column::Ints),
        prop::collection::vec(any::<f64>().prop_filter("finite", |f| f.is_finite()), len)
            .prop_map(Column::Floats),
    ]
}

/// Strategy for generating a `Table` with `num_cols` columns of `num_rows`
/// rows each, with ASCII letter names `"col_a"`, `"col_b"`, ...
pub fn arb_table(num_cols: usize, num_rows: usize) -> impl Strategy<Value = Table> {
    prop::collection::vec(arb_column(num_rows), num_cols).prop_map(move |columns| {
        let named = columns
            .into_iter()
            .enumerate()
            .map(|(i, column)| (format!("col_{i}"), column))
            .collect();
        Table::new(named)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn arb_column_has_requested_length(column in arb_column(7)) {
            assert_eq!(column.len(), 7);
        }

        #[test]
        fn arb_table_has_requested_shape(table in arb_table(3, 4)) {
            assert_eq!(table.width(), 3);
            assert_eq!(table.row_count(), 4);
        }
    }
}
