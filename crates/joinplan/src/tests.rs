use super::*;
use common::EngineError;
use pretty_assertions::assert_eq;
use testsupport::fixtures::{int_table_expr, scenarios};

#[test]
fn extract_single_table_yields_one_table_and_no_hops() {
    let plan = extract(scenarios::single_table()).unwrap();
    assert_eq!(plan.tables.len(), 1);
    assert!(plan.hops.is_empty());
    assert_eq!(plan.schema, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(plan.tables[0].column(0), &Column::Ints(vec![1, 2]));
}

#[test]
fn extract_simple_chain_join_resolves_both_hops() {
    let plan = extract(scenarios::simple_chain_join()).unwrap();
    assert_eq!(plan.tables.len(), 3);
    assert_eq!(plan.hops, vec![(1, 0), (1, 0)]);
    assert_eq!(
        plan.schema,
        vec!["A", "B", "C", "D", "E", "F", "G"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}

#[test]
fn extract_different_column_pair_resolves_to_g_not_f() {
    let plan = extract(scenarios::different_column_pair()).unwrap();
    assert_eq!(plan.hops, vec![(1, 0), (1, 1)]);
}

#[test]
fn extract_unknown_symbol_is_an_error() {
    let err = extract(scenarios::unknown_symbol_join()).unwrap_err();
    assert!(matches!(err, EngineError::UnknownColumnSymbol(name) if name == "Z"));
}

#[test]
fn extract_osm_joins_accumulate_tables_and_hops() {
    let plan = extract(scenarios::osm_second_join()).unwrap();
    assert_eq!(plan.tables.len(), 3);
    assert_eq!(plan.hops.len(), 2);
    assert_eq!(plan.schema.len(), 9);
}

#[test]
fn extract_table_with_float_column() {
    let expr = Expression::complex(
        "Table",
        vec![Expression::complex(
            "Length",
            vec![Expression::Complex(ComplexExpression::new(
                "List",
                vec![Expression::Float(1.5), Expression::Float(2.5)],
            ))],
        )],
    );
    let plan = extract(expr).unwrap();
    assert_eq!(plan.tables[0].column(0), &Column::Floats(vec![1.5, 2.5]));
}

#[test]
fn extract_table_rejects_non_numeric_literal() {
    let expr = Expression::complex(
        "Table",
        vec![Expression::complex(
            "Name",
            vec![Expression::Complex(ComplexExpression::new(
                "List",
                vec![Expression::Bool(true)],
            ))],
        )],
    );
    let err = extract(expr).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedValueType(_)));
}

#[test]
fn extract_table_with_no_rows_defaults_to_empty_int_column() {
    let expr = int_table_expr(&[("A", &[])]);
    let plan = extract(expr).unwrap();
    assert_eq!(plan.tables[0].column(0), &Column::Ints(Vec::new()));
}

#[test]
fn extract_rejects_malformed_join_arity() {
    let bad = Expression::complex("Join", vec![Expression::symbol("A"), Expression::symbol("B")]);
    let err = extract(bad).unwrap_err();
    assert!(matches!(err, EngineError::Internal(_)));
}
