//! Nested-loop multi-way join: a cursor vector with overflow propagation,
//! no auxiliary indexes.
//!
//! # Algorithm
//!
//! Maintain a cursor per table, `c = [0, ..., 0]`. Each iteration checks
//! whether the row currently under each cursor satisfies every hop's
//! equality; on a mismatch at hop `i`, bump `c_i` and reset every cursor
//! to its right. After a (possible) match is emitted, cascade overflow
//! from the rightmost cursor back to the left, so the loop always
//! terminates: `c_0` is monotone non-decreasing and strictly increases on
//! every cascade that reaches it.
//!
//! # Performance
//!
//! O(Π|T_i|) in the worst case — no indexing, so this is the baseline
//! every other algorithm is checked against for correctness.

use crate::result_builder::ResultBuilder;
use common::EngineResult;
use joinplan::JoinPlan;
use types::Table;

pub fn execute(plan: &JoinPlan) -> EngineResult<Table> {
    let JoinPlan { tables, hops, schema } = plan;
    let mut builder = ResultBuilder::new(schema.clone());
    let n = tables.len();

    if n == 0 || tables.iter().any(|t| t.row_count() == 0) {
        return Ok(builder.emit());
    }

    let mut cursor = vec![0usize; n];
    while cursor[0] < tables[0].row_count() {
        let mut is_match = true;
        for i in 1..n {
            if !is_match {
                break;
            }
            let (l, r) = hops[i - 1];
            let left_value = tables[i - 1].column(l).get(cursor[i - 1]);
            let right_value = tables[i].column(r).get(cursor[i]);
            if left_value.eq_same_variant(&right_value) != Some(true) {
                is_match = false;
                cursor[i] += 1;
                for slot in cursor.iter_mut().skip(i + 1) {
                    *slot = 0;
                }
            }
        }

        if is_match {
            emit_row(&mut builder, tables, &cursor)?;
            cursor[n - 1] += 1;
        }

        for i in (1..n).rev() {
            if cursor[i] >= tables[i].row_count() {
                cursor[i] = 0;
                cursor[i - 1] += 1;
            }
        }
    }

    Ok(builder.emit())
}

fn emit_row(builder: &mut ResultBuilder, tables: &[Table], cursor: &[usize]) -> EngineResult<()> {
    let mut row = Vec::with_capacity(tables.iter().map(Table::width).sum());
    for (table, &c) in tables.iter().zip(cursor) {
        for col_idx in 0..table.width() {
            row.push(table.column(col_idx).get(c));
        }
    }
    builder.append(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use testsupport::fixtures::scenarios;
    use types::{Column, Value};

    fn rows(table: &Table) -> Vec<Vec<Value>> {
        let mut out: Vec<Vec<Value>> = (0..table.row_count())
            .map(|r| (0..table.width()).map(|c| table.column(c).get(r)).collect())
            .collect();
        out.sort_by_key(|row| format!("{row:?}"));
        out
    }

    #[test]
    fn simple_chain_join_matches_expected_multiset() {
        let plan = joinplan::extract(scenarios::simple_chain_join()).unwrap();
        let table = execute(&plan).unwrap();
        assert_eq!(
            rows(&table),
            rows(&Table::new(vec![
                ("A".into(), Column::Ints(vec![1, 2])),
                ("B".into(), Column::Ints(vec![3, 4])),
                ("C".into(), Column::Ints(vec![3, 4])),
                ("D".into(), Column::Ints(vec![4, 7])),
                ("E".into(), Column::Ints(vec![32, 94])),
                ("F".into(), Column::Ints(vec![4, 7])),
                ("G".into(), Column::Ints(vec![1, 2])),
            ]))
        );
    }

    #[test]
    fn empty_join_yields_full_schema_zero_rows() {
        let plan = joinplan::extract(scenarios::empty_join_non_overlapping()).unwrap();
        let table = execute(&plan).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.width(), 7);
    }

    #[test]
    fn different_column_pair_swaps_f_and_g() {
        let plan = joinplan::extract(scenarios::different_column_pair()).unwrap();
        let table = execute(&plan).unwrap();
        assert_eq!(
            rows(&table),
            rows(&Table::new(vec![
                ("A".into(), Column::Ints(vec![1, 2])),
                ("B".into(), Column::Ints(vec![3, 4])),
                ("C".into(), Column::Ints(vec![3, 4])),
                ("D".into(), Column::Ints(vec![4, 7])),
                ("E".into(), Column::Ints(vec![32, 94])),
                ("F".into(), Column::Ints(vec![1, 2])),
                ("G".into(), Column::Ints(vec![4, 7])),
            ]))
        );
    }

    #[test]
    fn osm_triangle_closure_counts() {
        let first = joinplan::extract(scenarios::osm_first_join()).unwrap();
        assert_eq!(execute(&first).unwrap().row_count(), 11);

        let second = joinplan::extract(scenarios::osm_second_join()).unwrap();
        assert_eq!(execute(&second).unwrap().row_count(), 15);
    }

    #[test]
    fn duplicate_keys_fan_out_as_a_times_b() {
        let left = Table::new(vec![("K".into(), Column::Ints(vec![1, 1]))]);
        let right = Table::new(vec![("V".into(), Column::Ints(vec![1, 1, 1]))]);
        let plan = JoinPlan {
            tables: vec![left, right],
            hops: vec![(0, 0)],
            schema: vec!["K".into(), "V".into()],
        };
        let table = execute(&plan).unwrap();
        assert_eq!(table.row_count(), 6);
    }
}
