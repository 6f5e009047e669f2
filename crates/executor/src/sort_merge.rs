//! Sort-merge join over a left-deep pipeline of hops.
//!
//! # Algorithm
//!
//! Keep a running accumulator `L`, seeded with `T_0`. For each hop,
//! sort `L` and the next table `R` ascending by their join columns (any
//! row-preserving comparison sort — the original reference used a
//! Hoare-partition quicksort, but duplicate-run handling here is
//! explicit and doesn't depend on sort stability), then two-pointer
//! merge: advance whichever side trails, and on an equal key
//! materialize the full cartesian product of the two maximal runs of
//! that key before continuing. The merged relation becomes the next
//! `L`.
//!
//! # Ordering
//!
//! Output is non-descending in the first hop's left key — the one
//! guarantee nested-loop and hash don't make.

use crate::result_builder::ResultBuilder;
use common::{EngineError, EngineResult};
use joinplan::JoinPlan;
use std::cmp::Ordering;
use types::{Column, Table, Value};

pub fn execute(plan: &JoinPlan) -> EngineResult<Table> {
    let JoinPlan { tables, hops, schema } = plan;

    if tables.is_empty() || tables.iter().any(|t| t.row_count() == 0) {
        return Ok(ResultBuilder::new(schema.clone()).emit());
    }

    let mut accumulator = tables[0].clone();
    let mut column_offset = 0usize;

    for (k, &(l, r)) in hops.iter().enumerate() {
        let right = &tables[k + 1];
        let li = l + column_offset;
        let ri = r;

        let sorted_left = sort_by_column(&accumulator, li);
        let sorted_right = sort_by_column(right, ri);
        let pre_merge_left_width = accumulator.width();

        accumulator = merge_with_duplicates(&sorted_left, li, &sorted_right, ri)?;
        // `li` for the next hop must land inside the table just merged in, not
        // behind every table merged so far — this already equals
        // Σ_{j<k+1}|cols(T_j)|, so replace rather than accumulate.
        column_offset = pre_merge_left_width;
    }

    Ok(accumulator)
}

/// Row-preserving ascending sort by one column: compute a permutation,
/// then select every column through it.
fn sort_by_column(table: &Table, col_idx: usize) -> Table {
    let column = table.column(col_idx);
    let mut order: Vec<usize> = (0..table.row_count()).collect();
    order.sort_by(|&a, &b| {
        column
            .get(a)
            .partial_cmp_same_variant(&column.get(b))
            .unwrap_or(Ordering::Equal)
    });

    let columns = table
        .columns
        .iter()
        .map(|(name, col)| (name.clone(), col.select(&order)))
        .collect();
    Table::new(columns)
}

fn merge_with_duplicates(left: &Table, li: usize, right: &Table, ri: usize) -> EngineResult<Table> {
    let merged_schema = left.schema().into_iter().chain(right.schema()).collect();
    let mut builder = ResultBuilder::new(merged_schema);

    let left_col = left.column(li);
    let right_col = right.column(ri);
    let (left_len, right_len) = (left.row_count(), right.row_count());

    let mut i = 0;
    let mut j = 0;
    while i < left_len && j < right_len {
        match left_col.get(i).partial_cmp_same_variant(&right_col.get(j)) {
            Some(Ordering::Less) => i += 1,
            Some(Ordering::Greater) => j += 1,
            Some(Ordering::Equal) => {
                let left_run_end = run_end(left_col, i, left_len);
                let right_run_end = run_end(right_col, j, right_len);
                for left_row in i..left_run_end {
                    for right_row in j..right_run_end {
                        let mut row = row_values(left, left_row);
                        row.extend(row_values(right, right_row));
                        builder.append(row)?;
                    }
                }
                i = left_run_end;
                j = right_run_end;
            }
            None => return Err(EngineError::Internal("incomparable join key variants".into())),
        }
    }

    Ok(builder.emit())
}

/// The end (exclusive) of the maximal run of equal keys starting at `start`.
fn run_end(column: &Column, start: usize, len: usize) -> usize {
    let key = column.get(start);
    let mut end = start + 1;
    while end < len && column.get(end).eq_same_variant(&key) == Some(true) {
        end += 1;
    }
    end
}

fn row_values(table: &Table, row: usize) -> Vec<Value> {
    (0..table.width()).map(|c| table.column(c).get(row)).collect()
}
