//! Column-store accumulation for join output.
//!
//! One instance accumulates rows across an entire join; every algorithm
//! (nested-loop, sort-merge, hash) funnels its matches through `append`,
//! then calls `emit` exactly once.

use common::{EngineError, EngineResult};
use types::{Column, Schema, Table, Value};

pub struct ResultBuilder {
    schema: Schema,
    columns: Option<Vec<Column>>,
}

impl ResultBuilder {
    pub fn new(schema: Schema) -> Self {
        Self { schema, columns: None }
    }

    /// Append one output row: one value per schema slot, in order.
    ///
    /// The column variants are fixed by whichever row arrives first;
    /// every later row's slots must agree, or this is a structural bug.
    pub fn append(&mut self, row: Vec<Value>) -> EngineResult<()> {
        if row.len() != self.schema.len() {
            return Err(EngineError::SchemaMismatch(format!(
                "row has {} values but schema has {} columns",
                row.len(),
                self.schema.len()
            )));
        }

        if self.columns.is_none() {
            self.columns = Some(row.iter().map(Column::empty_like).collect());
        }
        let columns = self.columns.as_mut().unwrap();

        for (slot, value) in columns.iter_mut().zip(row) {
            if !slot.push(value) {
                return Err(EngineError::SchemaMismatch(
                    "mixed value variants in the same output column".into(),
                ));
            }
        }
        Ok(())
    }

    /// Produce the output `Table`. A join that never appended a row still
    /// yields one empty column per schema slot, preserving schema shape
    /// (spec: "empty columns are emitted as empty List()").
    pub fn emit(self) -> Table {
        let ResultBuilder { schema, columns } = self;
        // An empty-output column's variant was never observed; default to
        // `Ints` since nothing downstream reads a zero-length column.
        let columns = columns.unwrap_or_else(|| schema.iter().map(|_| Column::Ints(Vec::new())).collect());
        let named = schema.into_iter().zip(columns).collect();
        Table::new(named)
    }
}
