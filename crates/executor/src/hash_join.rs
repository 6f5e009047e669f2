//! Multi-way hash join: one open-addressed index per hop, probed
//! backward from the last table.
//!
//! # Algorithm
//!
//! Build `H_c` for every hop `c`, keyed by `T_c`'s outgoing join column,
//! mapping each key to the list of row indices carrying it (collisions
//! resolved by linear probing over the key slot, not the row list). For
//! every row `i` of the last table, seed a singleton index set `I_{N-1}`
//! and walk backward: `I_j` extends every tuple in `I_{j+1}` by every
//! row in `H_j` matching that tuple's probe key. An empty `I_j`
//! collapses the rest of the walk to nothing. Every surviving tuple in
//! `I_0` is one output row.
//!
//! Expected `O(Σ|T_i|)` when keys distribute reasonably across buckets.

use crate::result_builder::ResultBuilder;
use common::EngineResult;
use joinplan::JoinPlan;
use std::hash::{Hash, Hasher};
use types::{Column, Table, Value};

pub fn execute(plan: &JoinPlan, hash_load_factor: f64) -> EngineResult<Table> {
    let JoinPlan { tables, hops, schema } = plan;
    let n = tables.len();
    let mut builder = ResultBuilder::new(schema.clone());

    if n == 0 || tables.iter().any(|t| t.row_count() == 0) {
        return Ok(builder.emit());
    }

    // H_c is built on T_c, keyed by the outgoing (left) column of hop c.
    let indexes: Vec<HashIndex> = hops
        .iter()
        .enumerate()
        .map(|(c, &(l, _r))| HashIndex::build(tables[c].column(l), hash_load_factor))
        .collect();

    for last_row in 0..tables[n - 1].row_count() {
        // I_{N-1} = {[last_row]}, I_k = ∅ for k < N-1.
        let mut index_sets: Vec<Vec<Vec<usize>>> = vec![Vec::new(); n];
        index_sets[n - 1].push(vec![last_row]);

        for j in (0..n - 1).rev() {
            let (_, r) = hops[j];
            let probe_key_col = tables[j + 1].column(r);
            let mut extended = Vec::new();
            for tuple in &index_sets[j + 1] {
                let probe_row = tuple[0];
                let probe_key = probe_key_col.get(probe_row);
                if let Some(matches) = indexes[j].lookup(&probe_key) {
                    for &c_j in matches {
                        let mut next = Vec::with_capacity(tuple.len() + 1);
                        next.push(c_j);
                        next.extend_from_slice(tuple);
                        extended.push(next);
                    }
                }
            }
            index_sets[j] = extended;
            if index_sets[j].is_empty() {
                break; // short-circuit: no output for this probe row
            }
        }

        for tuple in &index_sets[0] {
            let row = tuple
                .iter()
                .zip(tables.iter())
                .flat_map(|(&cursor, table)| (0..table.width()).map(move |c| table.column(c).get(cursor)))
                .collect();
            builder.append(row)?;
        }
    }

    Ok(builder.emit())
}

/// An open-addressed, linear-probed map from a join key to the row
/// indices carrying it. Capacity is fixed at build time from
/// `hash_load_factor`; a key's slot is found by probing from its hash
/// until either a matching key or an empty slot is seen.
struct HashIndex {
    capacity: usize,
    slots: Vec<Option<(Value, Vec<usize>)>>,
}

impl HashIndex {
    fn build(column: &Column, hash_load_factor: f64) -> Self {
        let len = column.len();
        let capacity = (((len.max(1)) as f64 / hash_load_factor).ceil() as usize).max(1);
        let mut slots: Vec<Option<(Value, Vec<usize>)>> = vec![None; capacity];

        for row in 0..len {
            let key = column.get(row);
            let mut idx = hash_value(&key) % capacity;
            loop {
                match &mut slots[idx] {
                    Some((existing, rows)) if values_equal(existing, &key) => {
                        rows.push(row);
                        break;
                    }
                    Some(_) => idx = (idx + 1) % capacity,
                    None => {
                        slots[idx] = Some((key, vec![row]));
                        break;
                    }
                }
            }
        }

        Self { capacity, slots }
    }

    fn lookup(&self, key: &Value) -> Option<&[usize]> {
        let mut idx = hash_value(key) % self.capacity;
        for _ in 0..self.capacity {
            match &self.slots[idx] {
                Some((existing, rows)) if values_equal(existing, key) => return Some(rows.as_slice()),
                Some(_) => idx = (idx + 1) % self.capacity,
                None => return None,
            }
        }
        None
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    a.eq_same_variant(b).unwrap_or(false)
}

fn hash_value(value: &Value) -> usize {
    let mut hasher = ahash::AHasher::default();
    match value {
        Value::Int(v) => v.hash(&mut hasher),
        Value::Float(v) => v.to_bits().hash(&mut hasher),
    }
    hasher.finish() as usize
}
