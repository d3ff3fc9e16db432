// src/engine/index.rs
//
// Row Identity Index: id → position within one snapshot. Derived and
// rebuildable; never the source of truth, never mutated in place. The
// reload path builds a fresh one and replaces the old wholesale.

use std::collections::HashMap;

use crate::engine::snapshot::{Row, Snapshot};

#[derive(Debug, Default)]
pub struct IdentityIndex {
    by_id: HashMap<String, usize>,
}

impl IdentityIndex {
    /// Build from one snapshot. Duplicate ids are a defect in the adapter;
    /// the first occurrence wins and later ones are dropped with a
    /// diagnostic.
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut by_id = HashMap::with_capacity(snapshot.len());
        for (i, row) in snapshot.rows.iter().enumerate() {
            if by_id.contains_key(&row.id) {
                loge!("index: duplicate row id '{}' dropped (first wins)", row.id);
                continue;
            }
            by_id.insert(row.id.clone(), i);
        }
        IdentityIndex { by_id }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get<'a>(&self, snapshot: &'a Snapshot, id: &str) -> Option<&'a Row> {
        self.position(id).and_then(|i| snapshot.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
