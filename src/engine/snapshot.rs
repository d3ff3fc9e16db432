// src/engine/snapshot.rs
//
// One extraction pass over the page: an ordered set of Rows plus nothing
// else. Snapshots are immutable once built and replaced wholesale; only the
// reload path ever produces a new one from an old one (see reload.rs).

use std::collections::BTreeMap;

use crate::columns::ID_FIELD;
use crate::core::ElementRef;
use crate::engine::index::IdentityIndex;
use crate::grid::GridColumn;

/// One logical page item: a stable id, the live element backing it, and the
/// extracted field values. A field missing from `values` failed to resolve
/// during extraction and renders blank.
#[derive(Clone, Debug)]
pub struct Row {
    pub id: String,
    pub el: ElementRef,
    pub values: BTreeMap<String, String>,
}

impl Row {
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|v| v.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub rows: Vec<Row>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Row> {
        self.rows.get(i)
    }

    /// Project the snapshot into the rectangular grid dataset. Cell order
    /// follows `grid_columns`; the id column is filled from the row id.
    /// Rows the index dropped (duplicate ids) are excluded, so the grid
    /// shows exactly the indexed rows.
    pub fn table_rows(
        &self,
        index: &IdentityIndex,
        grid_columns: &[GridColumn],
    ) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, row)| index.position(&row.id) == Some(*i))
            .map(|(_, row)| {
                grid_columns
                    .iter()
                    .map(|col| {
                        if col.field == ID_FIELD {
                            row.id.clone()
                        } else {
                            row.value(&col.field).map(String::from).unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
