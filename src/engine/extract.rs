// src/engine/extract.rs
//
// Row Extractor: turn adapter-discovered row elements into value Rows.
// Synchronous and idempotent — two passes over an unchanged page yield
// value-equal rows. Per-row failures are diagnostics, never faults.

use std::collections::BTreeMap;

use crate::adapters::DataRow;
use crate::columns::{ColumnSpec, Source, UNAVAILABLE};
use crate::engine::snapshot::{Row, Snapshot};

pub fn extract(data_rows: &[DataRow], columns: &[ColumnSpec]) -> Snapshot {
    let has_element_cols = columns
        .iter()
        .any(|c| matches!(c.source, Source::Element(_)));

    let mut rows = Vec::with_capacity(data_rows.len());
    for dr in data_rows {
        let mut values = BTreeMap::new();
        let mut resolved = 0usize;

        for col in columns {
            match &col.source {
                Source::Fixed(v) => {
                    values.insert(col.field.clone(), v.clone());
                }
                Source::Element(accessor) => match accessor(&dr.el) {
                    Some(el) => {
                        values.insert(col.field.clone(), el.display_value());
                        resolved += 1;
                    }
                    None => {
                        // Field stays absent; the cell renders blank.
                        logd!(
                            "extract: row '{}': no element for field '{}'",
                            dr.id, col.field
                        );
                    }
                },
                Source::Lookup(lookup) => match lookup(&dr.el) {
                    Ok(v) => {
                        values.insert(col.field.clone(), v);
                    }
                    Err(e) => {
                        logd!("extract: row '{}': lookup '{}' failed: {e}", dr.id, col.field);
                        values.insert(col.field.clone(), s!(UNAVAILABLE));
                    }
                },
            }
        }

        // A row none of whose field elements resolve has nothing backing it
        // in the page anymore; drop it loudly rather than show a ghost row.
        if has_element_cols && resolved == 0 {
            loge!("extract: row '{}' skipped: no field elements resolved", dr.id);
            continue;
        }

        rows.push(Row { id: dr.id.clone(), el: dr.el.clone(), values });
    }

    Snapshot { rows }
}
