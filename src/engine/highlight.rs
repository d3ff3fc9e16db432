// src/engine/highlight.rs
//
// Selection Highlighter: visually correlate the selected grid cell with its
// source in the page. With several rows the whole row element is outlined;
// with exactly one row (form-style adapters) the specific field element is
// tinted instead. Either way the target is scrolled into view. A selection
// that no longer resolves is a no-op.

use crate::columns::ColumnSpec;
use crate::engine::index::IdentityIndex;
use crate::engine::snapshot::Snapshot;
use crate::grid::GridHandle;

pub const HIGHLIGHT_COLOR: &str = "#c9ebff";

const ROW_STYLE: &str = "border";
const FIELD_STYLE: &str = "background-color";

pub fn apply_selection<G: GridHandle>(
    grid: &G,
    row_index: usize,
    field: &str,
    snapshot: &Snapshot,
    index: &IdentityIndex,
    columns: &[ColumnSpec],
) {
    // Resolve through the id column, never through the grid-relative row
    // index — that index is sort/filter-relative.
    let Some(id) = grid.id_at(row_index) else {
        logd!("highlight: no id at grid row {row_index}");
        return;
    };
    let Some(row) = index.get(snapshot, &id) else {
        logd!("highlight: id '{id}' no longer resolves, skipping");
        return;
    };

    if snapshot.len() > 1 {
        for other in &snapshot.rows {
            other.el.clear_style(ROW_STYLE);
        }
        row.el.set_style(ROW_STYLE, &format!("solid 2px {HIGHLIGHT_COLOR}"));
        row.el.scroll_into_view();
    } else {
        // Single-row adapter: light up the one field element.
        for col in columns {
            if let Some(el) = col.resolve(&row.el) {
                el.clear_style(FIELD_STYLE);
            }
        }
        let Some(col) = columns.iter().find(|c| c.field == field) else {
            logd!("highlight: unknown field '{field}'");
            return;
        };
        if let Some(el) = col.resolve(&row.el) {
            el.set_style(FIELD_STYLE, HIGHLIGHT_COLOR);
            el.scroll_into_view();
        }
    }
}

/// Clear any highlight this module may have applied.
pub fn clear_all(snapshot: &Snapshot, columns: &[ColumnSpec]) {
    for row in &snapshot.rows {
        row.el.clear_style(ROW_STYLE);
        for col in columns {
            if let Some(el) = col.resolve(&row.el) {
                el.clear_style(FIELD_STYLE);
            }
        }
    }
}
