// src/grid.rs
//! Narrow contract between the sync engine and whatever widget renders the
//! grid. The engine loads rectangular data into the widget and listens to
//! its events; sort order, filter predicate and selection are owned by the
//! widget and only ever *read* through this interface.
//!
//! Column 0 is always the hidden row-id column — it is how grid-relative
//! row indexes are resolved back to stable rows after sorting/filtering.

use crate::columns::ValueKind;

#[derive(Clone, Debug)]
pub struct GridColumn {
    pub field: String,
    pub kind: ValueKind,
    pub read_only: bool,
    pub hidden: bool,
}

/// The rectangular dataset backing the grid. Row cells are aligned with
/// `columns`; cell 0 carries the row id.
#[derive(Clone, Debug, Default)]
pub struct TableData {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn col_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.field == field)
    }
}

/// Events the grid widget emits toward the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    /// A cell edit was committed in the widget.
    EditCommitted {
        row_index: usize,
        field: String,
        old_value: String,
        new_value: String,
    },
    /// A sort finished; visible order may have changed.
    SortCompleted,
    /// A filter finished; visible set may have changed.
    FilterCompleted,
    /// The selected cell moved.
    SelectionChanged { row_index: usize, field: String },
}

pub trait GridHandle {
    /// Initial load; the widget may reset its view state.
    fn load(&mut self, data: TableData);

    /// Replace the backing rows only. The widget must keep its view state
    /// (sort, filter, selection, column widths) and reapply it to the new
    /// rows itself.
    fn reload_rows(&mut self, rows: Vec<Vec<String>>);

    /// Row ids in the widget's current visible order (sorted + filtered).
    fn visible_ids(&self) -> Vec<String>;

    /// Row id at a grid-relative row index, if in range.
    fn id_at(&self, row_index: usize) -> Option<String>;

    /// The (row id, field) of an in-progress, uncommitted edit, if any.
    /// A reload merge will not refresh that one cell.
    fn editing_cell(&self) -> Option<(String, String)> {
        None
    }
}
