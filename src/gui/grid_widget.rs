// src/gui/grid_widget.rs
//
// The egui-backed grid: owns the rectangular dataset plus all view state
// (sort, filter, selection, in-progress edit) and queues events for the
// session to drain once per frame. Rendering lives in
// components/data_table.rs; this file is pure model so the view logic is
// testable without a Ui.

use crate::columns::ValueKind;
use crate::grid::{GridEvent, GridHandle, TableData};

/// An uncommitted cell edit. `buffer` is what the text box currently holds.
#[derive(Clone, Debug)]
pub struct EditState {
    pub id: String,
    pub field: String,
    pub buffer: String,
}

#[derive(Default)]
pub struct EguiGrid {
    data: TableData,

    /// (data column index, ascending). None = source order.
    sort: Option<(usize, bool)>,
    filter: String,

    /// Visible rows in display order, as indexes into `data.rows`.
    view: Vec<usize>,

    /// (view-relative row index, field) of the selected cell.
    selected: Option<(usize, String)>,
    editing: Option<EditState>,

    events: Vec<GridEvent>,
}

impl EguiGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &TableData {
        &self.data
    }

    pub fn sort(&self) -> Option<(usize, bool)> {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn selected(&self) -> Option<&(usize, String)> {
        self.selected.as_ref()
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn editing_buffer_mut(&mut self) -> Option<&mut String> {
        self.editing.as_mut().map(|e| &mut e.buffer)
    }

    /// Drain events queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cell text at a view-relative position, for rendering.
    pub fn cell(&self, view_ix: usize, col_ix: usize) -> Option<&str> {
        let src = *self.view.get(view_ix)?;
        self.data.rows.get(src)?.get(col_ix).map(String::as_str)
    }

    /* ---------------- view state mutations ---------------- */

    /// Header click: asc -> desc -> unsorted, per column.
    pub fn toggle_sort(&mut self, col_ix: usize) {
        self.sort = match self.sort {
            Some((c, true)) if c == col_ix => Some((col_ix, false)),
            Some((c, false)) if c == col_ix => None,
            _ => Some((col_ix, true)),
        };
        self.rebuild_view();
        self.events.push(GridEvent::SortCompleted);
    }

    /// Replace the filter text and reapply. No-op if unchanged.
    pub fn set_filter(&mut self, text: String) {
        if text == self.filter {
            return;
        }
        self.filter = text;
        self.rebuild_view();
        self.events.push(GridEvent::FilterCompleted);
    }

    pub fn select(&mut self, view_ix: usize, field: &str) {
        if self.selected.as_ref().is_some_and(|(r, f)| *r == view_ix && f == field) {
            return;
        }
        self.selected = Some((view_ix, s!(field)));
        self.events.push(GridEvent::SelectionChanged {
            row_index: view_ix,
            field: s!(field),
        });
    }

    /// Start editing a cell in place, seeding the buffer with its current
    /// value. Refused for read-only columns.
    pub fn begin_edit(&mut self, view_ix: usize, field: &str) {
        let Some(col_ix) = self.data.col_index(field) else { return };
        if self.data.columns[col_ix].read_only {
            return;
        }
        let Some(id) = self.id_at(view_ix) else { return };
        let buffer = self.cell(view_ix, col_ix).unwrap_or_default().to_string();
        self.editing = Some(EditState { id, field: s!(field), buffer });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit the in-progress edit: update the backing cell and queue an
    /// `EditCommitted` for the session. Unchanged text commits nothing.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.editing.take() else { return };
        let Some(col_ix) = self.data.col_index(&edit.field) else { return };
        // The row may have moved during the edit; chase it by id.
        let Some(src) = self.data.rows.iter().position(|r| r[0] == edit.id) else {
            return;
        };
        let old_value = self.data.rows[src][col_ix].clone();
        if old_value == edit.buffer {
            return;
        }
        self.data.rows[src][col_ix] = edit.buffer.clone();
        // The view is left as-is so the queued row_index stays valid until
        // the session drains it; the filter reapplies on its next change.
        let Some(row_index) = self.view.iter().position(|&i| i == src) else {
            return;
        };
        self.events.push(GridEvent::EditCommitted {
            row_index,
            field: edit.field,
            old_value,
            new_value: edit.buffer,
        });
    }

    /* ---------------- filter + sort ---------------- */

    fn rebuild_view(&mut self) {
        let selected_id = self
            .selected
            .as_ref()
            .and_then(|(r, f)| self.id_at(*r).map(|id| (id, f.clone())));

        let needle = self.filter.to_lowercase();
        self.view = (0..self.data.rows.len())
            .filter(|&i| needle.is_empty() || self.row_matches(i, &needle))
            .collect();

        if let Some((col_ix, asc)) = self.sort {
            let numeric = self
                .data
                .columns
                .get(col_ix)
                .is_some_and(|c| c.kind == ValueKind::Numeric);
            let rows = &self.data.rows;
            self.view.sort_by(|&a, &b| {
                let va = rows[a].get(col_ix).map(String::as_str).unwrap_or("");
                let vb = rows[b].get(col_ix).map(String::as_str).unwrap_or("");
                let ord = if numeric {
                    let na = leading_number(va);
                    let nb = leading_number(vb);
                    na.partial_cmp(&nb).unwrap_or(std::cmp::Ordering::Equal)
                } else {
                    va.to_lowercase().cmp(&vb.to_lowercase())
                };
                if asc { ord } else { ord.reverse() }
            });
        }

        // Selection follows the row, not the slot.
        self.selected = selected_id.and_then(|(id, field)| {
            self.view
                .iter()
                .position(|&i| self.data.rows[i][0] == id)
                .map(|vix| (vix, field))
        });
    }

    /// Case-insensitive substring match over the row's visible cells.
    fn row_matches(&self, src: usize, needle: &str) -> bool {
        let row = &self.data.rows[src];
        self.data.columns.iter().enumerate().any(|(ci, col)| {
            !col.hidden
                && row
                    .get(ci)
                    .is_some_and(|cell| cell.to_lowercase().contains(needle))
        })
    }
}

/// Numeric sort key: the leading number in the cell, so "12 min" and
/// "4.8" both order numerically. Cells without one sort last.
fn leading_number(s: &str) -> f64 {
    let t = s.trim_start();
    let end = t
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    t[..end].parse().unwrap_or(f64::INFINITY)
}

impl GridHandle for EguiGrid {
    fn load(&mut self, data: TableData) {
        self.data = data;
        self.sort = None;
        self.filter.clear();
        self.selected = None;
        self.editing = None;
        self.events.clear();
        self.view = (0..self.data.rows.len()).collect();
    }

    fn reload_rows(&mut self, rows: Vec<Vec<String>>) {
        self.data.rows = rows;
        // Drop the edit if its row vanished; otherwise the buffer survives
        // (the merge already kept the underlying cell untouched).
        if let Some(edit) = &self.editing {
            if !self.data.rows.iter().any(|r| r[0] == edit.id) {
                self.editing = None;
            }
        }
        self.rebuild_view();
    }

    fn visible_ids(&self) -> Vec<String> {
        self.view
            .iter()
            .map(|&i| self.data.rows[i][0].clone())
            .collect()
    }

    fn id_at(&self, row_index: usize) -> Option<String> {
        let src = *self.view.get(row_index)?;
        self.data.rows.get(src).map(|r| r[0].clone())
    }

    fn editing_cell(&self) -> Option<(String, String)> {
        self.editing
            .as_ref()
            .map(|e| (e.id.clone(), e.field.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridColumn;

    fn grid() -> EguiGrid {
        let columns = vec![
            GridColumn { field: s!("id"), kind: ValueKind::Text, read_only: true, hidden: true },
            GridColumn { field: s!("name"), kind: ValueKind::Text, read_only: false, hidden: false },
            GridColumn { field: s!("eta"), kind: ValueKind::Numeric, read_only: true, hidden: false },
        ];
        let rows = vec![
            row!["b", "Burger Barn", "25 min"],
            row!["a", "Casa Tacos", "5 min"],
            row!["c", "Green Bowl", "110 min"],
        ];
        let mut g = EguiGrid::new();
        g.load(TableData { columns, rows });
        g
    }

    #[test]
    fn numeric_sort_orders_by_leading_number() {
        let mut g = grid();
        g.toggle_sort(2);
        assert_eq!(g.visible_ids(), vec!["a", "b", "c"]);
        g.toggle_sort(2);
        assert_eq!(g.visible_ids(), vec!["c", "b", "a"]);
        g.toggle_sort(2);
        assert_eq!(g.visible_ids(), vec!["b", "a", "c"]);
    }

    #[test]
    fn filter_skips_hidden_id_column() {
        let mut g = grid();
        g.set_filter(s!("a")); // matches names, but never the id cell "a"
        assert_eq!(g.visible_ids(), vec!["b", "a"]);
        g.set_filter(s!("green"));
        assert_eq!(g.visible_ids(), vec!["c"]);
    }

    #[test]
    fn selection_follows_row_through_resort() {
        let mut g = grid();
        g.select(0, "name"); // row id "b"
        g.toggle_sort(1); // Burger, Casa, Green
        let (vix, _) = g.selected().cloned().unwrap();
        assert_eq!(g.id_at(vix).as_deref(), Some("b"));
    }

    #[test]
    fn commit_edit_updates_cell_and_queues_event() {
        let mut g = grid();
        g.begin_edit(0, "name");
        *g.editing_buffer_mut().unwrap() = s!("Patty Palace");
        g.take_events();
        g.commit_edit();
        assert_eq!(g.cell(0, 1), Some("Patty Palace"));
        let evs = g.take_events();
        assert!(matches!(
            &evs[..],
            [GridEvent::EditCommitted { field, new_value, .. }]
                if field == "name" && new_value == "Patty Palace"
        ));
    }

    #[test]
    fn read_only_column_refuses_edit() {
        let mut g = grid();
        g.begin_edit(0, "eta");
        assert!(g.editing().is_none());
    }

    #[test]
    fn reload_preserves_filter_and_sort() {
        let mut g = grid();
        g.toggle_sort(1);
        g.set_filter(s!("b")); // Burger Barn, Green Bowl
        g.reload_rows(vec![
            row!["b", "Burger Barn", "25 min"],
            row!["a", "Casa Tacos", "5 min"],
            row!["c", "Green Bowl", "110 min"],
            row!["d", "Bao House", "15 min"],
        ]);
        assert_eq!(g.visible_ids(), vec!["d", "b", "c"]);
    }
}
