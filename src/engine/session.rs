// src/engine/session.rs
//
// Wires one adapter, one grid widget and one page subtree into a running
// table session, and routes events both ways: grid events into the
// propagate/reorder/highlight paths, page events into the reload
// coordinator.

use std::error::Error;
use std::rc::Rc;

use crate::adapters::{PageEvent, PageEventKind, ReloadTriggers, SiteAdapter};
use crate::columns::{ColumnSpec, ID_FIELD, ValueKind};
use crate::core::ElementRef;
use crate::engine::extract::extract;
use crate::engine::index::IdentityIndex;
use crate::engine::reload::{ReloadState, merge_snapshots};
use crate::engine::snapshot::Snapshot;
use crate::engine::{highlight, propagate, reorder};
use crate::grid::{GridColumn, GridEvent, GridHandle, TableData};

pub struct TableSession<G: GridHandle> {
    adapter: Box<dyn SiteAdapter>,
    columns: Vec<ColumnSpec>,
    grid_columns: Vec<GridColumn>,
    container: ElementRef,
    snapshot: Snapshot,
    index: IdentityIndex,
    grid: G,
    triggers: ReloadTriggers,
    reload_state: Rc<ReloadState>,
}

impl<G: GridHandle> TableSession<G> {
    /// Validate the adapter, run the initial extraction and load the grid.
    pub fn new(adapter: Box<dyn SiteAdapter>, mut grid: G) -> Result<Self, Box<dyn Error>> {
        crate::adapters::validate(adapter.as_ref())?;

        let columns = adapter.column_specs();
        let data_rows = adapter.data_rows()?;
        let snapshot = extract(&data_rows, &columns);
        let index = IdentityIndex::build(&snapshot);

        let container = adapter
            .row_container()
            .or_else(|| data_rows.first().and_then(|r| r.el.parent()))
            .ok_or("no row container and no rows to infer one from")?;

        let grid_columns = build_grid_columns(&columns);
        grid.load(TableData {
            columns: grid_columns.clone(),
            rows: snapshot.table_rows(&index, &grid_columns),
        });

        let mut triggers = ReloadTriggers::new();
        let watched = container.clone();
        triggers.add(move |ev: &PageEvent| {
            matches!(
                ev.kind,
                PageEventKind::Input
                    | PageEventKind::Click
                    | PageEventKind::Change
                    | PageEventKind::KeyUp
            ) && ev.target.is_within(&watched)
        });
        adapter.register_reload_triggers(&mut triggers);

        logf!(
            "session '{}': {} rows, {} columns, {} reload triggers",
            adapter.name(),
            snapshot.len(),
            columns.len(),
            triggers.len()
        );

        Ok(TableSession {
            adapter,
            columns,
            grid_columns,
            container,
            snapshot,
            index,
            grid,
            triggers,
            reload_state: Rc::new(ReloadState::new()),
        })
    }

    /* ---------------- event entry points ---------------- */

    pub fn handle_grid_event(&mut self, ev: GridEvent) {
        match ev {
            GridEvent::EditCommitted { row_index, field, old_value, new_value } => {
                let Some(id) = self.grid.id_at(row_index) else {
                    loge!("edit: grid row {row_index} has no id");
                    return;
                };
                let outcome = propagate::apply_edit(
                    &self.snapshot,
                    &self.index,
                    &self.columns,
                    &id,
                    &field,
                    &new_value,
                );
                if outcome.applied() {
                    logd!("edit '{field}': '{old_value}' -> '{new_value}'");
                } else {
                    loge!("edit '{field}' on row '{id}' rejected: {outcome:?}");
                }
            }
            GridEvent::SortCompleted | GridEvent::FilterCompleted => {
                reorder::sync_dom_order(&self.grid, &self.container, &self.snapshot, &self.index);
            }
            GridEvent::SelectionChanged { row_index, field } => {
                highlight::apply_selection(
                    &self.grid,
                    row_index,
                    &field,
                    &self.snapshot,
                    &self.index,
                    &self.columns,
                );
            }
        }
    }

    /// Feed one page-level event through the registered reload triggers.
    pub fn on_page_event(&mut self, ev: &PageEvent) {
        if self.triggers.matches(ev) {
            self.reload();
        }
    }

    /* ---------------- reload coordinator ---------------- */

    /// Re-extract and merge. Serialized: a trigger landing while a reload is
    /// in flight is coalesced into one follow-up pass.
    pub fn reload(&mut self) {
        if !self.reload_state.begin() {
            logd!("reload: already in flight, coalesced");
            return;
        }
        loop {
            if let Err(e) = self.reload_once() {
                loge!("reload failed: {e}");
            }
            if !self.reload_state.complete() {
                break;
            }
            logd!("reload: rerunning for trigger received mid-flight");
        }
    }

    fn reload_once(&mut self) -> Result<(), Box<dyn Error>> {
        let data_rows = self.adapter.data_rows()?;
        let fresh = extract(&data_rows, &self.columns);
        let merged = merge_snapshots(&self.snapshot, fresh, self.grid.editing_cell());
        self.index = IdentityIndex::build(&merged);
        self.snapshot = merged;
        self.grid
            .reload_rows(self.snapshot.table_rows(&self.index, &self.grid_columns));
        logd!("reload: {} rows", self.snapshot.len());
        Ok(())
    }

    /* ---------------- accessors ---------------- */

    pub fn adapter_name(&self) -> &str {
        self.adapter.name()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn grid_columns(&self) -> &[GridColumn] {
        &self.grid_columns
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn index(&self) -> &IdentityIndex {
        &self.index
    }

    pub fn container(&self) -> &ElementRef {
        &self.container
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    /// Shared reload serialization state (exposed for instrumentation).
    pub fn reload_state(&self) -> Rc<ReloadState> {
        self.reload_state.clone()
    }

    /// Remove any highlight styling the session applied to the page.
    pub fn clear_highlights(&self) {
        highlight::clear_all(&self.snapshot, &self.columns);
    }
}

/// Grid schema: the hidden id column first, then the adapter's columns.
pub fn build_grid_columns(columns: &[ColumnSpec]) -> Vec<GridColumn> {
    let mut out = Vec::with_capacity(columns.len() + 1);
    out.push(GridColumn {
        field: s!(ID_FIELD),
        kind: ValueKind::Text,
        read_only: true,
        hidden: true,
    });
    out.extend(columns.iter().map(|c| GridColumn {
        field: c.field.clone(),
        kind: c.kind,
        read_only: c.read_only,
        hidden: c.hidden,
    }));
    out
}
