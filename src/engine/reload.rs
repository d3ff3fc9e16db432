// src/engine/reload.rs
//
// Reload Coordinator pieces: the serialization state that keeps overlapping
// reload triggers from interleaving two extraction passes, and the merge
// that folds a fresh extraction into the previous snapshot without
// disturbing unrelated grid state.

use std::cell::Cell;
use std::collections::HashMap;

use crate::engine::snapshot::{Row, Snapshot};

/// Reentrancy guard for reloads. Single-threaded: "in flight" means a
/// trigger fired while the coordinator was already mid-reload (for example
/// an adapter-declared trigger firing during extraction); such triggers are
/// coalesced into one follow-up pass instead of running concurrently.
#[derive(Debug, Default)]
pub struct ReloadState {
    in_flight: Cell<bool>,
    pending: Cell<bool>,
}

impl ReloadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a reload. Returns false if one is already in flight, in
    /// which case the trigger has been recorded for a follow-up pass.
    pub fn begin(&self) -> bool {
        if self.in_flight.get() {
            self.pending.set(true);
            return false;
        }
        self.in_flight.set(true);
        self.pending.set(false);
        true
    }

    /// Finish one pass. Returns true when a trigger arrived mid-flight and
    /// the caller should run another pass; otherwise clears the in-flight
    /// state.
    pub fn complete(&self) -> bool {
        if self.pending.replace(false) {
            return true;
        }
        self.in_flight.set(false);
        false
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

/// Merge a fresh extraction into the previous snapshot.
///
/// Row order follows the fresh pass — the grid reapplies its own sort and
/// filter on reload. For ids present in both snapshots the previous row's
/// values are kept where the fresh pass has none (e.g. lookup enrichment
/// from an earlier pass) and refreshed everywhere else, except the one cell
/// the grid reports as being edited right now: an uncommitted edit outranks
/// a concurrent reload's value for that cell.
pub fn merge_snapshots(
    prev: &Snapshot,
    fresh: Snapshot,
    editing: Option<(String, String)>,
) -> Snapshot {
    let mut prev_by_id: HashMap<&str, &Row> = HashMap::with_capacity(prev.len());
    for row in &prev.rows {
        prev_by_id.entry(row.id.as_str()).or_insert(row);
    }

    let mut rows = Vec::with_capacity(fresh.rows.len());
    for mut row in fresh.rows {
        if let Some(old) = prev_by_id.get(row.id.as_str()) {
            let mut values = old.values.clone();
            for (field, value) in row.values {
                let shielded = editing
                    .as_ref()
                    .is_some_and(|(id, f)| *id == row.id && *f == field);
                if shielded && values.contains_key(&field) {
                    logd!("reload: preserving uncommitted edit at ('{}', '{field}')", row.id);
                    continue;
                }
                values.insert(field, value);
            }
            row.values = values;
        }
        rows.push(row);
    }

    Snapshot { rows }
}
