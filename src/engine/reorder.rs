// src/engine/reorder.rs
//
// Reorder Synchronizer: after a grid sort or filter, physically rearrange
// the page's row elements to match the grid's visible order. Rows the grid
// no longer shows are detached, not destroyed — a later reorder can bring
// the same elements back.

use crate::core::ElementRef;
use crate::engine::index::IdentityIndex;
use crate::engine::snapshot::Snapshot;
use crate::grid::GridHandle;

pub fn sync_dom_order<G: GridHandle>(
    grid: &G,
    container: &ElementRef,
    snapshot: &Snapshot,
    index: &IdentityIndex,
) {
    let ids = grid.visible_ids();

    // Detach everything first; append_child re-parents, so even a buggy id
    // list cannot leave one element under two containers.
    container.clear_children();

    let mut attached = 0usize;
    for id in &ids {
        match index.get(snapshot, id) {
            Some(row) => {
                container.append_child(&row.el);
                attached += 1;
            }
            None => {
                // Filtered out or stale; stays detached, re-attachable later.
                logd!("reorder: id '{id}' not in index, left detached");
            }
        }
    }
    logd!("reorder: reattached {attached} of {} visible rows", ids.len());
}
