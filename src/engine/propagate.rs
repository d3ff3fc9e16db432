// src/engine/propagate.rs
//
// Change Propagator: write a committed grid edit back into the page.
// Read-only protection lives here, centrally — whatever the grid widget's
// own column config says, a read-only field is never mutated. Stale targets
// are a logged no-op; nothing on this path may fault the host page.

use crate::columns::ColumnSpec;
use crate::engine::index::IdentityIndex;
use crate::engine::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The DOM element's editable value was updated.
    Applied,
    /// Column is read-only; no side effect.
    ReadOnly,
    /// Row id not present in the current index.
    UnknownRow,
    /// No column spec for the field.
    UnknownField,
    /// Column has no element accessor (fixed or lookup sourced).
    NoAccessor,
    /// Accessor resolved nothing, or the element left the document.
    StaleTarget,
}

impl EditOutcome {
    pub fn applied(self) -> bool {
        self == EditOutcome::Applied
    }
}

pub fn apply_edit(
    snapshot: &Snapshot,
    index: &IdentityIndex,
    columns: &[ColumnSpec],
    id: &str,
    field: &str,
    new_value: &str,
) -> EditOutcome {
    let Some(row) = index.get(snapshot, id) else {
        loge!("edit: unknown row id '{id}'");
        return EditOutcome::UnknownRow;
    };
    let Some(col) = columns.iter().find(|c| c.field == field) else {
        loge!("edit: unknown field '{field}'");
        return EditOutcome::UnknownField;
    };
    if col.read_only {
        logd!("edit: '{field}' is read-only, rejected");
        return EditOutcome::ReadOnly;
    }
    let Some(el) = col.resolve(&row.el) else {
        if matches!(col.source, crate::columns::Source::Element(_)) {
            loge!("edit: stale target for row '{id}' field '{field}'");
            return EditOutcome::StaleTarget;
        }
        return EditOutcome::NoAccessor;
    };
    if !el.is_connected() {
        loge!("edit: element for row '{id}' field '{field}' left the document");
        return EditOutcome::StaleTarget;
    }

    el.set_editable_value(new_value);
    logd!("edit: row '{id}' field '{field}' <- '{new_value}'");
    EditOutcome::Applied
}
