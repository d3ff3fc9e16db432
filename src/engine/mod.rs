// src/engine/mod.rs
//
// The DOM↔table synchronization engine. `session` ties the pieces together;
// the submodules are deliberately small and single-purpose:
//
//   extract    page elements -> Snapshot of Rows
//   index      id -> Row lookup, rebuilt wholesale per snapshot
//   propagate  grid edit -> DOM write-back (read-only enforced here)
//   reload     re-extraction serialization + snapshot merging
//   reorder    grid sort/filter order -> physical DOM order
//   highlight  grid selection -> page highlight + scroll

pub mod extract;
pub mod highlight;
pub mod index;
pub mod propagate;
pub mod reload;
pub mod reorder;
pub mod session;
pub mod snapshot;

pub use extract::extract;
pub use index::IdentityIndex;
pub use propagate::{EditOutcome, apply_edit};
pub use reload::{ReloadState, merge_snapshots};
pub use session::TableSession;
pub use snapshot::{Row, Snapshot};
