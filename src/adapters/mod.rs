// src/adapters/mod.rs
//! Site adapters: the page-specific half of the system. An adapter knows
//! where the rows live in one particular page layout, what columns they
//! carry, and which page events mean "the data may have changed". The sync
//! engine consumes adapters purely through [`SiteAdapter`] and never touches
//! the document on its own — every page query is isolated in here.
//!
//! Contract points worth stating once:
//! - Row ids must be stable and content-derived (a slug, an href, a fixed
//!   marker), never an array position. Reorders and filters assume it.
//! - `column_specs()` may be called more than once and must return an
//!   equivalent set each time; the engine treats the set as immutable for
//!   the session.
//! - Adapters are validated at registration time ([`validate`]), not
//!   discovered to be malformed at call time.

use std::rc::Rc;

use crate::columns::{ColumnSpec, ID_FIELD};
use crate::core::{Document, ElementRef};

pub mod booking;
pub mod listings;

/// One discovered row: a stable id plus the element backing it.
#[derive(Clone, Debug)]
pub struct DataRow {
    pub id: String,
    pub el: ElementRef,
}

impl DataRow {
    pub fn new(id: impl Into<String>, el: ElementRef) -> Self {
        DataRow { id: id.into(), el }
    }
}

/// Page-level event kinds that can trigger a data reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEventKind {
    Input,
    Click,
    Change,
    KeyUp,
}

#[derive(Clone, Debug)]
pub struct PageEvent {
    pub kind: PageEventKind,
    pub target: ElementRef,
}

/// Registered reload-trigger predicates. The engine installs a default set
/// (input/click/change/keyup within the row container); adapters add their
/// own document-level ones here.
#[derive(Default)]
pub struct ReloadTriggers {
    preds: Vec<Box<dyn Fn(&PageEvent) -> bool>>,
}

impl ReloadTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pred: impl Fn(&PageEvent) -> bool + 'static) {
        self.preds.push(Box::new(pred));
    }

    pub fn matches(&self, ev: &PageEvent) -> bool {
        self.preds.iter().any(|p| p(ev))
    }

    pub fn len(&self) -> usize {
        self.preds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preds.is_empty()
    }
}

pub trait SiteAdapter {
    /// User-visible adapter name.
    fn name(&self) -> &str;

    /// Does this adapter apply to the given location? Substring matching is
    /// the convention; anything fancier stays inside the adapter.
    fn is_active(&self, url: &str) -> bool;

    /// The column schema for this site.
    fn column_specs(&self) -> Vec<ColumnSpec>;

    /// Discover the current row elements with their stable ids.
    fn data_rows(&self) -> Result<Vec<DataRow>, Box<dyn std::error::Error>>;

    /// Element holding the row elements. Defaults to the parent of the
    /// first discovered row.
    fn row_container(&self) -> Option<ElementRef> {
        None
    }

    /// Install site-specific reload triggers (e.g. a calendar-widget click
    /// anywhere in the document).
    fn register_reload_triggers(&self, _triggers: &mut ReloadTriggers) {}
}

/// Check the adapter contract up front: a non-empty column set, unique
/// field names, and the reserved id field left alone.
pub fn validate(adapter: &dyn SiteAdapter) -> Result<(), Box<dyn std::error::Error>> {
    let specs = adapter.column_specs();
    if specs.is_empty() {
        return Err(format!("adapter '{}': no columns declared", adapter.name()).into());
    }
    for (i, spec) in specs.iter().enumerate() {
        if spec.field == ID_FIELD {
            return Err(format!(
                "adapter '{}': field name '{ID_FIELD}' is reserved",
                adapter.name()
            )
            .into());
        }
        if specs[..i].iter().any(|other| other.field == spec.field) {
            return Err(format!(
                "adapter '{}': duplicate field name '{}'",
                adapter.name(),
                spec.field
            )
            .into());
        }
    }
    Ok(())
}

/// All adapters this build knows about, bound to a document.
pub fn known_adapters(doc: &Rc<Document>) -> Vec<Box<dyn SiteAdapter>> {
    vec![
        Box::new(booking::BookingAdapter::new(doc.clone())),
        Box::new(listings::ListingsAdapter::new(doc.clone())),
    ]
}

/// Pick the first registered adapter that claims the location and passes
/// contract validation.
pub fn activate(doc: &Rc<Document>, url: &str) -> Option<Box<dyn SiteAdapter>> {
    for adapter in known_adapters(doc) {
        if !adapter.is_active(url) {
            continue;
        }
        match validate(adapter.as_ref()) {
            Ok(()) => {
                logf!("adapter '{}' activated for {url}", adapter.name());
                return Some(adapter);
            }
            Err(e) => loge!("adapter rejected: {e}"),
        }
    }
    logd!("no adapter matched {url}");
    None
}
