// src/columns.rs
//
// Static description of one grid column: where its value comes from in the
// page, whether the sync engine may ever write it back, and how the grid
// should treat it. One spec per displayed field; the set is fixed for the
// lifetime of a table session.

use std::fmt;

use crate::core::ElementRef;

/// Reserved field name for the hidden row-id column the engine prepends.
pub const ID_FIELD: &str = "id";

/// Fallback value when a lookup-backed field cannot be resolved.
pub const UNAVAILABLE: &str = "Unavailable";

pub type Accessor = Box<dyn Fn(&ElementRef) -> Option<ElementRef>>;
pub type Lookup = Box<dyn Fn(&ElementRef) -> Result<String, Box<dyn std::error::Error>>>;

/// Where a column's value comes from.
pub enum Source {
    /// Resolve a field element inside the row element; value-or-text.
    Element(Accessor),
    /// Same value for every row.
    Fixed(String),
    /// Best-effort side lookup (e.g. network-backed enrichment). Errors and
    /// timeouts degrade to [`UNAVAILABLE`].
    Lookup(Lookup),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Numeric,
    Date,
    Html,
}

pub struct ColumnSpec {
    pub field: String,
    pub source: Source,
    pub read_only: bool,
    pub kind: ValueKind,
    pub hidden: bool,
}

impl ColumnSpec {
    pub fn element(
        field: &str,
        kind: ValueKind,
        accessor: impl Fn(&ElementRef) -> Option<ElementRef> + 'static,
    ) -> Self {
        ColumnSpec {
            field: s!(field),
            source: Source::Element(Box::new(accessor)),
            read_only: false,
            kind,
            hidden: false,
        }
    }

    pub fn fixed(field: &str, kind: ValueKind, value: &str) -> Self {
        ColumnSpec {
            field: s!(field),
            source: Source::Fixed(s!(value)),
            read_only: true,
            kind,
            hidden: false,
        }
    }

    pub fn lookup(
        field: &str,
        kind: ValueKind,
        lookup: impl Fn(&ElementRef) -> Result<String, Box<dyn std::error::Error>> + 'static,
    ) -> Self {
        ColumnSpec {
            field: s!(field),
            source: Source::Lookup(Box::new(lookup)),
            read_only: true,
            kind,
            hidden: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Resolve the live field element for a row, if this column has one.
    pub fn resolve(&self, row_el: &ElementRef) -> Option<ElementRef> {
        match &self.source {
            Source::Element(accessor) => accessor(row_el),
            _ => None,
        }
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Element(_) => "element",
            Source::Fixed(_) => "fixed",
            Source::Lookup(_) => "lookup",
        };
        f.debug_struct("ColumnSpec")
            .field("field", &self.field)
            .field("source", &source)
            .field("read_only", &self.read_only)
            .field("kind", &self.kind)
            .field("hidden", &self.hidden)
            .finish()
    }
}
