// src/adapters/booking.rs
//
// Single-row adapter for a travel-search form page. The whole search form
// is one row; each form field is one column. Origin and destination are
// deliberately read-only (the site rejects programmatic writes to them);
// the two date fields take write-back from the grid.
//
// Expected page shape:
//   <form id="trip-search">
//     <input id="trip-origin">  <input id="trip-destination">
//     <input id="trip-depart">  <input id="trip-return">
//   </form>
// plus an optional calendar widget whose day buttons carry the class
// "datepicker-cal-date"; clicking one anywhere in the document is a reload
// trigger, since the calendar fills the date inputs without any event on
// the form itself.

use std::rc::Rc;

use crate::adapters::{DataRow, PageEventKind, ReloadTriggers, SiteAdapter};
use crate::columns::{ColumnSpec, ValueKind};
use crate::core::{Document, ElementRef};

const FORM_ID: &str = "trip-search";
const CALENDAR_DAY_CLASS: &str = "datepicker-cal-date";

pub struct BookingAdapter {
    doc: Rc<Document>,
}

impl BookingAdapter {
    pub fn new(doc: Rc<Document>) -> Self {
        BookingAdapter { doc }
    }
}

fn field(id: &'static str) -> impl Fn(&ElementRef) -> Option<ElementRef> {
    move |row| row.find_by_id(id)
}

impl SiteAdapter for BookingAdapter {
    fn name(&self) -> &str {
        "Travel Search"
    }

    fn is_active(&self, url: &str) -> bool {
        url.contains("travel")
    }

    fn column_specs(&self) -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::element("origin", ValueKind::Text, field("trip-origin")).read_only(),
            ColumnSpec::element("destination", ValueKind::Text, field("trip-destination"))
                .read_only(),
            ColumnSpec::element("departDate", ValueKind::Date, field("trip-depart")),
            ColumnSpec::element("returnDate", ValueKind::Date, field("trip-return")),
        ]
    }

    fn data_rows(&self) -> Result<Vec<DataRow>, Box<dyn std::error::Error>> {
        let form = self
            .doc
            .by_id(FORM_ID)
            .ok_or(format!("booking: form #{FORM_ID} not found"))?;
        // Only one row, so a hardcoded id is fine.
        Ok(vec![DataRow::new("1", form)])
    }

    fn register_reload_triggers(&self, triggers: &mut ReloadTriggers) {
        // Calendar day clicks land outside the form.
        triggers.add(|ev| {
            ev.kind == PageEventKind::Click && ev.target.has_class(CALENDAR_DAY_CLASS)
        });
    }
}
