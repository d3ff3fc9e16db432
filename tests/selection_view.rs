// tests/selection_view.rs
//
// Selection highlighting: row policy for list-style pages, field policy
// for single-row form pages, and the booking scenario end to end.

mod common;

use common::{feed_doc, trip_doc, SimGrid};

use pagegrid::adapters::booking::BookingAdapter;
use pagegrid::adapters::listings::ListingsAdapter;
use pagegrid::adapters::{PageEvent, PageEventKind};
use pagegrid::engine::highlight::HIGHLIGHT_COLOR;
use pagegrid::engine::TableSession;
use pagegrid::grid::{GridEvent, GridHandle};

fn select(session: &mut TableSession<SimGrid>, row_index: usize, field: &str) {
    session.handle_grid_event(GridEvent::SelectionChanged {
        row_index,
        field: field.to_string(),
    });
}

#[test]
fn multi_row_selection_outlines_the_row() {
    let doc = feed_doc();
    let adapter = ListingsAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();

    select(&mut session, 1, "name");
    let row_el = session
        .index()
        .get(session.snapshot(), "burger-barn")
        .unwrap()
        .el
        .clone();
    assert_eq!(
        row_el.style("border").as_deref(),
        Some(format!("solid 2px {HIGHLIGHT_COLOR}").as_str())
    );
    // The field element itself is untinted under the row policy.
    assert_eq!(row_el.find_first_class("store-name").unwrap().style("background-color"), None);
    // Scrolled into view.
    assert_eq!(doc.take_scroll_target(), Some(row_el.clone()));

    // Moving the selection moves the outline.
    select(&mut session, 0, "name");
    assert_eq!(row_el.style("border"), None);
    let first = session
        .index()
        .get(session.snapshot(), "tasty-thai-sf")
        .unwrap();
    assert!(first.el.style("border").is_some());
}

#[test]
fn selection_follows_the_sorted_view() {
    let doc = feed_doc();
    let adapter = ListingsAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();
    session
        .grid_mut()
        .set_view(&["casa-tacos", "burger-barn", "tasty-thai-sf"]);

    // Grid row 0 is now casa-tacos, not the page's first anchor.
    select(&mut session, 0, "name");
    let casa = session.index().get(session.snapshot(), "casa-tacos").unwrap();
    assert!(casa.el.style("border").is_some());
    let tasty = session.index().get(session.snapshot(), "tasty-thai-sf").unwrap();
    assert_eq!(tasty.el.style("border"), None);
}

#[test]
fn vanished_selection_is_a_no_op() {
    let doc = feed_doc();
    let adapter = ListingsAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();
    session.grid_mut().set_view(&["ghost-kitchen"]);

    select(&mut session, 0, "name");
    for row in &session.snapshot().rows {
        assert_eq!(row.el.style("border"), None);
    }
    assert!(doc.take_scroll_target().is_none());
}

#[test]
fn clear_highlights_removes_all_styling() {
    let doc = feed_doc();
    let adapter = ListingsAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();

    select(&mut session, 2, "name");
    session.clear_highlights();
    for row in &session.snapshot().rows {
        assert_eq!(row.el.style("border"), None);
    }
}

/* ---------------- booking: the single-row form page ---------------- */

#[test]
fn single_row_selection_tints_the_field() {
    let doc = trip_doc();
    let adapter = BookingAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();
    assert_eq!(session.snapshot().len(), 1);
    assert_eq!(session.grid().visible_ids(), vec!["1"]);

    select(&mut session, 0, "departDate");
    let depart = doc.by_id("trip-depart").unwrap();
    assert_eq!(depart.style("background-color").as_deref(), Some(HIGHLIGHT_COLOR));
    // Field policy: no row outline on the form.
    assert_eq!(doc.by_id("trip-search").unwrap().style("border"), None);
    assert_eq!(doc.take_scroll_target(), Some(depart.clone()));

    // Selecting another field moves the tint.
    select(&mut session, 0, "origin");
    assert_eq!(depart.style("background-color"), None);
    assert_eq!(
        doc.by_id("trip-origin").unwrap().style("background-color").as_deref(),
        Some(HIGHLIGHT_COLOR)
    );
}

#[test]
fn booking_edit_lands_in_the_form_value() {
    let doc = trip_doc();
    let adapter = BookingAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();

    session.handle_grid_event(GridEvent::EditCommitted {
        row_index: 0,
        field: "departDate".to_string(),
        old_value: "2026-09-01".to_string(),
        new_value: "2026-09-03".to_string(),
    });
    assert_eq!(
        doc.by_id("trip-depart").unwrap().value().as_deref(),
        Some("2026-09-03")
    );

    // Read-only origin stays put.
    session.handle_grid_event(GridEvent::EditCommitted {
        row_index: 0,
        field: "origin".to_string(),
        old_value: "SFO".to_string(),
        new_value: "OAK".to_string(),
    });
    assert_eq!(doc.by_id("trip-origin").unwrap().value().as_deref(), Some("SFO"));
}

#[test]
fn calendar_click_triggers_a_booking_reload() {
    let doc = trip_doc();
    let adapter = BookingAdapter::new(doc.clone());
    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();

    // The user picks a date in the calendar widget; the widget rewrites the
    // form value out-of-band, then the click trigger refreshes the table.
    doc.by_id("trip-depart").unwrap().set_editable_value("2026-09-12");
    let day = doc.root().find_all_class("datepicker-cal-date")[0].clone();
    session.on_page_event(&PageEvent { kind: PageEventKind::Click, target: day });

    assert_eq!(
        session.grid().cell("1", "departDate").as_deref(),
        Some("2026-09-12")
    );
}
