// tests/session_reload.rs
//
// Session wiring and the reload coordinator: trigger routing, merge
// behavior across reloads, edit shielding and serialization.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{feed_doc, SimGrid};

use pagegrid::adapters::listings::ListingsAdapter;
use pagegrid::adapters::{DataRow, PageEvent, PageEventKind, SiteAdapter};
use pagegrid::columns::ColumnSpec;
use pagegrid::core::dom::ElementRef;
use pagegrid::core::Document;
use pagegrid::engine::{ReloadState, TableSession};
use pagegrid::grid::{GridEvent, GridHandle};

fn feed_session() -> (Rc<Document>, TableSession<SimGrid>) {
    let doc = feed_doc();
    let adapter = ListingsAdapter::new(doc.clone());
    let session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();
    (doc, session)
}

fn add_listing(container: &ElementRef, slug: &str, name: &str) {
    let a = ElementRef::new("a");
    a.set_attr("href", &format!("/food-delivery/{slug}/zz"));
    let label = ElementRef::new("div");
    label.set_attr("class", "store-name");
    label.set_text(name);
    a.append_child(&label);
    container.append_child(&a);
}

#[test]
fn initial_load_fills_the_grid() {
    let (_doc, session) = feed_session();
    assert_eq!(session.grid().loads, 1);
    assert_eq!(session.grid().data.nrows(), 3);
    assert_eq!(session.grid().data.columns[0].field, "id");
    assert_eq!(
        session.grid().cell("tasty-thai-sf", "name").as_deref(),
        Some("Tasty Thai")
    );
}

#[test]
fn edits_resolve_through_the_visible_order() {
    let (doc, mut session) = feed_session();
    // Scripted sort: casa first. An edit at grid row 0 must hit casa-tacos.
    session
        .grid_mut()
        .set_view(&["casa-tacos", "tasty-thai-sf", "burger-barn"]);
    session.handle_grid_event(GridEvent::EditCommitted {
        row_index: 0,
        field: "name".to_string(),
        old_value: "Casa Tacos".to_string(),
        new_value: "Casa Nueva".to_string(),
    });

    let names: Vec<String> = doc
        .find_all_tag("a")
        .iter()
        .filter_map(|a| a.find_first_class("store-name"))
        .map(|el| el.text_content())
        .collect();
    assert!(names.contains(&"Casa Nueva".to_string()));
    assert!(!names.contains(&"Casa Tacos".to_string()));
}

#[test]
fn page_event_inside_container_triggers_reload() {
    let (doc, mut session) = feed_session();
    let container = doc.by_id("feed").unwrap();
    add_listing(&container, "pizza-prima", "Pizza Prima");

    session.on_page_event(&PageEvent {
        kind: PageEventKind::Click,
        target: container.children()[0].clone(),
    });

    assert_eq!(session.snapshot().len(), 4);
    assert_eq!(
        session.grid().cell("pizza-prima", "name").as_deref(),
        Some("Pizza Prima")
    );
}

#[test]
fn page_event_outside_container_is_ignored() {
    let (doc, mut session) = feed_session();
    add_listing(&doc.root(), "drive-by", "Drive By");

    let outside = ElementRef::new("button");
    doc.root().append_child(&outside);
    session.on_page_event(&PageEvent {
        kind: PageEventKind::Click,
        target: outside,
    });

    // No trigger matched, so the new row is not picked up yet.
    assert_eq!(session.snapshot().len(), 3);
    assert_eq!(session.grid().reloads, 0);
}

#[test]
fn removed_row_disappears_after_reload() {
    let (_doc, mut session) = feed_session();
    session.snapshot().get(1).unwrap().el.detach();

    session.reload();
    assert_eq!(session.snapshot().len(), 2);
    assert!(!session.index().contains("burger-barn"));
    assert_eq!(session.grid().visible_ids(), vec!["tasty-thai-sf", "casa-tacos"]);
}

#[test]
fn reload_merge_is_not_destructive() {
    let (_doc, mut session) = feed_session();
    // The rating element vanishes from the page, but its last seen value
    // must survive the merge.
    let row_el = session.index().get(session.snapshot(), "burger-barn").unwrap().el.clone();
    row_el.find_first_class("rating").unwrap().detach();

    session.reload();
    let row = session.index().get(session.snapshot(), "burger-barn").unwrap();
    assert_eq!(row.value("rating"), Some("4.2"));

    // And a second reload changes nothing further.
    session.reload();
    let row = session.index().get(session.snapshot(), "burger-barn").unwrap();
    assert_eq!(row.value("rating"), Some("4.2"));
}

#[test]
fn fresh_values_win_when_present() {
    let (_doc, mut session) = feed_session();
    let row_el = session.index().get(session.snapshot(), "casa-tacos").unwrap().el.clone();
    row_el.find_first_class("eta").unwrap().set_text("25-35 min");

    session.reload();
    let row = session.index().get(session.snapshot(), "casa-tacos").unwrap();
    assert_eq!(row.value("eta"), Some("25-35 min"));
}

#[test]
fn uncommitted_edit_outranks_the_page() {
    let (_doc, mut session) = feed_session();
    session.grid_mut().set_editing("tasty-thai-sf", "name");

    // The page changes under the open editor.
    let row_el = session.index().get(session.snapshot(), "tasty-thai-sf").unwrap().el.clone();
    row_el.find_first_class("store-name").unwrap().set_text("Renamed Remotely");

    session.reload();
    let row = session.index().get(session.snapshot(), "tasty-thai-sf").unwrap();
    assert_eq!(row.value("name"), Some("Tasty Thai"));

    // Editor closed: the next reload takes the page's value.
    session.grid_mut().editing = None;
    session.reload();
    let row = session.index().get(session.snapshot(), "tasty-thai-sf").unwrap();
    assert_eq!(row.value("name"), Some("Renamed Remotely"));
}

/* ------------- serialization of concurrent triggers ------------- */

/// Adapter that simulates a trigger landing while the first reload pass is
/// still reading the page.
struct ChattyAdapter {
    inner: ListingsAdapter,
    calls: Rc<Cell<usize>>,
    state: Rc<RefCell<Option<Rc<ReloadState>>>>,
}

impl SiteAdapter for ChattyAdapter {
    fn name(&self) -> &str {
        "Chatty"
    }
    fn is_active(&self, url: &str) -> bool {
        self.inner.is_active(url)
    }
    fn column_specs(&self) -> Vec<ColumnSpec> {
        self.inner.column_specs()
    }
    fn data_rows(&self) -> Result<Vec<DataRow>, Box<dyn std::error::Error>> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n == 2 {
            // Mid-flight trigger: must coalesce into exactly one rerun.
            if let Some(state) = self.state.borrow().as_ref() {
                assert!(!state.begin());
                assert!(!state.begin());
            }
        }
        self.inner.data_rows()
    }
}

#[test]
fn reentrant_triggers_coalesce_into_one_rerun() {
    let doc = feed_doc();
    let calls = Rc::new(Cell::new(0));
    let state_slot = Rc::new(RefCell::new(None));
    let adapter = ChattyAdapter {
        inner: ListingsAdapter::new(doc),
        calls: calls.clone(),
        state: state_slot.clone(),
    };

    let mut session = TableSession::new(Box::new(adapter), SimGrid::new()).unwrap();
    *state_slot.borrow_mut() = Some(session.reload_state());
    assert_eq!(calls.get(), 1); // initial extraction

    session.reload();
    // Pass two saw the trigger, pass three served it; two begin() calls
    // while in flight still mean only one rerun.
    assert_eq!(calls.get(), 3);
    assert!(!session.reload_state().in_flight());

    session.reload();
    assert_eq!(calls.get(), 4);
}

#[test]
fn grid_view_state_survives_reload() {
    let (doc, mut session) = feed_session();
    session
        .grid_mut()
        .set_view(&["casa-tacos", "burger-barn", "tasty-thai-sf"]);

    let container = doc.by_id("feed").unwrap();
    add_listing(&container, "green-bowl", "Green Bowl");
    session.reload();

    // Scripted order kept, newcomer appended.
    assert_eq!(
        session.grid().visible_ids(),
        vec!["casa-tacos", "burger-barn", "tasty-thai-sf", "green-bowl"]
    );
}
