// tests/common/mod.rs
//
// Shared test scaffolding: a scriptable GridHandle and page fixtures.
// Each test binary uses a different slice of this, hence the allow.
#![allow(dead_code)]

use std::rc::Rc;

use pagegrid::core::html::parse_document;
use pagegrid::core::Document;
use pagegrid::grid::{GridHandle, TableData};

/// A grid stand-in whose view state the test scripts directly: `set_view`
/// plays the role of the widget's own sort/filter outcome, `set_editing`
/// the role of an open cell editor.
#[derive(Default)]
pub struct SimGrid {
    pub data: TableData,
    pub view: Vec<String>,
    pub editing: Option<(String, String)>,
    pub loads: usize,
    pub reloads: usize,
}

impl SimGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a visible order, as if the user had sorted or filtered.
    pub fn set_view(&mut self, ids: &[&str]) {
        self.view = ids.iter().map(|s| s.to_string()).collect();
    }

    pub fn set_editing(&mut self, id: &str, field: &str) {
        self.editing = Some((id.to_string(), field.to_string()));
    }

    /// Cell text looked up by row id and field name.
    pub fn cell(&self, id: &str, field: &str) -> Option<String> {
        let ci = self.data.col_index(field)?;
        self.data
            .rows
            .iter()
            .find(|r| r[0] == id)
            .and_then(|r| r.get(ci).cloned())
    }
}

impl GridHandle for SimGrid {
    fn load(&mut self, data: TableData) {
        self.view = data.rows.iter().map(|r| r[0].clone()).collect();
        self.data = data;
        self.loads += 1;
    }

    fn reload_rows(&mut self, rows: Vec<Vec<String>>) {
        self.data.rows = rows;
        // Keep the scripted order for surviving rows, append newcomers.
        let mut view: Vec<String> = self
            .view
            .iter()
            .filter(|id| self.data.rows.iter().any(|r| &r[0] == *id))
            .cloned()
            .collect();
        for r in &self.data.rows {
            if !view.contains(&r[0]) {
                view.push(r[0].clone());
            }
        }
        self.view = view;
        self.reloads += 1;
    }

    fn visible_ids(&self) -> Vec<String> {
        self.view.clone()
    }

    fn id_at(&self, row_index: usize) -> Option<String> {
        self.view.get(row_index).cloned()
    }

    fn editing_cell(&self) -> Option<(String, String)> {
        self.editing.clone()
    }
}

pub const FEED_PAGE: &str = r#"
<html><body>
  <h1>Order tonight</h1>
  <a href="/about">About us</a>
  <div id="feed">
    <a href="/food-delivery/tasty-thai-sf/8f2c">
      <div class="store-name">Tasty Thai</div>
      <div class="eta">20-30 min</div>
      <div class="rating">4.7</div>
    </a>
    <a href="/food-delivery/burger-barn/91aa">
      <div class="store-name">Burger Barn</div>
      <div class="eta">15-25 min</div>
      <div class="rating">4.2</div>
    </a>
    <a href="/food-delivery/casa-tacos/77b0">
      <div class="store-name">Casa Tacos</div>
      <div class="eta">10-20 min</div>
      <div class="rating">4.9</div>
    </a>
  </div>
</body></html>"#;

pub const TRIP_PAGE: &str = r#"
<html><body>
  <form id="trip-search">
    <input id="trip-origin" value="SFO" readonly>
    <input id="trip-destination" value="JFK" readonly>
    <input id="trip-depart" value="2026-09-01">
    <input id="trip-return" value="2026-09-08">
  </form>
  <div id="calendar">
    <button class="datepicker-cal-date">1</button>
    <button class="datepicker-cal-date">2</button>
  </div>
</body></html>"#;

pub fn feed_doc() -> Rc<Document> {
    Rc::new(parse_document(FEED_PAGE))
}

pub fn trip_doc() -> Rc<Document> {
    Rc::new(parse_document(TRIP_PAGE))
}
