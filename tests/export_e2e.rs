// tests/export_e2e.rs
use std::fs;
use std::path::PathBuf;

mod common;

use common::{feed_doc, SimGrid};

use pagegrid::adapters::listings::ListingsAdapter;
use pagegrid::config::options::{ExportFormat, ExportOptions};
use pagegrid::engine::TableSession;
use pagegrid::export;
use pagegrid::grid::GridEvent;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("pagegrid_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn table_exports_and_parses_back() {
    let doc = feed_doc();
    let session = TableSession::new(
        Box::new(ListingsAdapter::new(doc)),
        SimGrid::new(),
    )
    .unwrap();

    let data = &session.grid().data;
    let headers = Some(data.columns.iter().map(|c| c.field.clone()).collect());

    let mut path = tmp_dir("roundtrip");
    path.push("feed.csv");
    export::write_export(&path, &headers, &data.rows, true, ',').unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let parsed = export::parse_rows(&text, ',');
    assert_eq!(parsed.len(), 4); // header + 3 rows
    assert_eq!(parsed[0][0], "id");
    assert_eq!(parsed[1], vec!["tasty-thai-sf", "Tasty Thai", "20-30 min", "4.7"]);
}

#[test]
fn tsv_uses_tab_and_default_extension() {
    let opts = ExportOptions {
        format: ExportFormat::Tsv,
        out: None,
        include_headers: false,
    };
    assert_eq!(opts.out_path(), PathBuf::from("table.tsv"));

    let rows = vec![vec!["a\tb".to_string(), "c".to_string()]];
    let text = export::to_export_string(&None, &rows, false, opts.format.delim());
    // Embedded tab forces quoting.
    assert_eq!(text, "\"a\tb\"\tc\n");
}

#[test]
fn edited_page_serializes_with_the_new_value() {
    let doc = feed_doc();
    let mut session = TableSession::new(
        Box::new(ListingsAdapter::new(doc.clone())),
        SimGrid::new(),
    )
    .unwrap();

    session.handle_grid_event(GridEvent::EditCommitted {
        row_index: 0,
        field: "name".to_string(),
        old_value: "Tasty Thai".to_string(),
        new_value: "Thai Palace".to_string(),
    });

    let html = doc.to_html();
    assert!(html.contains("Thai Palace"));
    assert!(!html.contains("Tasty Thai"));

    let mut path = tmp_dir("writeback");
    path.push("feed.html");
    fs::write(&path, &html).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("Thai Palace"));
}
