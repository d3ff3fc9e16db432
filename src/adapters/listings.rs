// src/adapters/listings.rs
//
// Multi-row adapter for a restaurant listing feed. Every listing is an
// anchor whose href contains "/food-delivery/"; anchors without that
// pattern (nav links, banners) are not rows. The row id is the listing's
// URL slug — stable across feed reorders and refreshes, which is exactly
// what the identity index needs. Positional ids would silently shuffle
// data the moment the site re-sorts its feed.
//
// Expected row shape:
//   <a href="/food-delivery/tasty-thai-sf/8f2c">
//     <div class="store-name">Tasty Thai</div>
//     <div class="eta">20-30 min</div>
//     <div class="rating">4.7</div>
//   </a>
//
// An optional delivery-fee column can be attached via `with_fee_lookup`;
// it is a best-effort side lookup keyed by slug and degrades to
// "Unavailable" when the lookup fails or times out.

use std::rc::Rc;
use std::time::Duration;

use crate::adapters::{DataRow, SiteAdapter};
use crate::columns::{ColumnSpec, ValueKind};
use crate::core::{net, Document, ElementRef};

const LINK_PATTERN: &str = "/food-delivery/";

pub type FeeLookup = Rc<dyn Fn(&str) -> Result<String, Box<dyn std::error::Error>>>;

pub struct ListingsAdapter {
    doc: Rc<Document>,
    fee_lookup: Option<FeeLookup>,
}

impl ListingsAdapter {
    pub fn new(doc: Rc<Document>) -> Self {
        ListingsAdapter { doc, fee_lookup: None }
    }

    /// Attach a delivery-fee enrichment lookup (slug -> fee).
    pub fn with_fee_lookup(
        mut self,
        lookup: impl Fn(&str) -> Result<String, Box<dyn std::error::Error>> + 'static,
    ) -> Self {
        self.fee_lookup = Some(Rc::new(lookup));
        self
    }

    /// Fee enrichment backed by a plain HTTP fee service exposing
    /// `GET /fees/<slug>`. Timeouts and non-200s degrade per column policy.
    pub fn with_fee_service(self, host: &str, port: u16) -> Self {
        let host = s!(host);
        self.with_fee_lookup(move |slug| {
            let body = net::http_get_timeout(
                &host,
                port,
                &format!("/fees/{slug}"),
                Duration::from_secs(3),
            )?;
            Ok(s!(body.trim()))
        })
    }
}

/// "/food-delivery/tasty-thai-sf/8f2c" -> "tasty-thai-sf"
/// (second-to-last path segment; the last one is a per-request token).
fn slug_from_href(href: &str) -> Option<String> {
    let parts: Vec<&str> = href.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return None;
    }
    Some(s!(parts[parts.len() - 2]))
}

fn child_class(class: &'static str) -> impl Fn(&ElementRef) -> Option<ElementRef> {
    move |row| row.find_first_class(class)
}

impl SiteAdapter for ListingsAdapter {
    fn name(&self) -> &str {
        "Restaurant Listings"
    }

    fn is_active(&self, url: &str) -> bool {
        url.contains("eats")
    }

    fn column_specs(&self) -> Vec<ColumnSpec> {
        let mut specs = vec![
            ColumnSpec::element("name", ValueKind::Text, child_class("store-name")),
            ColumnSpec::element("eta", ValueKind::Text, child_class("eta")).read_only(),
            ColumnSpec::element("rating", ValueKind::Numeric, child_class("rating")).read_only(),
        ];
        if let Some(lookup) = &self.fee_lookup {
            let lookup = lookup.clone();
            specs.push(ColumnSpec::lookup("fee", ValueKind::Numeric, move |row| {
                let href = row.attr("href").ok_or("listing row has no href")?;
                let slug = slug_from_href(&href).ok_or("listing href has no slug")?;
                lookup(&slug)
            }));
        }
        specs
    }

    fn data_rows(&self) -> Result<Vec<DataRow>, Box<dyn std::error::Error>> {
        let mut rows = Vec::new();
        for anchor in self.doc.find_all_tag("a") {
            let Some(href) = anchor.attr("href") else { continue };
            if !href.contains(LINK_PATTERN) {
                continue;
            }
            let Some(slug) = slug_from_href(&href) else {
                logd!("listings: href '{href}' has no usable slug, skipped");
                continue;
            };
            rows.push(DataRow::new(slug, anchor));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse_document;

    fn feed() -> &'static str {
        r#"
        <div id="feed">
          <a href="/about">About us</a>
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
        </div>"#
    }

    #[test]
    fn only_listing_anchors_become_rows() {
        let doc = Rc::new(parse_document(feed()));
        let adapter = ListingsAdapter::new(doc);
        let rows = adapter.data_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "tasty-thai-sf");
        assert_eq!(rows[1].id, "burger-barn");
    }

    #[test]
    fn slug_is_second_to_last_segment() {
        assert_eq!(
            slug_from_href("/food-delivery/tasty-thai-sf/8f2c").as_deref(),
            Some("tasty-thai-sf")
        );
        assert_eq!(slug_from_href("/about").as_deref(), None);
    }

    #[test]
    fn fee_lookup_column_is_appended() {
        let doc = Rc::new(parse_document(feed()));
        let adapter = ListingsAdapter::new(doc).with_fee_lookup(|slug| Ok(format!("fee:{slug}")));
        let specs = adapter.column_specs();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[3].field, "fee");
        assert!(specs[3].read_only);
    }

    #[test]
    fn fee_service_fetches_per_slug() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            for _ in 0..2 {
                if let Ok((mut sock, _)) = listener.accept() {
                    let mut req = [0u8; 512];
                    let n = sock.read(&mut req).unwrap_or(0);
                    let req = String::from_utf8_lossy(&req[..n]);
                    let body = if req.contains("/fees/tasty-thai-sf") { "1.99" } else { "3.49" };
                    let _ = sock.write_all(
                        format!("HTTP/1.0 200 OK\r\n\r\n{body}\n").as_bytes(),
                    );
                }
            }
        });

        let doc = Rc::new(parse_document(feed()));
        let adapter = ListingsAdapter::new(doc).with_fee_service("127.0.0.1", port);
        let specs = adapter.column_specs();
        let rows = adapter.data_rows().unwrap();
        let snap = crate::engine::extract(&rows, &specs);
        assert_eq!(snap.get(0).unwrap().value("fee"), Some("1.99"));
        assert_eq!(snap.get(1).unwrap().value("fee"), Some("3.49"));
    }
}
