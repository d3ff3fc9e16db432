// src/core/html.rs
//
// Tolerant hand-rolled HTML scanner that builds a core::dom tree. Not a
// spec-grade parser: case-insensitive tags, quoted/bare attributes in any
// order, void and self-closing elements, comments/doctype skipped, script
// and style contents dropped. Good enough for the saved pages and fixtures
// this tool operates on.

use crate::core::dom::{Document, ElementRef, is_void};
use crate::core::sanitize::normalize_entities;

pub fn parse_document(html: &str) -> Document {
    let root = ElementRef::new("#document");
    let mut stack: Vec<ElementRef> = vec![root.clone()];
    let mut i = 0usize;

    while i < html.len() {
        let rest = &html[i..];
        if rest.starts_with("<!--") {
            i += rest.find("-->").map(|p| p + 3).unwrap_or(rest.len());
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            i += rest.find('>').map(|p| p + 1).unwrap_or(rest.len());
        } else if rest.starts_with("</") {
            let end = rest.find('>').unwrap_or(rest.len());
            let name = rest[2..end].trim().to_ascii_lowercase();
            close_tag(&mut stack, &name);
            i += (end + 1).min(rest.len());
        } else if rest.starts_with('<') && rest.len() > 1 {
            let end = tag_end(rest);
            let inner = rest[1..end].trim_end();
            let (inner, self_closing) = match inner.strip_suffix('/') {
                Some(stripped) => (stripped, true),
                None => (inner, false),
            };
            let (name, attrs) = split_tag(inner);
            if name.is_empty() {
                i += (end + 1).min(rest.len());
                continue;
            }
            let el = ElementRef::new(&name);
            for (k, v) in attrs {
                el.set_attr(&k, &v);
            }
            if let Some(top) = stack.last() {
                top.append_child(&el);
            }
            i += (end + 1).min(rest.len());

            match name.as_str() {
                // raw-content elements: swallow everything to the close tag
                "script" | "style" => {
                    i += skip_to_close(&html[i..], &name);
                }
                "textarea" => {
                    let (raw, skipped) = raw_until_close(&html[i..], &name);
                    el.set_editable_value(&normalize_entities(raw.trim()));
                    i += skipped;
                }
                _ if self_closing || is_void(&name) => {}
                _ => stack.push(el),
            }
        } else {
            let next = rest[1..].find('<').map(|p| p + 1).unwrap_or(rest.len());
            let text = normalize_entities(&rest[..next]);
            if !text.trim().is_empty() {
                if let Some(top) = stack.last() {
                    let mut own = top.own_text();
                    if !own.is_empty() {
                        own.push(' ');
                    }
                    own.push_str(text.trim());
                    top.set_text(&own);
                }
            }
            i += next;
        }
    }

    Document::new(root)
}

/// Byte offset of the closing '>' of an open tag starting at `s[0] == '<'`,
/// ignoring '>' inside quoted attribute values.
fn tag_end(s: &str) -> usize {
    let mut quote: Option<char> = None;
    for (ix, ch) in s.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return ix,
            _ => {}
        }
    }
    // No closing '>': treat the rest as one unterminated tag. Returning the
    // full length keeps the slice on a char boundary even if the input is
    // truncated mid-character.
    s.len()
}

/// Split `tagname attr=val attr2="v 2"` into the lowercase name and pairs.
fn split_tag(inner: &str) -> (String, Vec<(String, String)>) {
    let inner = inner.trim();
    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    let mut attrs = Vec::new();

    let mut rest = inner[name_end..].trim_start();
    while !rest.is_empty() {
        let key_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let key = rest[..key_end].to_ascii_lowercase();
        rest = rest[key_end..].trim_start();
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (val, consumed) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(q).unwrap_or(body.len());
                    (&body[..close], close + 2)
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], end)
                }
            };
            if !key.is_empty() {
                attrs.push((key, normalize_entities(val)));
            }
            rest = after_eq[consumed.min(after_eq.len())..].trim_start();
        } else if !key.is_empty() {
            attrs.push((key, s!())); // bare boolean attribute
        } else {
            break;
        }
    }

    (name, attrs)
}

/// Bytes to skip to get past `</name>`, content discarded.
fn skip_to_close(s: &str, name: &str) -> usize {
    raw_until_close(s, name).1
}

/// Raw content up to `</name>` (case-insensitive) and bytes consumed
/// including the close tag.
fn raw_until_close<'a>(s: &'a str, name: &str) -> (&'a str, usize) {
    let close = format!("</{name}");
    let lower = s.to_ascii_lowercase();
    match lower.find(&close) {
        Some(p) => {
            let after = s[p..].find('>').map(|g| p + g + 1).unwrap_or(s.len());
            (&s[..p], after)
        }
        None => (s, s.len()),
    }
}

/// Pop the stack to just below the innermost matching open tag. Unmatched
/// close tags are ignored.
fn close_tag(stack: &mut Vec<ElementRef>, name: &str) {
    if let Some(pos) = stack
        .iter()
        .rposition(|el| el.tag() == name)
    {
        if pos > 0 {
            stack.truncate(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_structure() {
        let doc = parse_document(
            r#"<div id="feed"><a href="/x/">One</a><a href="/y/">Two</a></div>"#,
        );
        let feed = doc.by_id("feed").unwrap();
        let anchors = feed.find_all_tag("a");
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].attr("href").as_deref(), Some("/x/"));
        assert_eq!(anchors[1].text_content(), "Two");
    }

    #[test]
    fn input_value_attr_seeds_live_value() {
        let doc = parse_document(r#"<form><input id="o" value="SEA"></form>"#);
        let input = doc.by_id("o").unwrap();
        assert_eq!(input.value().as_deref(), Some("SEA"));
    }

    #[test]
    fn tolerates_unquoted_attrs_and_case() {
        let doc = parse_document("<DIV CLASS=listing DATA-N=3>hi</DIV>");
        let div = doc.root().first_child().unwrap();
        assert!(div.has_class("listing"));
        assert_eq!(div.attr("data-n").as_deref(), Some("3"));
        assert_eq!(div.text_content(), "hi");
    }

    #[test]
    fn script_contents_dropped() {
        let doc = parse_document("<div><script>let a = \"<span>\";</script>ok</div>");
        let div = doc.root().first_child().unwrap();
        assert!(div.find_all_tag("span").is_empty());
        assert_eq!(div.text_content(), "ok");
    }

    #[test]
    fn truncated_tag_with_multibyte_tail_does_not_panic() {
        // Input cut off mid-tag right after a multibyte character.
        let doc = parse_document("<div é");
        let div = doc.root().first_child().unwrap();
        assert_eq!(div.tag(), "div");

        // Same shape inside an unterminated quoted attribute.
        let doc = parse_document("<a title=\"café");
        let a = doc.root().first_child().unwrap();
        assert_eq!(a.attr("title").as_deref(), Some("café"));
    }

    #[test]
    fn entities_normalized_in_text() {
        let doc = parse_document("<p>fish &amp; chips&nbsp;&#8211; cheap</p>");
        let p = doc.root().first_child().unwrap();
        assert_eq!(p.text_content(), "fish & chips – cheap");
    }
}
