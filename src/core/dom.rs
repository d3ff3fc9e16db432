// src/core/dom.rs
//
// Minimal live DOM for offline pages. The page owns its nodes; everything
// else in the crate holds cheap ElementRef handles and must tolerate a node
// being detached between extraction passes (stale references are a normal
// condition, not a fault).
//
// Single-threaded by design: handles are Rc-based and all mutation happens
// on the UI/event thread, so there is no locking here.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Tags whose "value" is a live form value rather than text content.
const FORM_TAGS: [&str; 4] = ["input", "textarea", "select", "button"];

struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Direct text of this node (children hold their own).
    text: String,
    /// Live form value. Present only for form controls.
    value: Option<String>,
    /// Inline styles set at runtime (highlighting).
    styles: Vec<(String, String)>,
    children: Vec<ElementRef>,
    parent: Weak<RefCell<NodeData>>,
    /// Set on the document root only.
    root: bool,
    /// Last scroll-into-view target, recorded on the root.
    scroll_target: Option<Weak<RefCell<NodeData>>>,
}

/// Shared handle to one live node.
#[derive(Clone)]
pub struct ElementRef(Rc<RefCell<NodeData>>);

impl ElementRef {
    pub fn new(tag: &str) -> Self {
        ElementRef(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            text: s!(),
            value: None,
            styles: Vec::new(),
            children: Vec::new(),
            parent: Weak::new(),
            root: false,
            scroll_target: None,
        })))
    }

    /// Same underlying node?
    pub fn same(&self, other: &ElementRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Node address, usable as a stable per-node widget id.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /* ---------------- attributes ---------------- */

    pub fn attr(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.0.borrow().attrs.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let mut n = self.0.borrow_mut();
        if let Some(slot) = n.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = s!(value);
        } else {
            n.attrs.push((name, s!(value)));
        }
        // Keep form controls live: the value attribute seeds the live value.
        if n.value.is_none() && FORM_TAGS.contains(&n.tag.as_str()) {
            let seed = n
                .attrs
                .iter()
                .find(|(k, _)| k == "value")
                .map(|(_, v)| v.clone());
            n.value = seed;
        }
    }

    pub fn dom_id(&self) -> Option<String> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|p| p == class))
            .unwrap_or(false)
    }

    /* ---------------- text & value ---------------- */

    pub fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = s!(text);
    }

    pub fn own_text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// Text of this node and all descendants, whitespace-joined.
    pub fn text_content(&self) -> String {
        let mut out = s!();
        collect_text(self, &mut out);
        crate::core::sanitize::normalize_ws(&out)
    }

    /// Live form value, if this node carries one.
    pub fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    /// What a cell shows for this node: form value if present, else text.
    pub fn display_value(&self) -> String {
        self.value().unwrap_or_else(|| self.text_content())
    }

    /// Write an editable value into the node. Form controls get their live
    /// value replaced; anything else (e.g. an html-typed content region)
    /// gets its direct text replaced.
    pub fn set_editable_value(&self, value: &str) {
        let mut n = self.0.borrow_mut();
        if n.value.is_some() || FORM_TAGS.contains(&n.tag.as_str()) {
            n.value = Some(s!(value));
        } else {
            n.text = s!(value);
            n.children.clear();
        }
    }

    /* ---------------- tree ---------------- */

    pub fn children(&self) -> Vec<ElementRef> {
        self.0.borrow().children.clone()
    }

    pub fn first_child(&self) -> Option<ElementRef> {
        self.0.borrow().children.first().cloned()
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.0.borrow().parent.upgrade().map(ElementRef)
    }

    /// Append `child`, re-parenting it if attached elsewhere. A node can
    /// only ever live under one parent; this is what makes reattachment
    /// duplication-free.
    pub fn append_child(&self, child: &ElementRef) {
        if self.same(child) {
            return;
        }
        child.detach();
        self.0.borrow_mut().children.push(child.clone());
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }

    /// Remove this node from its parent. The node itself stays alive and
    /// can be re-appended later.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|c| !c.same(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    /// Detach every child, keeping them alive for re-attachment.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for c in &children {
            c.0.borrow_mut().parent = Weak::new();
        }
    }

    /// Is `other` an ancestor of this node (or the node itself)?
    pub fn is_within(&self, other: &ElementRef) -> bool {
        let mut cur = self.clone();
        loop {
            if cur.same(other) {
                return true;
            }
            match cur.parent() {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// Still reachable from the document root?
    pub fn is_connected(&self) -> bool {
        let mut cur = self.clone();
        loop {
            if cur.0.borrow().root {
                return true;
            }
            match cur.parent() {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /* ---------------- search ---------------- */

    /// All descendants, pre-order, excluding self.
    pub fn descendants(&self) -> Vec<ElementRef> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<ElementRef> {
        self.descendants().into_iter()
            .find(|e| e.dom_id().as_deref() == Some(id))
    }

    pub fn find_all_tag(&self, tag: &str) -> Vec<ElementRef> {
        let tag = tag.to_ascii_lowercase();
        self.descendants().into_iter()
            .filter(|e| e.0.borrow().tag == tag)
            .collect()
    }

    pub fn find_first_class(&self, class: &str) -> Option<ElementRef> {
        self.descendants().into_iter().find(|e| e.has_class(class))
    }

    pub fn find_all_class(&self, class: &str) -> Vec<ElementRef> {
        self.descendants().into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /* ---------------- presentation ---------------- */

    pub fn set_style(&self, key: &str, value: &str) {
        let mut n = self.0.borrow_mut();
        if let Some(slot) = n.styles.iter_mut().find(|(k, _)| k == key) {
            slot.1 = s!(value);
        } else {
            n.styles.push((s!(key), s!(value)));
        }
    }

    pub fn clear_style(&self, key: &str) {
        self.0.borrow_mut().styles.retain(|(k, _)| k != key);
    }

    pub fn style(&self, key: &str) -> Option<String> {
        self.0.borrow().styles.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Record this node as the page's scroll target (on the document root).
    /// The GUI page view consumes it; headless callers can just assert it.
    pub fn scroll_into_view(&self) {
        let mut cur = self.clone();
        loop {
            let is_root = cur.0.borrow().root;
            if is_root {
                cur.0.borrow_mut().scroll_target = Some(Rc::downgrade(&self.0));
                return;
            }
            match cur.parent() {
                Some(p) => cur = p,
                None => return, // detached subtree: nowhere to scroll
            }
        }
    }

    fn write_html(&self, out: &mut String) {
        let n = self.0.borrow();
        if !n.root {
            out.push('<');
            out.push_str(&n.tag);
            for (k, v) in &n.attrs {
                if k == "value" && n.value.is_some() {
                    continue; // live value wins below
                }
                out.push_str(&format!(" {}=\"{}\"", k, escape_attr(v)));
            }
            if let Some(v) = &n.value {
                out.push_str(&format!(" value=\"{}\"", escape_attr(v)));
            }
            if !n.styles.is_empty() {
                let css: Vec<String> =
                    n.styles.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                out.push_str(&format!(" style=\"{}\"", escape_attr(&css.join("; "))));
            }
            out.push('>');
        }
        out.push_str(&escape_text(&n.text));
        for c in &n.children {
            c.write_html(out);
        }
        if !n.root && !is_void(&n.tag) {
            out.push_str(&format!("</{}>", n.tag));
        }
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.borrow();
        match n.attrs.iter().find(|(k, _)| k == "id") {
            Some((_, id)) => write!(f, "<{}#{}>", n.tag, id),
            None => write!(f, "<{}>", n.tag),
        }
    }
}

fn collect_text(el: &ElementRef, out: &mut String) {
    let n = el.0.borrow();
    if !n.text.is_empty() {
        out.push_str(&n.text);
        out.push(' ');
    }
    for c in &n.children {
        collect_text(c, out);
    }
}

fn collect_descendants(el: &ElementRef, out: &mut Vec<ElementRef>) {
    for c in el.children() {
        out.push(c.clone());
        collect_descendants(&c, out);
    }
}

pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input"
            | "link" | "meta" | "source" | "track" | "wbr"
    )
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// One parsed page. Owns the root; the rest of the crate reaches nodes only
/// through handles handed out by adapters.
pub struct Document {
    root: ElementRef,
}

impl Document {
    pub fn new(root: ElementRef) -> Self {
        root.0.borrow_mut().root = true;
        Document { root }
    }

    pub fn root(&self) -> ElementRef {
        self.root.clone()
    }

    pub fn by_id(&self, id: &str) -> Option<ElementRef> {
        self.root.find_by_id(id)
    }

    pub fn find_all_tag(&self, tag: &str) -> Vec<ElementRef> {
        self.root.find_all_tag(tag)
    }

    /// Read and clear the pending scroll target, if its node is still alive.
    pub fn take_scroll_target(&self) -> Option<ElementRef> {
        self.root.0.borrow_mut().scroll_target.take()
            .and_then(|w| w.upgrade())
            .map(ElementRef)
    }

    /// Serialize the live tree back to HTML, including runtime form values
    /// and highlight styles.
    pub fn to_html(&self) -> String {
        let mut out = s!();
        self.root.write_html(&mut out);
        out
    }
}
