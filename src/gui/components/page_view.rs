// src/gui/components/page_view.rs
//
// Renders the live document as widgets so edits and highlights are visible
// without a browser. Form controls are interactive and push page events;
// runtime styles (the highlighter's border/background) are drawn as frame
// stroke/fill. Not a layout engine — block elements stack vertically,
// inline-ish ones go on one line.

use eframe::egui::{self, Align, Color32, Frame, RichText, Stroke};

use crate::adapters::{PageEvent, PageEventKind};
use crate::core::ElementRef;

const INLINE_TAGS: [&str; 6] = ["span", "a", "strong", "em", "b", "label"];

pub fn draw(
    ui: &mut egui::Ui,
    root: &ElementRef,
    scroll_target: Option<&ElementRef>,
    events: &mut Vec<PageEvent>,
) {
    for child in root.children() {
        draw_node(ui, &child, scroll_target, events);
    }
}

fn draw_node(
    ui: &mut egui::Ui,
    el: &ElementRef,
    target: Option<&ElementRef>,
    events: &mut Vec<PageEvent>,
) {
    let tag = el.tag();
    match tag.as_str() {
        // head-only noise that may survive parsing
        "script" | "style" | "head" | "meta" | "link" | "title" => return,
        _ => {}
    }

    let frame = styled_frame(el);
    let resp = ui
        .push_id(el.addr(), |ui| {
            frame.show(ui, |ui| match tag.as_str() {
                "input" => draw_input(ui, el, events),
                "textarea" => draw_textarea(ui, el, events),
                "button" => draw_button(ui, el, events),
                "select" => {
                    ui.label(RichText::new(el.display_value()).weak());
                }
                "a" => draw_link(ui, el, target, events),
                t if INLINE_TAGS.contains(&t) => {
                    ui.horizontal_wrapped(|ui| {
                        draw_text_and_children(ui, el, target, events);
                    });
                }
                "li" => {
                    ui.horizontal_wrapped(|ui| {
                        ui.label("•");
                        draw_text_and_children(ui, el, target, events);
                    });
                }
                "h1" | "h2" | "h3" => {
                    ui.label(RichText::new(el.text_content()).heading());
                }
                _ => {
                    ui.vertical(|ui| {
                        draw_text_and_children(ui, el, target, events);
                    });
                }
            });
        })
        .response;

    if target.is_some_and(|t| t.same(el)) {
        resp.scroll_to_me(Some(Align::Center));
    }
}

fn draw_text_and_children(
    ui: &mut egui::Ui,
    el: &ElementRef,
    target: Option<&ElementRef>,
    events: &mut Vec<PageEvent>,
) {
    let own = el.own_text();
    let own = own.trim();
    if !own.is_empty() {
        ui.label(own);
    }
    for child in el.children() {
        draw_node(ui, &child, target, events);
    }
}

fn draw_input(ui: &mut egui::Ui, el: &ElementRef, events: &mut Vec<PageEvent>) {
    let read_only = el.attr("readonly").is_some() || el.attr("disabled").is_some();
    let mut text = el.value().unwrap_or_default();

    ui.horizontal(|ui| {
        if let Some(ph) = el.attr("placeholder") {
            if text.is_empty() && read_only {
                ui.label(RichText::new(ph).weak().italics());
                return;
            }
        }
        let resp = ui.add_enabled(
            !read_only,
            egui::TextEdit::singleline(&mut text).desired_width(160.0),
        );
        if resp.changed() {
            el.set_editable_value(&text);
            events.push(PageEvent {
                kind: PageEventKind::Input,
                target: el.clone(),
            });
        }
        if resp.lost_focus() {
            events.push(PageEvent {
                kind: PageEventKind::Change,
                target: el.clone(),
            });
        }
    });
}

fn draw_textarea(ui: &mut egui::Ui, el: &ElementRef, events: &mut Vec<PageEvent>) {
    let mut text = el.value().unwrap_or_default();
    let resp = ui.add(egui::TextEdit::multiline(&mut text).desired_rows(2));
    if resp.changed() {
        el.set_editable_value(&text);
        events.push(PageEvent {
            kind: PageEventKind::Input,
            target: el.clone(),
        });
    }
}

fn draw_button(ui: &mut egui::Ui, el: &ElementRef, events: &mut Vec<PageEvent>) {
    let label = el.text_content();
    let label = if label.is_empty() { el.display_value() } else { label };
    if ui.button(label).clicked() {
        events.push(PageEvent {
            kind: PageEventKind::Click,
            target: el.clone(),
        });
    }
}

fn draw_link(
    ui: &mut egui::Ui,
    el: &ElementRef,
    target: Option<&ElementRef>,
    events: &mut Vec<PageEvent>,
) {
    ui.vertical(|ui| {
        let own = el.own_text();
        let own = own.trim();
        if !own.is_empty() && ui.link(own).clicked() {
            events.push(PageEvent {
                kind: PageEventKind::Click,
                target: el.clone(),
            });
        }
        // Children render as normal nodes so field highlights stay visible.
        for child in el.children() {
            draw_node(ui, &child, target, events);
        }
    });
}

/// Frame mirroring the element's runtime styles: highlight border as a
/// stroke, highlight background as a fill.
fn styled_frame(el: &ElementRef) -> Frame {
    let mut frame = Frame::NONE;
    if let Some(border) = el.style("border") {
        if let Some((width, color)) = parse_border(&border) {
            frame = frame
                .stroke(Stroke::new(width, color))
                .inner_margin(2)
                .corner_radius(2);
        }
    }
    if let Some(bg) = el.style("background-color") {
        if let Some(color) = parse_hex_color(&bg) {
            frame = frame.fill(color);
        }
    }
    frame
}

/// "solid 2px #c9ebff" -> (2.0, color). Order-insensitive over tokens.
fn parse_border(s: &str) -> Option<(f32, Color32)> {
    let mut width = 1.0f32;
    let mut color = None;
    for tok in s.split_whitespace() {
        if let Some(px) = tok.strip_suffix("px") {
            if let Ok(w) = px.parse() {
                width = w;
            }
        } else if tok.starts_with('#') {
            color = parse_hex_color(tok);
        }
    }
    color.map(|c| (width, c))
}

fn parse_hex_color(s: &str) -> Option<Color32> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_shorthand_parses() {
        let (w, c) = parse_border("solid 2px #c9ebff").unwrap();
        assert_eq!(w, 2.0);
        assert_eq!(c, Color32::from_rgb(0xc9, 0xeb, 0xff));
    }

    #[test]
    fn bare_hex_parses() {
        assert_eq!(
            parse_hex_color("#c9ebff"),
            Some(Color32::from_rgb(0xc9, 0xeb, 0xff))
        );
        assert_eq!(parse_hex_color("red"), None);
    }
}
