// src/gui/components/data_table.rs
//
// Renders the grid overlay: filter box, clickable sort headers, and the
// cell area. All state lives in EguiGrid; this draws it and forwards
// clicks/edits back into it. The session drains the resulting events
// after the frame.

use eframe::egui::{self, Align, Layout, RichText, Sense, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::grid::GridHandle;
use crate::gui::grid_widget::EguiGrid;

pub fn draw(ui: &mut egui::Ui, grid: &mut EguiGrid) {
    // --- Filter ---
    ui.horizontal(|ui| {
        ui.label("Filter:");
        let mut text = grid.filter().to_string();
        let resp = ui.add(egui::TextEdit::singleline(&mut text).desired_width(180.0));
        if resp.changed() {
            grid.set_filter(text);
        }
        if !grid.filter().is_empty() && ui.small_button("✕").clicked() {
            grid.set_filter(String::new());
        }
        ui.label(format!("{} row(s)", grid.view().len()));
    });

    ui.add_space(4.0);

    // Visible columns only; the id column stays internal.
    let cols: Vec<(usize, String, bool)> = grid
        .data()
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.hidden)
        .map(|(ci, c)| (ci, c.field.clone(), c.read_only))
        .collect();
    let nrows = grid.view().len();

    // Commit info gathered during drawing, applied after the table borrow
    // games are over.
    let mut clicked: Option<(usize, String)> = None;
    let mut edit_started: Option<(usize, String)> = None;
    let mut sort_clicked: Option<usize> = None;
    let mut commit = false;
    let mut cancel = false;

    egui::ScrollArea::new([true, false])
        .id_salt("grid_hscroll")
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .id_salt("grid_table");
            for _ in &cols {
                table = table.column(
                    Column::initial(120.0).resizable(true).clip(true).at_least(20.0),
                );
            }

            table
                .header(24.0, |mut header| {
                    for (ci, field, _) in &cols {
                        header.col(|ui| {
                            let marker = match grid.sort() {
                                Some((c, true)) if c == *ci => " ▲",
                                Some((c, false)) if c == *ci => " ▼",
                                _ => "",
                            };
                            let text = RichText::new(format!("{field}{marker}")).strong();
                            if ui
                                .add(egui::Label::new(text).selectable(false).sense(Sense::click()))
                                .clicked()
                            {
                                sort_clicked = Some(*ci);
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, nrows, |mut row| {
                        let vix = row.index();
                        let selected_here = grid
                            .selected()
                            .map(|(r, f)| (*r == vix, f.clone()))
                            .filter(|(same_row, _)| *same_row)
                            .map(|(_, f)| f);

                        for (ci, field, read_only) in &cols {
                            let editing_here = grid.editing().is_some_and(|e| {
                                &e.field == field
                                    && grid.id_at(vix).as_deref() == Some(e.id.as_str())
                            });

                            row.col(|ui| {
                                if editing_here {
                                    if let Some(buf) = grid.editing_buffer_mut() {
                                        let resp = ui.add(
                                            egui::TextEdit::singleline(buf)
                                                .desired_width(f32::INFINITY),
                                        );
                                        if resp.lost_focus() {
                                            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                                                cancel = true;
                                            } else {
                                                commit = true;
                                            }
                                        } else {
                                            resp.request_focus();
                                        }
                                    }
                                    return;
                                }

                                ui.scope(|ui| {
                                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                    let cell = grid.cell(vix, *ci).unwrap_or_default();
                                    let mut rt = RichText::new(cell);
                                    if selected_here.as_deref() == Some(field.as_str()) {
                                        rt = rt.strong();
                                    }
                                    if *read_only {
                                        rt = rt.weak();
                                    }
                                    ui.with_layout(
                                        Layout::left_to_right(Align::Center),
                                        |ui| {
                                            let resp = ui.add(
                                                egui::Label::new(rt)
                                                    .selectable(false)
                                                    .sense(Sense::click()),
                                            );
                                            if resp.double_clicked() && !read_only {
                                                edit_started = Some((vix, field.clone()));
                                            } else if resp.clicked() {
                                                clicked = Some((vix, field.clone()));
                                            }
                                        },
                                    );
                                });
                            });
                        }
                    });
                });
        });

    if let Some(ci) = sort_clicked {
        grid.toggle_sort(ci);
    }
    if let Some((vix, field)) = clicked {
        grid.select(vix, &field);
    }
    if let Some((vix, field)) = edit_started {
        grid.select(vix, &field);
        grid.begin_edit(vix, &field);
    }
    if cancel {
        grid.cancel_edit();
    } else if commit {
        grid.commit_edit();
    }
}
