// src/gui/app.rs
use std::{error::Error, rc::Rc};

use eframe::egui;

use crate::{
    adapters,
    config::options::{DemoPage, ExportOptions, LaunchOptions},
    core::{Document, html},
    engine::TableSession,
    gui::{components, grid_widget::EguiGrid},
};

pub fn run(native: eframe::NativeOptions, launch: LaunchOptions) -> Result<(), Box<dyn Error>> {
    let app = App::new(&launch)?;
    eframe::run_native(
        "pagegrid",
        native,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

pub struct App {
    // the live page (UI thread only)
    pub doc: Rc<Document>,
    pub url: String,

    // engine wiring; None when no adapter matched the page
    pub session: Option<TableSession<EguiGrid>>,

    // overlay toggle
    pub table_visible: bool,

    // output text field UX (we map this <-> ExportOptions)
    pub export: ExportOptions,
    pub out_path_text: String,
    pub out_path_dirty: bool,

    pub status_text: String,
}

impl App {
    pub fn new(launch: &LaunchOptions) -> Result<Self, Box<dyn Error>> {
        let html = match &launch.page {
            Some(path) => std::fs::read_to_string(path)?,
            None => launch.demo.unwrap_or(DemoPage::Listings).html().to_string(),
        };
        let url = launch.effective_url();

        let doc = Rc::new(html::parse_document(&html));
        logf!("Init: page '{}' ({} bytes)", url, html.len());

        let mut status_text = s!("No adapter for this page");
        let session = match adapters::activate(&doc, &url) {
            Some(adapter) => match TableSession::new(adapter, EguiGrid::new()) {
                Ok(s) => {
                    status_text =
                        format!("{}: {} row(s)", s.adapter_name(), s.snapshot().len());
                    Some(s)
                }
                Err(e) => {
                    loge!("session init failed: {e}");
                    status_text = format!("Session failed: {e}");
                    None
                }
            },
            None => None,
        };

        let export = ExportOptions::default();
        let out_path_text = export.out_path().to_string_lossy().into_owned();

        Ok(Self {
            doc,
            url,
            session,
            table_visible: true,
            export,
            out_path_text,
            out_path_dirty: false,
            status_text,
        })
    }

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status_text = msg.into();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut page_events = Vec::new();
        let scroll_target = self.doc.take_scroll_target();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if self.table_visible { "Hide Table" } else { "Table View" };
                if ui.button(label).clicked() {
                    self.table_visible = !self.table_visible;
                    logf!("UI: Table overlay → {}", self.table_visible);
                    if !self.table_visible {
                        if let Some(session) = self.session.as_ref() {
                            session.clear_highlights();
                        }
                    }
                }
                ui.separator();
                ui.label(&self.url);
            });
            ui.separator();
            components::export_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            components::status_bar::draw(ui, self);
        });

        if self.table_visible {
            egui::TopBottomPanel::top("grid")
                .resizable(true)
                .default_height(240.0)
                .show(ctx, |ui| {
                    match self.session.as_mut() {
                        Some(session) => components::data_table::draw(ui, session.grid_mut()),
                        None => {
                            ui.label("No table on this page.");
                        }
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .show(ui, |ui| {
                    components::page_view::draw(
                        ui,
                        &self.doc.root(),
                        scroll_target.as_ref(),
                        &mut page_events,
                    );
                });
        });

        if let Some(session) = self.session.as_mut() {
            for ev in session.grid_mut().take_events() {
                session.handle_grid_event(ev);
            }
            for ev in &page_events {
                session.on_page_event(ev);
            }
        }
    }
}
