// src/gui/components/status_bar.rs

use eframe::egui::{self, RichText};

use crate::gui::app::App;
use crate::log;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&app.status_text).strong());
        if let Some(session) = app.session.as_ref() {
            ui.separator();
            ui.label(format!(
                "{}: {} row(s)",
                session.adapter_name(),
                session.snapshot().len()
            ));
        }
        if let Some(line) = log::last() {
            ui.separator();
            ui.label(RichText::new(line).weak());
        }
    });
}
