// src/gui/components/export_bar.rs

use eframe::egui;

use crate::config::options::ExportFormat;
use crate::export;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");

            if export.format != prev_fmt {
                logf!("UI: Export format → {:?}", export.format);
                if !app.out_path_dirty {
                    app.out_path_text = export.out_path().to_string_lossy().into_owned();
                }
            }

            let before_headers = export.include_headers;
            ui.checkbox(&mut export.include_headers, "Include headers");
            if export.include_headers != before_headers {
                logf!("UI: Include_headers → {}", export.include_headers);
            }
        });
    }

    // --- Output path + Export ---
    ui.horizontal(|ui| {
        ui.label("Out:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.out_path_text).desired_width(260.0),
        );
        if resp.changed() {
            app.out_path_dirty = true;
        }

        if ui.button("Export").clicked() {
            app.export.out = Some(app.out_path_text.clone().into());
            match export_current(app) {
                Ok(path) => app.status(format!("Exported {path}")),
                Err(e) => {
                    loge!("export failed: {e}");
                    app.status(format!("Export failed: {e}"));
                }
            }
        }
    });
}

/// Export what the grid currently shows: visible columns, visible order.
fn export_current(app: &App) -> Result<String, Box<dyn std::error::Error>> {
    let Some(session) = app.session.as_ref() else {
        return Err("no active session".into());
    };
    let grid = session.grid();
    let data = grid.data();

    let keep: Vec<usize> = data
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.hidden)
        .map(|(ci, _)| ci)
        .collect();
    let headers = Some(keep.iter().map(|&ci| data.columns[ci].field.clone()).collect());
    let rows: Vec<Vec<String>> = (0..grid.view().len())
        .map(|vix| {
            keep.iter()
                .map(|&ci| grid.cell(vix, ci).unwrap_or_default().to_string())
                .collect()
        })
        .collect();

    let path = app.export.out_path();
    let written = export::write_export(
        &path,
        &headers,
        &rows,
        app.export.include_headers,
        app.export.format.delim(),
    )?;
    logf!("export: {} row(s) → {}", rows.len(), written.display());
    Ok(written.display().to_string())
}
