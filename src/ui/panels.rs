use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::ParseMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – metric toggles, correlations, omissions
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Metrics");
    ui.separator();

    let Some(output) = &state.output else {
        ui.label("No training log loaded.");
        return;
    };

    let mut toggled = None;
    for (label, color) in state.colors.legend_entries() {
        let n = output.series.len(label);
        let trend = match output.trend(label) {
            Some(t) => format!("{:+.2}/wk", t.slope),
            None => "no trend".to_string(),
        };
        let text = RichText::new(format!("{label}  (n={n}, {trend})")).color(color);

        let mut checked = state.visible.contains(&label);
        if ui.checkbox(&mut checked, text).changed() {
            toggled = Some(label);
        }
    }

    ui.add_space(8.0);
    ui.heading("Correlations");
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Metric");
            });
            header.col(|ui| {
                ui.strong("Metric");
            });
            header.col(|ui| {
                ui.strong("r");
            });
        })
        .body(|mut body| {
            for pair in &output.correlations.pairs {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(pair.a.display_name());
                    });
                    row.col(|ui| {
                        ui.label(pair.b.display_name());
                    });
                    row.col(|ui| match &pair.coefficient {
                        Ok(r) => {
                            ui.label(format!("{r:.2}"));
                        }
                        Err(e) => {
                            ui.label("n/a").on_hover_text(e.to_string());
                        }
                    });
                });
            }
        });

    if !output.trend_omissions.is_empty() {
        ui.add_space(8.0);
        ui.strong("Skipped trends");
        for e in &output.trend_omissions {
            ui.label(RichText::new(e.to_string()).color(Color32::DARK_RED));
        }
    }

    if let Some(label) = toggled {
        state.toggle_metric(label);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(path), Some(out)) = (&state.source_path, &state.output) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{name}: {} weeks sampled", out.sampled_rows));
        }

        ui.separator();

        let strict = state.config.mode == ParseMode::Strict;
        if ui
            .selectable_label(strict, "Strict parsing")
            .on_hover_text("Abort on cells that are neither blank markers, H:MM nor numbers")
            .clicked()
        {
            state.set_mode(if strict { ParseMode::Lenient } else { ParseMode::Strict });
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open training log")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
