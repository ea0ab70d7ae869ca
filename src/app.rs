use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrainingTrendsApp {
    pub state: AppState,
}

impl TrainingTrendsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for TrainingTrendsApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for TrainingTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: metrics and correlations ----
        egui::SidePanel::left("metrics_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::training_plot(ui, &self.state);
        });
    }
}
