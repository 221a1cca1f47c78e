use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ArmOverlayApp {
    pub state: AppState,
}

impl eframe::App for ArmOverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: directory, chromosome, reload ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: legend / population toggles ----
        egui::SidePanel::left("population_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: coverage grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::coverage_grid(ui, &self.state);
        });
    }
}
