use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

use super::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – population legend and toggles
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Populations");
    ui.separator();

    let legend = match &state.figure {
        Some(figure) => figure.legend.clone(),
        None => {
            ui.label("No data loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.show_all();
                }
                if ui.small_button("None").clicked() {
                    state.hide_all();
                }
            });

            for (population, color) in &legend {
                let mut checked = state.is_visible(population);
                let text = RichText::new(population).strong().color(to_color32(*color));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_population(population);
                }
            }

            ui.separator();
            ui.strong("Coverage panels");
            if let Some(figure) = &state.figure {
                for panel in &figure.panels {
                    let line = match panel.range {
                        Some(r) => format!(
                            "{}: {} series, y {:.3e} – {:.3e}",
                            panel.coverage,
                            panel.series.len(),
                            r.min,
                            r.max
                        ),
                        None => format!("{}: no data", panel.coverage),
                    };
                    ui.label(line);
                }
            }

            ui.separator();
            let clustering = state.config().clustering;
            ui.label(format!(
                "Arm detection: eps {:.1e}, min samples {}",
                clustering.eps, clustering.min_samples
            ));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data directory…").clicked() {
                open_dir_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("chr");
        let response = ui.add(egui::TextEdit::singleline(&mut state.chrom_input).desired_width(60.0));
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Load").clicked() || submitted {
            state.reload();
        }

        ui.separator();

        if let Some(dir) = &state.input_dir {
            ui.label(dir.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Directory dialog
// ---------------------------------------------------------------------------

pub fn open_dir_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open coordinate directory")
        .pick_folder();

    if let Some(path) = dir {
        log::info!("Reading coordinates from {}", path.display());
        state.set_input_dir(path);
    }
}
