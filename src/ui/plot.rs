use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::{CoveragePanel, DisplaySeries, Marker};
use crate::state::AppState;

use super::to_color32;

// ---------------------------------------------------------------------------
// Coverage grid (central panel)
// ---------------------------------------------------------------------------

/// Render one plot per coverage level, two per row.
pub fn coverage_grid(ui: &mut Ui, state: &AppState) {
    let figure = match &state.figure {
        Some(f) => f,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a data directory to view arms  (File → Open data directory…)");
            });
            return;
        }
    };

    let rows = figure.panels.len().div_ceil(2).max(1) as f32;
    let spacing = ui.spacing().item_spacing.y;
    let height = ((ui.available_height() - spacing * (rows - 1.0)) / rows).max(120.0);
    let x_bounds = figure.x_bounds();

    ui.columns(2, |columns: &mut [Ui]| {
        for (i, panel) in figure.panels.iter().enumerate() {
            coverage_plot(&mut columns[i % 2], state, &figure.chrom, panel, height, x_bounds);
        }
    });
}

fn coverage_plot(
    ui: &mut Ui,
    state: &AppState,
    chrom: &str,
    panel: &CoveragePanel,
    height: f32,
    x_bounds: Option<[f64; 2]>,
) {
    ui.label(RichText::new(panel.title(chrom)).strong());

    // shared x axis across panels
    let mut plot = Plot::new(format!("coverage_{}", panel.coverage))
        .height(height - 24.0)
        .legend(Legend::default())
        .x_axis_label("Markers")
        .y_axis_label("Genomes")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some([lo, hi]) = x_bounds {
        plot = plot.include_x(lo).include_x(hi);
    }

    plot.show(ui, |plot_ui| {
        let mut layers: Vec<&DisplaySeries> = panel
            .series
            .iter()
            .filter(|s| state.is_visible(&s.population))
            .collect();
        layers.sort_by_key(|s| s.style.z_order);

        for series in layers {
            let points: PlotPoints = series
                .points
                .iter()
                .map(|p| [p.x, p.y_display])
                .collect();

            let shape = match series.style.marker {
                Marker::Circle => MarkerShape::Circle,
                Marker::Diamond => MarkerShape::Diamond,
            };

            let markers = Points::new(points)
                .name(&series.population)
                .color(to_color32(series.color).gamma_multiply(series.style.alpha))
                .shape(shape)
                .filled(series.style.filled)
                .radius(series.style.size.sqrt() / 2.0 + 1.0);

            plot_ui.points(markers);
        }
    });
}
