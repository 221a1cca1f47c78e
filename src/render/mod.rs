//! Batch output: one PNG per chromosome, optionally a TSV of the plotted points.

use std::error::Error;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use palette::Srgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontTransform};

use crate::config::FigureParams;
use crate::data::model::{ChromosomeFigure, DisplayRecord, DisplaySeries, Marker, SeriesStyle};
use crate::error::RenderError;

const COLUMNS: usize = 2;
/// Share of the figure width taken by the panel grid; the legend gets the rest.
const GRID_WIDTH: f64 = 0.84;
const MARGIN: f64 = 0.05;
const X_DESC: &str = "Markers";
const Y_DESC: &str = "Genomes";

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Size, ranges and captions of a figure, decided before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    /// Shared by every panel.
    pub x_range: [f64; 2],
    pub panels: Vec<PanelLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub caption: String,
    pub y_range: [f64; 2],
}

impl FigureLayout {
    pub fn new(figure: &ChromosomeFigure, params: &FigureParams) -> Result<Self, RenderError> {
        let (width, height) = params.pixels();
        if width < 64 || height < 64 {
            return Err(RenderError::TooSmall { width, height });
        }
        let panels = figure
            .panels
            .iter()
            .map(|panel| PanelLayout {
                caption: panel.title(&figure.chrom),
                y_range: padded(panel.bounds().map(|(_, y)| y).unwrap_or([0.0, 1.0])),
            })
            .collect();

        Ok(Self {
            width,
            height,
            rows: figure.panels.len().div_ceil(COLUMNS).max(1),
            x_range: padded(figure.x_bounds().unwrap_or([0.0, 1.0])),
            panels,
        })
    }
}

/// `[lo, hi]` widened by a 5% margin; degenerate ranges get a unit window.
fn padded(range: [f64; 2]) -> [f64; 2] {
    let span = range[1] - range[0];
    if span > 0.0 {
        [range[0] - span * MARGIN, range[1] + span * MARGIN]
    } else {
        [range[0] - 1.0, range[1] + 1.0]
    }
}

fn px(params: &FigureParams, points: f32) -> i32 {
    params.points_to_px(points).round().max(1.0) as i32
}

fn font(params: &FigureParams, points: f32) -> FontDesc<'static> {
    ("sans-serif", 12).into_font().resize(px(params, points) as f64)
}

fn rgb(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

/// Marker radius in pixels from a matplotlib marker area in points².
fn marker_radius(params: &FigureParams, style: &SeriesStyle) -> i32 {
    px(params, style.size.sqrt() / 2.0)
}

fn diamond(radius: i32) -> Vec<(i32, i32)> {
    vec![(0, -radius), (radius, 0), (0, radius), (-radius, 0), (0, -radius)]
}

// ---------------------------------------------------------------------------
// Figure drawing
// ---------------------------------------------------------------------------

/// Rasterise a figure without touching the filesystem.
pub fn draw_figure(figure: &ChromosomeFigure, params: &FigureParams) -> Result<RgbImage, RenderError> {
    let layout = FigureLayout::new(figure, params)?;
    let (width, height) = (layout.width, layout.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        paint(&root, figure, &layout, params).map_err(|e| RenderError::Draw(e.to_string()))?;
        root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
    }
    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Draw(format!("pixel buffer does not fit {width}x{height}")))
}

fn paint(
    root: &Area<'_>,
    figure: &ChromosomeFigure,
    layout: &FigureLayout,
    params: &FigureParams,
) -> Result<(), Box<dyn Error>> {
    root.fill(&WHITE)?;

    let grid_width = (layout.width as f64 * GRID_WIDTH) as i32;
    let height = layout.height as i32;
    let (grid, legend) = root.split_horizontally(grid_width);

    let desc = font(params, 11.0);
    let desc_px = px(params, 11.0);
    root.draw(&Text::new(
        X_DESC,
        (grid_width / 2, height - desc_px),
        desc.clone().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    root.draw(&Text::new(
        Y_DESC,
        (desc_px, height / 2),
        desc.transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let grid = grid.margin(desc_px, desc_px * 2, desc_px * 2, 0);
    let cells = grid.split_evenly((layout.rows, COLUMNS));
    for ((panel, panel_layout), cell) in figure.panels.iter().zip(&layout.panels).zip(&cells) {
        draw_panel(cell, &panel.series, panel_layout, layout.x_range, params)?;
    }

    draw_legend(&legend, &figure.legend, params)?;
    Ok(())
}

fn draw_panel(
    area: &Area<'_>,
    series: &[DisplaySeries],
    layout: &PanelLayout,
    x_range: [f64; 2],
    params: &FigureParams,
) -> Result<(), Box<dyn Error>> {
    let tick_px = px(params, 8.0);
    let mut chart = ChartBuilder::on(area)
        .caption(&layout.caption, font(params, 11.0).color(&BLACK))
        .margin(px(params, 4.0))
        .x_label_area_size(tick_px * 2)
        .y_label_area_size(tick_px * 5)
        .build_cartesian_2d(x_range[0]..x_range[1], layout.y_range[0]..layout.y_range[1])?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .x_labels(5)
        .y_labels(5)
        .x_label_formatter(&|v: &f64| format!("{v:.1e}"))
        .y_label_formatter(&|v: &f64| format!("{v:.1e}"))
        .label_style(font(params, 8.0).color(&BLACK))
        .draw()?;

    let mut layers: Vec<&DisplaySeries> = series.iter().collect();
    layers.sort_by_key(|s| s.style.z_order);
    for s in layers {
        let color = rgb(s.color).mix(s.style.alpha as f64);
        let shape = if s.style.filled {
            color.filled()
        } else {
            color.stroke_width(px(params, s.style.line_width) as u32)
        };
        let radius = marker_radius(params, &s.style);
        match s.style.marker {
            Marker::Circle => {
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|p| Circle::new((p.x, p.y_display), radius, shape)),
                )?;
            }
            Marker::Diamond => {
                chart.draw_series(s.points.iter().map(|p| {
                    EmptyElement::at((p.x, p.y_display)) + PathElement::new(diamond(radius), shape)
                }))?;
            }
        }
    }
    Ok(())
}

/// Boxed column of population names with their colours.
fn draw_legend(
    area: &Area<'_>,
    entries: &[(String, Srgb<u8>)],
    params: &FigureParams,
) -> Result<(), Box<dyn Error>> {
    if entries.is_empty() {
        return Ok(());
    }
    let (_, height) = area.dim_in_pixel();
    let label_px = px(params, 10.0);
    let row = label_px * 2;
    let pad = label_px / 2;
    let radius = (label_px / 3).max(1);

    let box_height = row * entries.len() as i32 + pad;
    let x0 = pad;
    let y0 = (height as i32 - box_height) / 2;
    let label = font(params, 10.0)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut widest = 0;
    for (i, (name, color)) in entries.iter().enumerate() {
        let cy = y0 + pad + row * i as i32 + row / 2;
        let cx = x0 + pad + radius;
        area.draw(&Circle::new((cx, cy), radius, rgb(*color).filled()))?;
        area.draw(&Text::new(name.as_str(), (cx + radius * 2, cy), label.clone()))?;
        let (w, _) = area.estimate_text_size(name, &label)?;
        widest = widest.max(w as i32);
    }

    let x1 = x0 + pad * 2 + radius * 4 + widest;
    area.draw(&Rectangle::new(
        [(x0, y0), (x1, y0 + box_height)],
        BLACK.stroke_width(1),
    ))?;
    Ok(())
}

/// Draw `figure` and write it to `path` as PNG.
pub fn render_png(figure: &ChromosomeFigure, params: &FigureParams, path: &Path) -> Result<(), RenderError> {
    let img = draw_figure(figure, params)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Write every plotted point of `figure` as tab-separated rows.
pub fn write_tsv(figure: &ChromosomeFigure, path: &Path) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    for series in figure.panels.iter().flat_map(|p| p.series.iter()) {
        for record in DisplayRecord::rows(series) {
            writer.serialize(record)?;
        }
    }
    writer.flush()?;
    Ok(())
}
