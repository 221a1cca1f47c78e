use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::data::model::{DisplayRange, Marker, SeriesStyle};
use crate::error::ConfigError;
use crate::pipeline::display::DisplayMapper;

// ---------------------------------------------------------------------------
// Coverage levels and their display regime
// ---------------------------------------------------------------------------

/// Display-density regime of a coverage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageBand {
    Low,
    Mid,
    High,
    /// Skips normalization; values keep their native magnitude.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageLevel {
    pub name: String,
    pub band: CoverageBand,
}

impl CoverageLevel {
    pub fn new(name: &str, band: CoverageBand) -> Self {
        Self {
            name: name.to_string(),
            band,
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// Density clustering along the reference axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringParams {
    pub eps: f64,
    pub min_samples: usize,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            eps: 2e7,
            min_samples: 3,
        }
    }
}

/// Vertical placement constants of the display bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Height given to a normalized `[0, 1]` series.
    pub scale: f64,
    pub low_mid_offset: f64,
    pub high_offset: f64,
    pub raw_offset: f64,
    /// Floor for the cohort y span.
    pub range_epsilon: f64,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            scale: 0.6e8,
            low_mid_offset: 1.5e7,
            high_offset: 0.3e8,
            raw_offset: 0.7e8,
            range_epsilon: 1e-9,
        }
    }
}

impl DisplayParams {
    /// Vertical distance between consecutive slots in `band`.
    pub fn offset(&self, band: CoverageBand) -> f64 {
        match band {
            CoverageBand::Low | CoverageBand::Mid => self.low_mid_offset,
            CoverageBand::High => self.high_offset,
            CoverageBand::Raw => self.raw_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    pub small_marker_size: f32,
    pub high_marker_size: f32,
    pub high_line_width: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            small_marker_size: 6.0,
            high_marker_size: 12.0,
            high_line_width: 1.2,
        }
    }
}

impl StyleParams {
    /// The high band is drawn as outlined diamonds on top, the rest as dots.
    pub fn style_for(&self, band: CoverageBand) -> SeriesStyle {
        match band {
            CoverageBand::High => SeriesStyle {
                marker: Marker::Diamond,
                filled: false,
                size: self.high_marker_size,
                line_width: self.high_line_width,
                alpha: 0.9,
                z_order: 4,
            },
            _ => SeriesStyle {
                marker: Marker::Circle,
                filled: true,
                size: self.small_marker_size,
                line_width: 0.0,
                alpha: 0.8,
                z_order: 2,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureParams {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: u32,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 7.0,
            dpi: 300,
        }
    }
}

impl FigureParams {
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f32).round() as u32,
            (self.height_in * self.dpi as f32).round() as u32,
        )
    }

    /// Convert a length in points (1/72 inch) to pixels.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi as f32 / 72.0
    }
}

// ---------------------------------------------------------------------------
// PlotConfig – the whole run configuration
// ---------------------------------------------------------------------------

/// Immutable run configuration. Every field has a default, so a JSON file
/// only needs to list what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub populations: Vec<String>,
    pub coverages: Vec<CoverageLevel>,
    /// Population → color name or `#rrggbb`.
    pub colors: BTreeMap<String, String>,
    /// Coverage → population → slot index.
    pub slots: BTreeMap<String, BTreeMap<String, f64>>,
    pub clustering: ClusteringParams,
    pub display: DisplayParams,
    pub style: StyleParams,
    pub figure: FigureParams,
    pub input_template: String,
    pub output_template: String,
    pub chromosomes: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let populations: Vec<String> = ["PJL", "BEB", "ITU"].iter().map(|s| s.to_string()).collect();
        let coverages = vec![
            CoverageLevel::new("6x", CoverageBand::Low),
            CoverageLevel::new("9x", CoverageBand::Mid),
            CoverageLevel::new("12x", CoverageBand::High),
            CoverageLevel::new("15x", CoverageBand::Raw),
        ];

        let colors = [("PJL", "darkred"), ("BEB", "darkgreen"), ("ITU", "navy")]
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect();

        let per_population: BTreeMap<String, f64> = [("PJL", 3.0), ("BEB", 2.0), ("ITU", 1.0)]
            .iter()
            .map(|(p, s)| (p.to_string(), *s))
            .collect();
        let slots = coverages
            .iter()
            .map(|c| (c.name.clone(), per_population.clone()))
            .collect();

        let chromosomes = (1..=22)
            .map(|i| i.to_string())
            .chain(std::iter::once("X".to_string()))
            .collect();

        Self {
            populations,
            coverages,
            colors,
            slots,
            clustering: ClusteringParams::default(),
            display: DisplayParams::default(),
            style: StyleParams::default(),
            figure: FigureParams::default(),
            input_template: "header_filt_chr{chrom}_{population}_{coverage}".to_string(),
            output_template: "chr{chrom}_quadraplot_{dpi}dpi.png".to_string(),
            chromosomes,
        }
    }
}

impl PlotConfig {
    /// Parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PlotConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// The file at `path` if given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        for level in &config.coverages {
            for (a, b) in config.overlapping_slots(level) {
                log::debug!(
                    "{}: bands of {a} and {b} overlap with offset {}",
                    level.name,
                    config.display.offset(level.band)
                );
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.populations.is_empty() {
            return Err(ConfigError::Empty("populations"));
        }
        if self.coverages.is_empty() {
            return Err(ConfigError::Empty("coverages"));
        }
        for level in &self.coverages {
            for pop in &self.populations {
                if self.slot(pop, &level.name).is_none() {
                    return Err(ConfigError::MissingSlot {
                        population: pop.clone(),
                        coverage: level.name.clone(),
                    });
                }
            }
        }
        for (pop, color) in &self.colors {
            if parse_color(color).is_none() {
                return Err(ConfigError::BadColor {
                    population: pop.clone(),
                    color: color.clone(),
                });
            }
        }

        let eps = self.clustering.eps;
        if !(eps.is_finite() && eps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "clustering.eps",
                reason: format!("{eps} is not a positive number"),
            });
        }
        if self.clustering.min_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "clustering.min_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.display.range_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                field: "display.range_epsilon",
                reason: "must be > 0".to_string(),
            });
        }
        if self.figure.dpi == 0 || !(self.figure.width_in > 0.0 && self.figure.height_in > 0.0) {
            return Err(ConfigError::Invalid {
                field: "figure",
                reason: "size and dpi must be positive".to_string(),
            });
        }
        for placeholder in ["{chrom}", "{population}", "{coverage}"] {
            if !self.input_template.contains(placeholder) {
                return Err(ConfigError::Invalid {
                    field: "input_template",
                    reason: format!("missing {placeholder}"),
                });
            }
        }
        if !self.output_template.contains("{chrom}") {
            return Err(ConfigError::Invalid {
                field: "output_template",
                reason: "missing {chrom}".to_string(),
            });
        }
        Ok(())
    }

    pub fn slot(&self, population: &str, coverage: &str) -> Option<f64> {
        self.slots.get(coverage)?.get(population).copied()
    }

    pub fn output_file_name(&self, chrom: &str) -> String {
        self.output_template
            .replace("{chrom}", chrom)
            .replace("{dpi}", &self.figure.dpi.to_string())
    }

    /// Population pairs whose normalized bands would share display space at
    /// `level`. The raw band has no fixed extent and is never reported.
    pub fn overlapping_slots(&self, level: &CoverageLevel) -> Vec<(String, String)> {
        if level.band == CoverageBand::Raw {
            return Vec::new();
        }
        let mapper = DisplayMapper::new(self.display);
        // normalized extents do not depend on the cohort range
        let unit = DisplayRange::new(0.0, 1.0);
        let mut pairs = Vec::new();
        for (i, a) in self.populations.iter().enumerate() {
            for b in &self.populations[i + 1..] {
                let (Some(sa), Some(sb)) = (self.slot(a, &level.name), self.slot(b, &level.name)) else {
                    continue;
                };
                let (lo_a, hi_a) = mapper.slot_extent(sa, level.band, unit);
                let (lo_b, hi_b) = mapper.slot_extent(sb, level.band, unit);
                if lo_a < hi_b && lo_b < hi_a {
                    pairs.push((a.clone(), b.clone()));
                }
            }
        }
        pairs
    }
}
