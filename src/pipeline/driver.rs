use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::{CoverageLevel, PlotConfig};
use crate::data::loader::{input_path, load_series};
use crate::data::model::{ChromosomeFigure, CoveragePanel, DisplayRange, DisplaySeries, PointSeries};
use crate::error::LoadError;

use super::cluster::{DensityClusterer, Dbscan1d};
use super::display::DisplayMapper;
use super::orient::normalize;
use super::segment::ArmSegmenter;

// ---------------------------------------------------------------------------
// Where raw series come from
// ---------------------------------------------------------------------------

/// Supplies the raw points of one (chromosome, population, coverage) unit.
pub trait SeriesSource {
    fn load(&self, chrom: &str, population: &str, coverage: &str) -> Result<PointSeries, LoadError>;
}

/// Files named by the input template inside one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    template: String,
}

impl DirectorySource {
    pub fn new(dir: &Path, template: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            template: template.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SeriesSource for DirectorySource {
    fn load(&self, chrom: &str, population: &str, coverage: &str) -> Result<PointSeries, LoadError> {
        load_series(&input_path(&self.dir, &self.template, chrom, population, coverage))
    }
}

// ---------------------------------------------------------------------------
// PipelineDriver
// ---------------------------------------------------------------------------

/// Runs segmentation, orientation and display mapping for every population
/// of every coverage level of a chromosome.
#[derive(Debug, Clone)]
pub struct PipelineDriver<C = Dbscan1d> {
    config: PlotConfig,
    segmenter: ArmSegmenter<C>,
    mapper: DisplayMapper,
    colors: ColorMap,
}

impl PipelineDriver<Dbscan1d> {
    pub fn new(config: PlotConfig) -> Self {
        Self::with_clusterer(Dbscan1d, config)
    }
}

impl<C: DensityClusterer> PipelineDriver<C> {
    pub fn with_clusterer(clusterer: C, config: PlotConfig) -> Self {
        let segmenter = ArmSegmenter::with_clusterer(clusterer, config.clustering);
        let mapper = DisplayMapper::new(config.display);
        let colors = ColorMap::new(&config.populations, &config.colors);
        Self {
            config,
            segmenter,
            mapper,
            colors,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Segment then orient one raw series.
    pub fn prepare(&self, raw: &PointSeries) -> PointSeries {
        normalize(self.segmenter.segment(raw))
    }

    /// Build the panel of one coverage level. Populations that fail to load
    /// are logged and left out; the panel may end up empty.
    pub fn coverage_panel<S>(&self, source: &S, chrom: &str, level: &CoverageLevel) -> CoveragePanel
    where
        S: SeriesSource + ?Sized,
    {
        let mut prepared: Vec<(&str, PointSeries)> = Vec::new();
        for pop in &self.config.populations {
            match source.load(chrom, pop, &level.name) {
                Ok(raw) => prepared.push((pop.as_str(), self.prepare(&raw))),
                Err(e @ LoadError::Missing(_)) => log::warn!("{e}"),
                Err(e) => log::warn!("skipping {pop} at {}: {e}", level.name),
            }
        }

        // the whole cohort must be in before any series is mapped
        let range = DisplayRange::across(prepared.iter().map(|(_, s)| s));
        let Some(range) = range else {
            log::warn!("chr{chrom} {}: no population loaded", level.name);
            return CoveragePanel {
                coverage: level.name.clone(),
                range: None,
                series: Vec::new(),
            };
        };
        log::debug!(
            "chr{chrom} {}: {} populations, y in [{}, {}]",
            level.name,
            prepared.len(),
            range.min,
            range.max
        );

        let series = prepared
            .into_iter()
            .filter_map(|(pop, s)| {
                let Some(slot) = self.config.slot(pop, &level.name) else {
                    log::warn!("no slot for {pop} at {}", level.name);
                    return None;
                };
                Some(DisplaySeries {
                    population: pop.to_string(),
                    coverage: level.name.clone(),
                    color: self.colors.color_for(pop),
                    style: self.config.style.style_for(level.band),
                    points: self.mapper.map_to_display(&s, slot, level.band, range),
                })
            })
            .collect();

        CoveragePanel {
            coverage: level.name.clone(),
            range: Some(range),
            series,
        }
    }

    /// All coverage panels of `chrom`, in configured order.
    pub fn chromosome_figure<S>(&self, source: &S, chrom: &str) -> ChromosomeFigure
    where
        S: SeriesSource + ?Sized,
    {
        let panels = self
            .config
            .coverages
            .iter()
            .map(|level| self.coverage_panel(source, chrom, level))
            .collect();
        ChromosomeFigure {
            chrom: chrom.to_string(),
            panels,
            legend: self.colors.legend_entries(),
        }
    }
}
