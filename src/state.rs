use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::PlotConfig;
use crate::data::model::ChromosomeFigure;
use crate::pipeline::driver::{DirectorySource, PipelineDriver};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    driver: PipelineDriver,

    /// Directory the coordinate files are read from.
    pub input_dir: Option<PathBuf>,

    /// Chromosome name as typed in the top bar.
    pub chrom_input: String,

    /// Last built figure (None until a directory is chosen).
    pub figure: Option<ChromosomeFigure>,

    /// Populations switched off in the side panel.
    pub hidden: BTreeSet<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            driver: PipelineDriver::new(config),
            input_dir: None,
            chrom_input: String::new(),
            figure: None,
            hidden: BTreeSet::new(),
            status_message: None,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        self.driver.config()
    }

    pub fn set_input_dir(&mut self, dir: PathBuf) {
        self.input_dir = Some(dir);
        self.reload();
    }

    /// Rebuild the figure for `chrom_input` from `input_dir`.
    pub fn reload(&mut self) {
        let Some(dir) = &self.input_dir else {
            self.status_message = Some("Choose a data directory first".to_string());
            return;
        };
        let chrom = self.chrom_input.trim().trim_start_matches("chr").to_string();
        if chrom.is_empty() {
            self.status_message = Some("Enter a chromosome".to_string());
            return;
        }

        let source = DirectorySource::new(dir, &self.config().input_template);
        let figure = self.driver.chromosome_figure(&source, &chrom);
        log::info!(
            "Built chr{chrom}: {} series in {} panels",
            figure.series_count(),
            figure.panels.len()
        );

        self.status_message = if figure.series_count() == 0 {
            Some(format!("No input files for chr{chrom} in {}", dir.display()))
        } else {
            None
        };
        self.chrom_input = chrom;
        self.figure = Some(figure);
    }

    pub fn is_visible(&self, population: &str) -> bool {
        !self.hidden.contains(population)
    }

    /// Toggle a single population on or off in every panel.
    pub fn toggle_population(&mut self, population: &str) {
        if !self.hidden.remove(population) {
            self.hidden.insert(population.to_string());
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hide_all(&mut self) {
        self.hidden = self.config().populations.iter().cloned().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::input_path;

    #[test]
    fn toggling_populations() {
        let mut state = AppState::new(PlotConfig::default());
        assert!(state.is_visible("BEB"));
        state.toggle_population("BEB");
        assert!(!state.is_visible("BEB"));
        state.toggle_population("BEB");
        assert!(state.is_visible("BEB"));

        state.hide_all();
        assert!(!state.is_visible("PJL") && !state.is_visible("ITU"));
        state.show_all();
        assert!(state.is_visible("PJL"));
    }

    #[test]
    fn reload_requires_directory() {
        let mut state = AppState::new(PlotConfig::default());
        state.chrom_input = "1".into();
        state.reload();
        assert!(state.figure.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn reload_builds_figure() {
        let dir = tempfile::tempdir().unwrap();
        let template = PlotConfig::default().input_template;
        let path = input_path(dir.path(), &template, "4", "ITU", "15x");
        std::fs::write(path, "1 1\n2 2\n3 3\n4 4\n").unwrap();

        let mut state = AppState::new(PlotConfig::default());
        state.chrom_input = "chr4".into();
        state.set_input_dir(dir.path().to_path_buf());

        let figure = state.figure.as_ref().unwrap();
        assert_eq!(figure.chrom, "4");
        assert_eq!(figure.series_count(), 1);
        assert!(state.status_message.is_none());
        assert_eq!(state.chrom_input, "4");
    }
}
