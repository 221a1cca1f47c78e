use std::path::PathBuf;

use thiserror::Error;

/// Why a (population, coverage) file could not contribute a series.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no numeric rows in {}", .0.display())]
    NoData(PathBuf),
}

/// Failures of the density clustering step.
#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    #[error("cannot cluster an empty point set")]
    EmptyInput,

    #[error("eps must be finite and > 0, got {0}")]
    InvalidEps(f64),

    #[error("min_samples must be > 0")]
    InvalidMinSamples,

    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },

    #[error("clusterer returned {got} labels for {expected} points")]
    LabelCount { expected: usize, got: usize },
}

/// Unusable configuration. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config lists no {0}")]
    Empty(&'static str),

    #[error("no slot for population {population} at coverage {coverage}")]
    MissingSlot { population: String, coverage: String },

    #[error("unknown color {color:?} for population {population}")]
    BadColor { population: String, color: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("figure of {width}x{height} px is too small to lay out")]
    TooSmall { width: u32, height: u32 },

    #[error("drawing figure: {0}")]
    Draw(String),

    #[error("writing {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
