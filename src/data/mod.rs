/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  header_filt_chr{chrom}_{population}_{coverage}
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse whitespace columns → PointSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PointSeries    │  Vec<Point>, consumed by the pipeline
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ChromosomeFigure  │  panels of DisplaySeries, handed to renderers
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
