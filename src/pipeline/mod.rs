/// Normalization pipeline applied to every series before it is drawn.
///
/// ```text
///  raw PointSeries
///        │
///        ▼
///   ┌──────────┐
///   │ segment   │  density clusters on x → arms ordered by median x
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ orient    │  left to right, reflect y if the trend is negative
///   └──────────┘
///        │   (y range aggregated over the coverage cohort)
///        ▼
///   ┌──────────┐
///   │ display   │  slot / band placement → DisplaySeries
///   └──────────┘
/// ```

pub mod cluster;
pub mod display;
pub mod driver;
pub mod orient;
pub mod segment;
