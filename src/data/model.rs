use std::cmp::Ordering;

use palette::Srgb;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Point – one alignment coordinate pair
// ---------------------------------------------------------------------------

/// Reference-axis (`x`) and query-axis (`y`) coordinates of one alignment hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Order points by `x` only. NaN never reaches a series (the loader drops it).
pub fn cmp_x(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x)
}

// ---------------------------------------------------------------------------
// PointSeries – the points of one (population, coverage) file
// ---------------------------------------------------------------------------

/// An ordered sequence of points for one (population, coverage) combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSeries {
    points: Vec<Point>,
}

impl PointSeries {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a series from `(x, y)` tuples.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// `(min, max)` of the `y` values, `None` for an empty series.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))),
        )
    }
}

#[cfg(test)]
impl PointSeries {
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Whether `x` never decreases along the series.
    pub fn is_sorted_by_x(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }
}

// ---------------------------------------------------------------------------
// DisplayRange – the y extent shared by one coverage cohort
// ---------------------------------------------------------------------------

/// `(min, max)` of all `y` values across the populations of one coverage level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Aggregate the extent of several series. `None` if every series is empty.
    pub fn across<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PointSeries>,
    {
        series
            .into_iter()
            .filter_map(PointSeries::y_extent)
            .fold(None, |acc: Option<Self>, (lo, hi)| match acc {
                None => Some(Self::new(lo, hi)),
                Some(r) => Some(Self::new(r.min.min(lo), r.max.max(hi))),
            })
    }

    /// `max - min`, floored at `epsilon` so it can be used as a divisor.
    pub fn span(&self, epsilon: f64) -> f64 {
        (self.max - self.min).max(epsilon)
    }
}

// ---------------------------------------------------------------------------
// Display-ready output handed to the renderers
// ---------------------------------------------------------------------------

/// A point with its vertical display position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
    /// Position within `[0, 1]`; absent for the raw band.
    pub y_norm: Option<f64>,
    pub y_display: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Diamond,
}

/// How a series is drawn. Sizes follow the matplotlib convention: `size` is
/// the marker area in points², `line_width` is in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub marker: Marker,
    pub filled: bool,
    pub size: f32,
    pub line_width: f32,
    pub alpha: f32,
    pub z_order: u8,
}

/// One (population, coverage) series ready for drawing.
#[derive(Debug, Clone)]
pub struct DisplaySeries {
    pub population: String,
    pub coverage: String,
    pub color: Srgb<u8>,
    pub style: SeriesStyle,
    pub points: Vec<DisplayPoint>,
}

/// All series of one coverage level. May be empty.
#[derive(Debug, Clone)]
pub struct CoveragePanel {
    pub coverage: String,
    pub range: Option<DisplayRange>,
    pub series: Vec<DisplaySeries>,
}

impl CoveragePanel {
    pub fn title(&self, chrom: &str) -> String {
        format!("chr{chrom} - {}", self.coverage)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// `(min, max)` over `x` and `y_display` of every point in the panel.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let init = ([first.x, first.x], [first.y_display, first.y_display]);
        Some(points.fold(init, |(x, y), p| {
            (
                [x[0].min(p.x), x[1].max(p.x)],
                [y[0].min(p.y_display), y[1].max(p.y_display)],
            )
        }))
    }
}

/// Everything needed to draw one chromosome.
#[derive(Debug, Clone)]
pub struct ChromosomeFigure {
    pub chrom: String,
    pub panels: Vec<CoveragePanel>,
    /// Population name and color, independent of coverage.
    pub legend: Vec<(String, Srgb<u8>)>,
}

impl ChromosomeFigure {
    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|p| p.series.len()).sum()
    }

    /// `x` range shared by every panel.
    pub fn x_bounds(&self) -> Option<[f64; 2]> {
        self.panels
            .iter()
            .filter_map(CoveragePanel::bounds)
            .map(|(x, _)| x)
            .reduce(|a, b| [a[0].min(b[0]), a[1].max(b[1])])
    }
}

/// Flat row written by the TSV dump.
#[derive(Debug, Serialize)]
pub struct DisplayRecord<'a> {
    pub population: &'a str,
    pub coverage: &'a str,
    pub x: f64,
    pub y: f64,
    pub y_norm: Option<f64>,
    pub y_display: f64,
}

impl<'a> DisplayRecord<'a> {
    pub fn rows(series: &'a DisplaySeries) -> impl Iterator<Item = DisplayRecord<'a>> + 'a {
        series.points.iter().map(move |p| DisplayRecord {
            population: &series.population,
            coverage: &series.coverage,
            x: p.x,
            y: p.y,
            y_norm: p.y_norm,
            y_display: p.y_display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_extent_of_series() {
        let s = PointSeries::from_pairs([(1.0, 4.0), (2.0, -3.0), (3.0, 7.5)]);
        assert_eq!(s.y_extent(), Some((-3.0, 7.5)));
        assert_eq!(PointSeries::default().y_extent(), None);
    }

    #[test]
    fn display_range_across_cohort() {
        let a = PointSeries::from_pairs([(1.0, 10.0), (2.0, 20.0)]);
        let b = PointSeries::from_pairs([(1.0, 5.0), (2.0, 15.0)]);
        let empty = PointSeries::default();
        let r = DisplayRange::across([&a, &empty, &b]).unwrap();
        assert_eq!(r, DisplayRange::new(5.0, 20.0));
        assert!(DisplayRange::across([&empty]).is_none());
    }

    #[test]
    fn span_is_floored() {
        let r = DisplayRange::new(4.0, 4.0);
        assert_eq!(r.span(1e-9), 1e-9);
        assert_eq!(DisplayRange::new(1.0, 3.0).span(1e-9), 2.0);
    }
}
