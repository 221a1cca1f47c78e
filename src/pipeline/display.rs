use crate::config::{CoverageBand, DisplayParams};
use crate::data::model::{DisplayPoint, DisplayRange, PointSeries};

/// Places series into vertical bands of a shared display space.
///
/// Low, mid and high bands squeeze `y` into `[0, 1]` against the cohort
/// range and scale it to `params.scale`; the raw band keeps native values.
/// Slots are stacked `offset(band)` apart. Whether neighbouring slots overlap
/// is up to the configured offsets.
#[derive(Debug, Clone, Copy)]
pub struct DisplayMapper {
    params: DisplayParams,
}

impl DisplayMapper {
    pub fn new(params: DisplayParams) -> Self {
        Self { params }
    }

    pub fn map_to_display(
        &self,
        series: &PointSeries,
        slot: f64,
        band: CoverageBand,
        range: DisplayRange,
    ) -> Vec<DisplayPoint> {
        let base = slot * self.params.offset(band);
        let span = range.span(self.params.range_epsilon);

        series
            .points()
            .iter()
            .map(|p| match band {
                CoverageBand::Raw => DisplayPoint {
                    x: p.x,
                    y: p.y,
                    y_norm: None,
                    y_display: p.y + base,
                },
                CoverageBand::Low | CoverageBand::Mid | CoverageBand::High => {
                    let y_norm = (p.y - range.min) / span;
                    DisplayPoint {
                        x: p.x,
                        y: p.y,
                        y_norm: Some(y_norm),
                        y_display: y_norm * self.params.scale + base,
                    }
                }
            })
            .collect()
    }

    /// `y_display` interval one slot can occupy for data within `range`.
    pub fn slot_extent(&self, slot: f64, band: CoverageBand, range: DisplayRange) -> (f64, f64) {
        let base = slot * self.params.offset(band);
        match band {
            CoverageBand::Raw => (range.min + base, range.max + base),
            _ => (base, base + self.params.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn extent(points: &[DisplayPoint]) -> (f64, f64) {
        points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y_display), hi.max(p.y_display))
        })
    }

    #[test]
    fn normalized_band() {
        let mapper = DisplayMapper::new(DisplayParams::default());
        let s = PointSeries::from_pairs([(1.0, 10.0), (2.0, 15.0), (3.0, 20.0)]);
        let out = mapper.map_to_display(&s, 2.0, CoverageBand::Low, DisplayRange::new(10.0, 20.0));

        let norms: Vec<f64> = out.iter().map(|p| p.y_norm.unwrap()).collect();
        assert_eq!(norms, vec![0.0, 0.5, 1.0]);
        assert_relative_eq!(out[0].y_display, 3e7);
        assert_relative_eq!(out[1].y_display, 0.5 * 6e7 + 3e7);
        assert_relative_eq!(out[2].y_display, 6e7 + 3e7);
        assert_eq!(out[1].x, 2.0);
        assert_eq!(out[1].y, 15.0);
    }

    #[test]
    fn high_band_uses_wider_offset() {
        let mapper = DisplayMapper::new(DisplayParams::default());
        let s = PointSeries::from_pairs([(1.0, 0.0)]);
        let range = DisplayRange::new(0.0, 1.0);
        let mid = mapper.map_to_display(&s, 1.0, CoverageBand::Mid, range);
        let high = mapper.map_to_display(&s, 1.0, CoverageBand::High, range);
        assert_relative_eq!(mid[0].y_display, 1.5e7);
        assert_relative_eq!(high[0].y_display, 3e7);
    }

    #[test]
    fn raw_band_keeps_magnitudes() {
        let mapper = DisplayMapper::new(DisplayParams::default());
        let s = PointSeries::from_pairs([(1.0, 100.0), (2.0, 250.0)]);
        let out = mapper.map_to_display(&s, 3.0, CoverageBand::Raw, DisplayRange::new(0.0, 1e9));
        assert!(out.iter().all(|p| p.y_norm.is_none()));
        assert_relative_eq!(out[0].y_display, 100.0 + 2.1e8);
        assert_relative_eq!(out[1].y_display - out[0].y_display, 150.0);
    }

    #[test]
    fn flat_cohort_does_not_divide_by_zero() {
        let mapper = DisplayMapper::new(DisplayParams::default());
        let s = PointSeries::from_pairs([(1.0, 7.0), (2.0, 7.0), (3.0, 7.0)]);
        let out = mapper.map_to_display(&s, 1.0, CoverageBand::Low, DisplayRange::new(7.0, 7.0));
        for p in &out {
            assert_eq!(p.y_norm, Some(0.0));
            assert!(p.y_display.is_finite());
            assert_relative_eq!(p.y_display, 1.5e7);
        }
    }

    #[test]
    fn separated_slots_do_not_overlap() {
        let params = DisplayParams {
            low_mid_offset: 1e8,
            ..DisplayParams::default()
        };
        let mapper = DisplayMapper::new(params);
        let range = DisplayRange::new(-5.0, 40.0);
        let a = PointSeries::from_pairs([(1.0, -5.0), (2.0, 12.0), (3.0, 40.0)]);
        let b = PointSeries::from_pairs([(1.0, 40.0), (2.0, 0.0), (3.0, -5.0)]);

        let lower = extent(&mapper.map_to_display(&a, 1.0, CoverageBand::Low, range));
        let upper = extent(&mapper.map_to_display(&b, 2.0, CoverageBand::Low, range));
        assert!(lower.1 < upper.0);

        let (lo1, hi1) = mapper.slot_extent(1.0, CoverageBand::Low, range);
        assert!(lo1 <= lower.0 && lower.1 <= hi1);
    }
}
