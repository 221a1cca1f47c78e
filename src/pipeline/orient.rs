use crate::data::model::{cmp_x, Point, PointSeries};

/// Least-squares slope of `y` on `x`.
///
/// Centred sums keep the fit stable at chromosome-scale coordinates.
/// `None` when fewer than two points or all `x` coincide.
pub fn least_squares_slope(points: &[Point]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), p| {
        let dx = p.x - mean_x;
        (sxy + dx * (p.y - mean_y), sxx + dx * dx)
    });
    if sxx <= 0.0 {
        return None;
    }
    Some(sxy / sxx)
}

/// Mirror every `y` about the middle of its own range: `y' = (min + max) - y`.
pub fn reflect_y(points: &mut [Point]) {
    let Some(first) = points.first() else {
        return;
    };
    let (lo, hi) = points
        .iter()
        .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let axis = lo + hi;
    for p in points.iter_mut() {
        p.y = axis - p.y;
    }
}

/// Result of orienting a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Oriented {
    pub series: PointSeries,
    pub reversed: bool,
    pub reflected: bool,
}

/// Put `series` in left-to-right order and undo a negative trend in `y`.
pub fn orient(series: PointSeries) -> Oriented {
    if series.len() < 2 {
        return Oriented {
            series,
            reversed: false,
            reflected: false,
        };
    }

    let mut points = series.into_points();
    let reversed = points[0].x > points[points.len() - 1].x;
    if reversed {
        points.reverse();
    }
    points.sort_by(cmp_x);

    let reflected = matches!(least_squares_slope(&points), Some(a) if a < 0.0);
    if reflected {
        reflect_y(&mut points);
    }

    Oriented {
        series: PointSeries::new(points),
        reversed,
        reflected,
    }
}

/// [`orient`] without the bookkeeping.
pub fn normalize(series: PointSeries) -> PointSeries {
    let oriented = orient(series);
    if oriented.reversed || oriented.reflected {
        log::debug!(
            "orientation: reversed={} reflected={}",
            oriented.reversed,
            oriented.reflected
        );
    }
    oriented.series
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn slope_of_line() {
        let pts: Vec<Point> = (0..10)
            .map(|i| Point::new(1e8 + i as f64 * 1e6, 3.0 - 2.0 * i as f64 * 1e6))
            .collect();
        assert_relative_eq!(least_squares_slope(&pts).unwrap(), -2.0, epsilon = 1e-9);
        assert_eq!(least_squares_slope(&pts[..1]), None);
        assert_eq!(
            least_squares_slope(&[Point::new(1.0, 1.0), Point::new(1.0, 5.0)]),
            None
        );
    }

    #[test]
    fn tiny_series_unchanged() {
        let one = PointSeries::from_pairs([(9.0, 4.0)]);
        assert_eq!(normalize(one.clone()), one);
        assert_eq!(normalize(PointSeries::default()), PointSeries::default());
    }

    #[test]
    fn unsorted_scenario() {
        let s = PointSeries::from_pairs([(10.0, 5.0), (30.0, 1.0), (50.0, 9.0)]);
        let out = normalize(s);
        assert_eq!(out.xs(), vec![10.0, 30.0, 50.0]);
        assert!(least_squares_slope(out.points()).unwrap() >= -1e-9);
    }

    #[test]
    fn reversed_and_inverted_series() {
        let s = PointSeries::from_pairs([(50.0, 1.0), (40.0, 2.0), (30.0, 3.0), (20.0, 4.0)]);
        let oriented = orient(s);
        assert!(oriented.reversed);
        assert!(oriented.reflected);
        assert_eq!(oriented.series.xs(), vec![20.0, 30.0, 40.0, 50.0]);
        assert_eq!(oriented.series.ys(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn reversed_read_direction_only() {
        let s = PointSeries::from_pairs([(50.0, 4.0), (40.0, 3.0), (30.0, 2.0), (20.0, 1.0)]);
        let oriented = orient(s);
        assert!(oriented.reversed);
        assert!(!oriented.reflected);
        assert_eq!(oriented.series.ys(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn reflection_keeps_range() {
        let s = PointSeries::from_pairs([(1.0, 90.0), (2.0, 70.0), (3.0, 40.0), (4.0, 10.0)]);
        let out = orient(s.clone());
        assert!(out.reflected);
        assert_eq!(out.series.y_extent(), s.y_extent());
        assert_eq!(out.series.ys(), vec![10.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn reflection_twice_is_identity() {
        let original = vec![
            Point::new(1.0, 12.0),
            Point::new(2.0, -7.0),
            Point::new(3.0, 40.0),
            Point::new(4.0, 3.0),
        ];
        let mut pts = original.clone();
        reflect_y(&mut pts);
        assert_ne!(pts, original);
        reflect_y(&mut pts);
        assert_eq!(pts, original);
    }

    #[test]
    fn output_is_sorted_with_nonnegative_slope() {
        let cases = [
            vec![(5.0, 1.0), (1.0, 3.0), (3.0, 2.0), (2.0, 8.0), (4.0, -1.0)],
            vec![(1e8, 2e7), (9e7, 2.1e7), (1.2e8, 1e7), (1.1e8, 1.5e7)],
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.5)],
        ];
        for case in cases {
            let out = normalize(PointSeries::from_pairs(case));
            assert!(out.is_sorted_by_x());
            if let Some(a) = least_squares_slope(out.points()) {
                assert!(a >= -1e-9, "slope {a}");
            }
        }
    }
}
