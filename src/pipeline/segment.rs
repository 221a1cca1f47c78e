use std::collections::BTreeMap;

use crate::config::ClusteringParams;
use crate::data::model::{cmp_x, Point, PointSeries};
use crate::error::ClusterError;

use super::cluster::{DensityClusterer, Dbscan1d, NOISE};

/// One dense run of points along the reference axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    pub label: i32,
    /// Sorted by `x`.
    pub points: Vec<Point>,
    pub median_x: f64,
}

impl Arm {
    fn new(label: i32, mut points: Vec<Point>) -> Self {
        points.sort_by(cmp_x);
        let median_x = median_of_sorted(&points);
        Self {
            label,
            points,
            median_x,
        }
    }
}

fn median_of_sorted(points: &[Point]) -> f64 {
    let n = points.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        points[n / 2].x
    } else {
        0.5 * (points[n / 2 - 1].x + points[n / 2].x)
    }
}

// ---------------------------------------------------------------------------
// ArmSegmenter
// ---------------------------------------------------------------------------

/// Splits a series into arms, drops noise and lays the arms out left to right.
#[derive(Debug, Clone)]
pub struct ArmSegmenter<C = Dbscan1d> {
    clusterer: C,
    params: ClusteringParams,
}

impl ArmSegmenter<Dbscan1d> {
    pub fn new(params: ClusteringParams) -> Self {
        Self::with_clusterer(Dbscan1d, params)
    }
}

impl<C: DensityClusterer> ArmSegmenter<C> {
    pub fn with_clusterer(clusterer: C, params: ClusteringParams) -> Self {
        Self { clusterer, params }
    }

    /// Arms of `series`, ordered by median `x`. Empty when every point is noise.
    pub fn arms(&self, series: &PointSeries) -> Result<Vec<Arm>, ClusterError> {
        let xs = series.xs();
        let labels = self
            .clusterer
            .cluster(&xs, self.params.eps, self.params.min_samples)?;
        if labels.len() != xs.len() {
            return Err(ClusterError::LabelCount {
                expected: xs.len(),
                got: labels.len(),
            });
        }

        let mut groups: BTreeMap<i32, Vec<Point>> = BTreeMap::new();
        for (p, &label) in series.points().iter().zip(&labels) {
            if label != NOISE {
                groups.entry(label).or_default().push(*p);
            }
        }

        let mut arms: Vec<Arm> = groups
            .into_iter()
            .map(|(label, points)| Arm::new(label, points))
            .collect();
        arms.sort_by(|a, b| a.median_x.total_cmp(&b.median_x));
        Ok(arms)
    }

    /// Segment `series`, surfacing clustering failures to the caller.
    ///
    /// Series shorter than `min_samples`, and series where nothing survives
    /// as an arm, come back unchanged.
    pub fn try_segment(&self, series: &PointSeries) -> Result<PointSeries, ClusterError> {
        if series.len() < self.params.min_samples {
            return Ok(series.clone());
        }

        let arms = self.arms(series)?;
        if arms.is_empty() {
            log::debug!("all {} points are noise, keeping input", series.len());
            return Ok(series.clone());
        }
        if arms.len() > 1 {
            log::debug!(
                "{} arms at median x {:?}",
                arms.len(),
                arms.iter().map(|a| a.median_x).collect::<Vec<_>>()
            );
        }

        Ok(PointSeries::new(
            arms.into_iter().flat_map(|a| a.points).collect(),
        ))
    }

    /// Like [`try_segment`](Self::try_segment), but a clustering failure
    /// falls back to the input with a warning.
    pub fn segment(&self, series: &PointSeries) -> PointSeries {
        match self.try_segment(series) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("arm detection failed, using original data: {e}");
                series.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(eps: f64, min_samples: usize) -> ClusteringParams {
        ClusteringParams { eps, min_samples }
    }

    struct Failing;

    impl DensityClusterer for Failing {
        fn cluster(&self, _: &[f64], _: f64, _: usize) -> Result<Vec<i32>, ClusterError> {
            Err(ClusterError::EmptyInput)
        }
    }

    struct Truncating;

    impl DensityClusterer for Truncating {
        fn cluster(&self, values: &[f64], _: f64, _: usize) -> Result<Vec<i32>, ClusterError> {
            Ok(vec![0; values.len() - 1])
        }
    }

    #[test]
    fn short_series_is_untouched() {
        let s = PointSeries::from_pairs([(50.0, 1.0), (10.0, 2.0)]);
        let out = ArmSegmenter::new(params(1.0, 3)).segment(&s);
        assert_eq!(out, s);
    }

    #[test]
    fn single_cluster_is_sorted() {
        let s = PointSeries::from_pairs([(30.0, 1.0), (10.0, 5.0), (50.0, 9.0)]);
        let out = ArmSegmenter::new(params(100.0, 3)).segment(&s);
        assert_eq!(out.xs(), vec![10.0, 30.0, 50.0]);
        assert_eq!(out.ys(), vec![5.0, 1.0, 9.0]);
    }

    #[test]
    fn arms_are_ordered_by_median_and_noise_dropped() {
        let s = PointSeries::from_pairs([
            (1000.0, 1.0),
            (1002.0, 2.0),
            (1001.0, 3.0),
            (500.0, 99.0),
            (3.0, 4.0),
            (1.0, 5.0),
            (2.0, 6.0),
        ]);
        let segmenter = ArmSegmenter::new(params(5.0, 3));

        let arms = segmenter.arms(&s).unwrap();
        assert_eq!(arms.len(), 2);
        assert_eq!(arms[0].median_x, 2.0);
        assert_eq!(arms[1].median_x, 1001.0);

        let out = segmenter.segment(&s);
        assert_eq!(out.xs(), vec![1.0, 2.0, 3.0, 1000.0, 1001.0, 1002.0]);
        assert_eq!(out.ys(), vec![5.0, 6.0, 4.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn all_noise_returns_input() {
        let s = PointSeries::from_pairs([(0.0, 1.0), (100.0, 2.0), (200.0, 3.0)]);
        let out = ArmSegmenter::new(params(1.0, 3)).segment(&s);
        assert_eq!(out, s);
    }

    #[test]
    fn clustering_failure_falls_back() {
        let s = PointSeries::from_pairs([(3.0, 1.0), (2.0, 2.0), (1.0, 3.0)]);
        let segmenter = ArmSegmenter::with_clusterer(Failing, params(1.0, 3));
        assert_eq!(segmenter.try_segment(&s), Err(ClusterError::EmptyInput));
        assert_eq!(segmenter.segment(&s), s);
    }

    #[test]
    fn label_count_mismatch_is_an_error() {
        let s = PointSeries::from_pairs([(3.0, 1.0), (2.0, 2.0), (1.0, 3.0)]);
        let segmenter = ArmSegmenter::with_clusterer(Truncating, params(1.0, 3));
        assert_eq!(
            segmenter.try_segment(&s),
            Err(ClusterError::LabelCount { expected: 3, got: 2 })
        );
        assert_eq!(segmenter.segment(&s), s);
    }

    #[test]
    fn never_empty_for_nonempty_input() {
        let inputs = [
            PointSeries::from_pairs([(0.0, 0.0)]),
            PointSeries::from_pairs([(0.0, 0.0), (1e9, 1.0), (2e9, 2.0), (3e9, 3.0)]),
            PointSeries::from_pairs((0..50).map(|i| (i as f64 * 1e6, i as f64))),
        ];
        let segmenter = ArmSegmenter::new(ClusteringParams::default());
        for s in &inputs {
            assert!(!segmenter.segment(s).is_empty());
        }
    }
}
