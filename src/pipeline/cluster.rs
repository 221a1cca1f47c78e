use crate::error::ClusterError;

/// Label of a point that belongs to no cluster.
pub const NOISE: i32 = -1;

/// Density clustering over one coordinate.
///
/// Returns one label per input value. Labels are arbitrary non-negative
/// integers that only mean "same group"; [`NOISE`] marks unclustered points.
pub trait DensityClusterer {
    fn cluster(&self, values: &[f64], eps: f64, min_samples: usize) -> Result<Vec<i32>, ClusterError>;
}

// ---------------------------------------------------------------------------
// DBSCAN on a line
// ---------------------------------------------------------------------------

/// DBSCAN specialised to one dimension.
///
/// A value is a core point when at least `min_samples` values (itself
/// included) lie within `eps` of it. On a line, two consecutive core points
/// are density-connected exactly when they are within `eps` of each other,
/// so clusters fall out of a single sweep over the sorted values. Border
/// points join the nearest reachable core point's cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dbscan1d;

impl DensityClusterer for Dbscan1d {
    fn cluster(&self, values: &[f64], eps: f64, min_samples: usize) -> Result<Vec<i32>, ClusterError> {
        let n = values.len();
        if n == 0 {
            return Err(ClusterError::EmptyInput);
        }
        if !(eps.is_finite() && eps > 0.0) {
            return Err(ClusterError::InvalidEps(eps));
        }
        if min_samples == 0 {
            return Err(ClusterError::InvalidMinSamples);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClusterError::NonFinite { index });
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();

        // neighbourhood sizes with a sliding window
        let mut core = vec![false; n];
        let (mut lo, mut hi) = (0usize, 0usize);
        for r in 0..n {
            while sorted[r] - sorted[lo] > eps {
                lo += 1;
            }
            if hi < r {
                hi = r;
            }
            while hi + 1 < n && sorted[hi + 1] - sorted[r] <= eps {
                hi += 1;
            }
            core[r] = hi - lo + 1 >= min_samples;
        }

        // chain core points
        let mut labels = vec![NOISE; n];
        let mut next_label = 0;
        let mut last_core: Option<usize> = None;
        for r in (0..n).filter(|&r| core[r]) {
            labels[r] = match last_core {
                Some(p) if sorted[r] - sorted[p] <= eps => labels[p],
                _ => {
                    next_label += 1;
                    next_label - 1
                }
            };
            last_core = Some(r);
        }

        // border points: closest core on either side within eps
        let mut prev_core = vec![None; n];
        let mut seen = None;
        for r in 0..n {
            if core[r] {
                seen = Some(r);
            }
            prev_core[r] = seen;
        }
        let mut next_core = None;
        for r in (0..n).rev() {
            if core[r] {
                next_core = Some(r);
                continue;
            }
            let before = prev_core[r].map(|c| (sorted[r] - sorted[c], c));
            let after = next_core.map(|c: usize| (sorted[c] - sorted[r], c));
            let nearest = match (before, after) {
                (Some(b), Some(a)) => Some(if a.0 < b.0 { a } else { b }),
                (b, a) => b.or(a),
            };
            if let Some((dist, c)) = nearest {
                if dist <= eps {
                    labels[r] = labels[c];
                }
            }
        }

        let mut out = vec![NOISE; n];
        for (r, &i) in order.iter().enumerate() {
            out[i] = labels[r];
        }
        Ok(out)
    }
}
