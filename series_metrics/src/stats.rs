//! Descriptive statistics over the defined daily returns, shaped like a
//! dataframe `describe()` row set: count, mean, std, min, quartiles, max.

use serde::Serialize;

/// Fixed-shape summary of a sample of daily returns.
///
/// Every field except `count` is `None` when the sample is empty (series
/// with fewer than two bars); `std` additionally needs at least two
/// samples. Undefined statistics are reported, never panicked on.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SummaryStatistics {
    /// Number of defined daily returns (series length minus one, floored
    /// at zero).
    pub count: usize,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (n−1 denominator).
    pub std: Option<f64>,
    /// Smallest sample.
    pub min: Option<f64>,
    /// 25th percentile.
    pub p25: Option<f64>,
    /// Median.
    pub p50: Option<f64>,
    /// 75th percentile.
    pub p75: Option<f64>,
    /// Largest sample.
    pub max: Option<f64>,
}

impl SummaryStatistics {
    /// Describes `samples`; an empty slice yields the all-undefined record.
    pub fn describe(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;

        let std = if count > 1 {
            let variance = samples
                .iter()
                .map(|x| (x - mean) * (x - mean))
                .sum::<f64>()
                / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            count,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            p25: Some(percentile(&sorted, 0.25)),
            p50: Some(percentile(&sorted, 0.50)),
            p75: Some(percentile(&sorted, 0.75)),
            max: sorted.last().copied(),
        }
    }

    /// The `(label, value)` rows of the record, in `describe()` order.
    ///
    /// `count` is reported as a float so the rows are homogeneous, the way
    /// dataframe describe output is.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Quantile by linear interpolation between closest ranks.
///
/// `sorted` must be ascending and non-empty; `q` in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}
