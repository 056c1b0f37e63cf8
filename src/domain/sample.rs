use crate::domain::experiment::MetricKind;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// First-column token that marks the summary row of a harness log.
pub const SENTINEL: &str = "||";

/// Raw cycle/count values are reported in thousands.
pub const UNIT_DIVISOR: f64 = 1000.0;

/// Converts a raw harness value to the thousands unit, truncating toward zero.
pub fn to_thousands(raw: f64) -> i64 {
    (raw / UNIT_DIVISOR).trunc() as i64
}

/// Column offsets extracted from a sentinel row, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSet(&'static [usize]);

impl ColumnSet {
    /// Agreement logs: `|| avg avg_stdv`.
    pub const AGREE: ColumnSet = ColumnSet(&[1, 2]);
    /// KVS logs: write and read response time with their spreads.
    pub const KVS_RESPONSE_TIME: ColumnSet = ColumnSet(&[1, 2, 5, 6]);
    /// KVS logs: write and read throughput with their spreads.
    pub const KVS_THROUGHPUT: ColumnSet = ColumnSet(&[3, 4, 7, 8]);

    pub fn kvs(kind: MetricKind) -> Self {
        match kind {
            MetricKind::ResponseTime => Self::KVS_RESPONSE_TIME,
            MetricKind::Throughput => Self::KVS_THROUGHPUT,
        }
    }

    pub fn indices(&self) -> &'static [usize] {
        self.0
    }

}

/// One client's sentinel row, already converted to thousands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    values: Vec<i64>,
}

impl Sample {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Mean and spread of one measured dimension.
///
/// `spread` is the mean of the per-client "stdv" column, not a standard
/// deviation across clients.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeanSpread {
    pub mean: f64,
    pub spread: f64,
}

impl MeanSpread {
    pub fn new(mean: f64, spread: f64) -> Self {
        Self { mean, spread }
    }
}

/// How one field is reduced across client samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Sum,
}

/// Per-field reduction over every client sample that parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    fields: Vec<f64>,
    samples: usize,
}

impl Aggregate {
    /// Averages every field. Returns `None` for an empty sample set.
    pub fn mean_of(samples: &[Sample]) -> Option<Self> {
        Self::reduce(samples, |_| Reduction::Mean)
    }

    /// Reduces field `i` with `reduction(i)`. Returns `None` for an empty
    /// sample set so callers never see a fabricated zero.
    pub fn reduce<F>(samples: &[Sample], reduction: F) -> Option<Self>
    where
        F: Fn(usize) -> Reduction,
    {
        let width = samples.first()?.values().len();
        let fields = (0..width)
            .map(|i| {
                let column: Vec<f64> = samples
                    .iter()
                    .map(|s| s.values().get(i).copied().unwrap_or_default() as f64)
                    .collect();
                match reduction(i) {
                    Reduction::Mean => column.iter().mean(),
                    Reduction::Sum => column.iter().sum(),
                }
            })
            .collect();

        Some(Self {
            fields,
            samples: samples.len(),
        })
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    /// Number of client samples the aggregate was built from.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Consecutive `(mean, spread)` field pairs.
    pub fn pairs(&self) -> Vec<MeanSpread> {
        self.fields
            .chunks_exact(2)
            .map(|pair| MeanSpread::new(pair[0], pair[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_thousands_truncates_toward_zero() {
        assert_eq!(to_thousands(4999.999), 4);
        assert_eq!(to_thousands(5000.0), 5);
        assert_eq!(to_thousands(999.0), 0);
        assert_eq!(to_thousands(-1500.0), -1);
    }

    #[test]
    fn test_empty_aggregate_is_absent() {
        assert!(Aggregate::mean_of(&[]).is_none());
    }

    #[test]
    fn test_mean_of_identical_samples() {
        let samples = vec![Sample::new(vec![7, 3]); 5];
        let agg = Aggregate::mean_of(&samples).unwrap();
        assert_eq!(agg.fields(), &[7.0, 3.0]);
        assert_eq!(agg.sample_count(), 5);
    }

    #[test]
    fn test_reduce_with_sum() {
        let samples = vec![Sample::new(vec![10, 2]), Sample::new(vec![20, 4])];
        let agg = Aggregate::reduce(&samples, |i| {
            if i == 0 {
                Reduction::Sum
            } else {
                Reduction::Mean
            }
        })
        .unwrap();
        assert_eq!(agg.fields(), &[30.0, 3.0]);
    }

    #[test]
    fn test_pairs() {
        let samples = vec![Sample::new(vec![1, 2, 3, 4])];
        let agg = Aggregate::mean_of(&samples).unwrap();
        assert_eq!(
            agg.pairs(),
            vec![MeanSpread::new(1.0, 2.0), MeanSpread::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_kvs_columns() {
        assert_eq!(ColumnSet::kvs(MetricKind::ResponseTime).indices(), &[1, 2, 5, 6]);
        assert_eq!(ColumnSet::kvs(MetricKind::Throughput).indices(), &[3, 4, 7, 8]);
        assert_eq!(ColumnSet::AGREE.indices(), &[1, 2]);
    }
}
