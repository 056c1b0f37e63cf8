use crate::domain::errors::SampleError;
use crate::domain::sample::{Aggregate, ColumnSet, Reduction, Sample};
use crate::infrastructure::log_reader::read_sample;
use std::path::Path;
use tracing::debug;

/// Reduces one log file per client into a single [`Aggregate`].
#[derive(Debug, Clone)]
pub struct SampleAggregator {
    columns: ColumnSet,
    totals: Vec<usize>,
}

impl SampleAggregator {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            totals: Vec::new(),
        }
    }

    /// Sums the given output fields across clients instead of averaging them.
    pub fn with_totals(mut self, fields: &[usize]) -> Self {
        self.totals = fields.to_vec();
        self
    }

    /// Reads every path (missing ones are skipped) and reduces the samples.
    ///
    /// Returns `Ok(None)` when no file yielded a sentinel row.
    pub fn aggregate<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Option<Aggregate>, SampleError> {
        let mut samples = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(sample) = read_sample(path.as_ref(), self.columns)? {
                samples.push(sample);
            }
        }

        debug!(
            "Parsed {} of {} client logs",
            samples.len(),
            paths.len()
        );
        Ok(self.reduce(&samples))
    }

    pub fn reduce(&self, samples: &[Sample]) -> Option<Aggregate> {
        Aggregate::reduce(samples, |i| {
            if self.totals.contains(&i) {
                Reduction::Sum
            } else {
                Reduction::Mean
            }
        })
    }
}

/// Averages the sentinel rows of `paths` field by field.
pub fn aggregate<P: AsRef<Path>>(
    paths: &[P],
    columns: ColumnSet,
) -> Result<Option<Aggregate>, SampleError> {
    SampleAggregator::new(columns).aggregate(paths)
}
