//! Key-value store benchmark parsing.

use crate::application::aggregator::SampleAggregator;
use crate::domain::errors::SampleError;
use crate::domain::experiment::{MetricKind, Variant};
use crate::domain::report::{KvsReportLine, kvs_report_name};
use crate::domain::sample::ColumnSet;
use crate::infrastructure::locator::LogFile;
use crate::infrastructure::report_store::write_report;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output fields holding the write and read throughput means.
const THROUGHPUT_MEAN_FIELDS: [usize; 2] = [0, 2];

/// Inputs of one KVS parse run.
#[derive(Debug, Clone)]
pub struct KvsSettings {
    pub input_dir: PathBuf,
    pub max_clients: u32,
    pub tree: String,
    /// Report throughput as the total over all clients instead of the mean.
    pub sum_throughput: bool,
}

pub struct KvsParser {
    settings: KvsSettings,
}

impl KvsParser {
    pub fn new(settings: KvsSettings) -> Self {
        Self { settings }
    }

    fn aggregator(&self, kind: MetricKind) -> SampleAggregator {
        let aggregator = SampleAggregator::new(ColumnSet::kvs(kind));
        if kind == MetricKind::Throughput && self.settings.sum_throughput {
            aggregator.with_totals(&THROUGHPUT_MEAN_FIELDS)
        } else {
            aggregator
        }
    }

    /// Aggregates every client count `0..=max_clients`, sequential runs first.
    pub fn collect(&self, kind: MetricKind) -> Result<Vec<KvsReportLine>, SampleError> {
        let aggregator = self.aggregator(kind);
        let mut lines = Vec::new();

        for variant in [Variant::Sequential, Variant::Smelt] {
            let tree = (variant == Variant::Smelt).then(|| self.settings.tree.clone());
            for clients in 0..=self.settings.max_clients {
                let paths: Vec<PathBuf> = (0..clients)
                    .map(|client| {
                        LogFile::KvsClient {
                            client,
                            clients,
                            tree: tree.clone(),
                        }
                        .path(&self.settings.input_dir)
                    })
                    .collect();

                let Some(agg) = aggregator.aggregate(&paths)? else {
                    continue;
                };
                if let [write, read] = agg.pairs().as_slice() {
                    lines.push(KvsReportLine {
                        clients,
                        variant,
                        write: *write,
                        read: *read,
                    });
                }
            }
        }

        Ok(lines)
    }

    /// Collects `kind` and writes it to `{output_dir}/{rt|tp}_numc{max_clients}`.
    pub fn run(&self, kind: MetricKind, output_dir: &Path) -> anyhow::Result<PathBuf> {
        info!(
            "Parsing {} from directory {}",
            kind,
            self.settings.input_dir.display()
        );
        let lines = self.collect(kind)?;
        if lines.is_empty() {
            warn!("No {} samples found, writing an empty report", kind);
        }
        debug!("{:?}", lines);

        let path = output_dir.join(kvs_report_name(kind, self.settings.max_clients));
        write_report(&path, &lines)?;
        Ok(path)
    }
}
