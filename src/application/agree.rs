//! Agreement benchmark parsing.
//!
//! Response times come from per-client logs under `rep_{n}/` and are averaged
//! across clients. Throughput comes from one replica-side log per
//! configuration and is taken as is.

use crate::application::aggregator::SampleAggregator;
use crate::domain::errors::SampleError;
use crate::domain::experiment::{BelowAlgo, MetricKind, Protocol, Variant};
use crate::domain::report::{AgreeReportLine, agree_report_name};
use crate::domain::sample::ColumnSet;
use crate::infrastructure::locator::{LogFile, locate};
use crate::infrastructure::report_store::write_report;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Inputs of one agreement parse run.
#[derive(Debug, Clone)]
pub struct AgreeSettings {
    pub input_dir: PathBuf,
    pub max_replicas: u32,
    pub clients: u32,
    pub tree: String,
}

pub struct AgreeParser {
    settings: AgreeSettings,
    aggregator: SampleAggregator,
}

impl AgreeParser {
    pub fn new(settings: AgreeSettings) -> Self {
        Self {
            settings,
            aggregator: SampleAggregator::new(ColumnSet::AGREE),
        }
    }

    /// Builds the report rows of `kind` in harness order.
    pub fn collect(&self, kind: MetricKind) -> Result<Vec<AgreeReportLine>, SampleError> {
        info!(
            "Parsing raw output from directory {}",
            self.settings.input_dir.display()
        );
        match kind {
            MetricKind::ResponseTime => self.collect_response_times(),
            MetricKind::Throughput => self.collect_throughput(),
        }
    }

    /// Collects `kind` and writes it to `{output_dir}/{rt|tp}_r{max_replicas}`.
    pub fn run(&self, kind: MetricKind, output_dir: &Path) -> anyhow::Result<PathBuf> {
        let lines = self.collect(kind)?;
        if lines.is_empty() {
            warn!("No {} samples found, writing an empty report", kind);
        }
        debug!("{:?}", lines);

        let path = output_dir.join(agree_report_name(kind, self.settings.max_replicas));
        write_report(&path, &lines)?;
        Ok(path)
    }

    fn client_paths(
        &self,
        replicas: u32,
        protocol: Protocol,
        below: BelowAlgo,
        tree: Option<&str>,
    ) -> Vec<PathBuf> {
        (0..self.settings.clients)
            .map(|client| {
                LogFile::AgreeClient {
                    replicas,
                    client,
                    protocol,
                    below,
                    clients: self.settings.clients,
                    tree: tree.map(str::to_string),
                }
                .path(&self.settings.input_dir)
            })
            .collect()
    }

    /// Aggregates `paths` into one row; `None` when no log carried a sample.
    fn line_from(
        &self,
        paths: &[PathBuf],
        replicas: u32,
        protocol: Protocol,
        variant: Variant,
    ) -> Result<Option<AgreeReportLine>, SampleError> {
        Ok(self.aggregator.aggregate(paths)?.and_then(|agg| {
            agg.pairs().first().map(|stats| AgreeReportLine {
                replicas,
                protocol,
                variant,
                stats: *stats,
            })
        }))
    }

    fn client_line(
        &self,
        replicas: u32,
        protocol: Protocol,
        below: BelowAlgo,
        variant: Variant,
    ) -> Result<Option<AgreeReportLine>, SampleError> {
        let tree = (variant == Variant::Smelt).then_some(self.settings.tree.as_str());
        let paths = self.client_paths(replicas, protocol, below, tree);
        self.line_from(&paths, replicas, protocol, variant)
    }

    fn collect_response_times(&self) -> Result<Vec<AgreeReportLine>, SampleError> {
        let mut lines = Vec::new();

        for protocol in Protocol::all() {
            for below in BelowAlgo::all() {
                for replicas in 0..=self.settings.max_replicas {
                    if let Some(line) =
                        self.client_line(replicas, protocol, below, Variant::Sequential)?
                    {
                        lines.push(line);
                    }
                }
            }
        }

        // Library runs are always layered directly, never on SHM
        for protocol in Protocol::all() {
            for replicas in 0..=self.settings.max_replicas {
                if let Some(line) =
                    self.client_line(replicas, protocol, BelowAlgo::Direct, Variant::Smelt)?
                {
                    lines.push(line);
                }
            }
        }

        Ok(lines)
    }

    fn throughput_line(
        &self,
        file: &LogFile,
        replicas: u32,
        protocol: Protocol,
        variant: Variant,
    ) -> Result<Option<AgreeReportLine>, SampleError> {
        let Some(path) = locate(&self.settings.input_dir, file) else {
            debug!("Skipping missing log {}", file.file_name());
            return Ok(None);
        };
        self.line_from(&[path], replicas, protocol, variant)
    }

    fn collect_throughput(&self) -> Result<Vec<AgreeReportLine>, SampleError> {
        let clients = self.settings.clients;
        let mut lines = Vec::new();

        for protocol in Protocol::all() {
            for below in BelowAlgo::all() {
                for replicas in 0..=self.settings.max_replicas {
                    let file = LogFile::AgreeThroughput {
                        replicas,
                        protocol,
                        below,
                        clients,
                    };
                    let variant = match below {
                        BelowAlgo::Shm => Variant::Hybrid,
                        BelowAlgo::Direct => Variant::Sequential,
                    };
                    let Some(line) = self.throughput_line(&file, replicas, protocol, variant)?
                    else {
                        continue;
                    };
                    lines.push(line);

                    // The tree run is only looked up next to a plain sequential run
                    if variant == Variant::Sequential {
                        let tree_file = LogFile::AgreeTreeThroughput {
                            replicas,
                            protocol,
                            tree: self.settings.tree.clone(),
                            clients,
                        };
                        if let Some(line) =
                            self.throughput_line(&tree_file, replicas, protocol, Variant::Smelt)?
                        {
                            lines.push(line);
                        }
                    }
                }
            }
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::MeanSpread;
    use std::fs;

    fn settings(dir: &Path) -> AgreeSettings {
        AgreeSettings {
            input_dir: dir.to_path_buf(),
            max_replicas: 2,
            clients: 2,
            tree: "adaptivetree".to_string(),
        }
    }

    fn write(dir: &Path, file: &LogFile, row: &str) {
        let path = file.path(dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("Algo header\n{row}\n")).unwrap();
    }

    #[test]
    fn test_response_time_order_and_variants() {
        let dir = tempfile::tempdir().unwrap();
        for client in 0..2 {
            write(
                dir.path(),
                &LogFile::AgreeClient {
                    replicas: 2,
                    client,
                    protocol: Protocol::Broadcast,
                    below: BelowAlgo::Shm,
                    clients: 2,
                    tree: None,
                },
                &format!("||\t{}\t2000", 3000 + client * 2000),
            );
        }
        write(
            dir.path(),
            &LogFile::AgreeClient {
                replicas: 1,
                client: 0,
                protocol: Protocol::OnePaxos,
                below: BelowAlgo::Direct,
                clients: 2,
                tree: Some("adaptivetree".to_string()),
            },
            "||\t9000\t1000",
        );

        let parser = AgreeParser::new(settings(dir.path()));
        let lines = parser.collect(MetricKind::ResponseTime).unwrap();

        assert_eq!(
            lines,
            vec![
                AgreeReportLine {
                    replicas: 2,
                    protocol: Protocol::Broadcast,
                    variant: Variant::Sequential,
                    stats: MeanSpread::new(4.0, 2.0),
                },
                AgreeReportLine {
                    replicas: 1,
                    protocol: Protocol::OnePaxos,
                    variant: Variant::Smelt,
                    stats: MeanSpread::new(9.0, 1.0),
                },
            ]
        );
    }

    #[test]
    fn test_throughput_variants() {
        let dir = tempfile::tempdir().unwrap();
        let base = |below| LogFile::AgreeThroughput {
            replicas: 1,
            protocol: Protocol::Chain,
            below,
            clients: 2,
        };
        write(dir.path(), &base(BelowAlgo::Shm), "||\t100000\t5000\t1");
        write(dir.path(), &base(BelowAlgo::Direct), "||\t200000\t6000\t1");
        write(
            dir.path(),
            &LogFile::AgreeTreeThroughput {
                replicas: 1,
                protocol: Protocol::Chain,
                tree: "adaptivetree".to_string(),
                clients: 2,
            },
            "||\t300000\t7000\t1",
        );

        let parser = AgreeParser::new(settings(dir.path()));
        let lines = parser.collect(MetricKind::Throughput).unwrap();
        let summary: Vec<(Variant, f64)> =
            lines.iter().map(|l| (l.variant, l.stats.mean)).collect();

        assert_eq!(
            summary,
            vec![
                (Variant::Hybrid, 100.0),
                (Variant::Sequential, 200.0),
                (Variant::Smelt, 300.0),
            ]
        );
    }

    #[test]
    fn test_tree_throughput_needs_sequential_run() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            &LogFile::AgreeTreeThroughput {
                replicas: 0,
                protocol: Protocol::OnePaxos,
                tree: "adaptivetree".to_string(),
                clients: 2,
            },
            "||\t300000\t7000",
        );

        let parser = AgreeParser::new(settings(dir.path()));
        assert!(parser.collect(MetricKind::Throughput).unwrap().is_empty());
    }

    #[test]
    fn test_run_writes_named_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let parser = AgreeParser::new(settings(dir.path()));

        let path = parser.run(MetricKind::Throughput, out.path()).unwrap();
        assert_eq!(path, out.path().join("tp_r2"));
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }
}
