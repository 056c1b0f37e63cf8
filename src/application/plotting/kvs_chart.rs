use super::bar_chart::{BarChart, render_bar_chart};
use crate::config::PlotStyle;
use crate::domain::errors::PlotError;
use crate::domain::experiment::{MetricKind, Variant};
use crate::domain::report::{KvsReportLine, kvs_report_name};
use crate::domain::sample::MeanSpread;
use crate::infrastructure::report_store::read_kvs_report;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which half of a KVS report row is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Write,
    Read,
}

impl Operation {
    pub const fn prefix(&self) -> &'static str {
        match self {
            Operation::Write => "w",
            Operation::Read => "r",
        }
    }

    fn stats(&self, line: &KvsReportLine) -> MeanSpread {
        match self {
            Operation::Write => line.write,
            Operation::Read => line.read,
        }
    }

    pub const fn y_desc(&self, kind: MetricKind) -> &'static str {
        match (self, kind) {
            (Operation::Write, MetricKind::Throughput) => "Set throughput [x1000 sets/s]",
            (Operation::Read, MetricKind::Throughput) => "Get throughput [x1000 gets/s]",
            (Operation::Write, MetricKind::ResponseTime) => "Set time [x1000 cycles]",
            (Operation::Read, MetricKind::ResponseTime) => "Get time [x1000 cycles]",
        }
    }
}

pub fn kvs_chart(lines: &[KvsReportLine], op: Operation, kind: MetricKind) -> BarChart {
    let series = [Variant::Sequential, Variant::Smelt]
        .into_iter()
        .map(|variant| {
            let points = lines
                .iter()
                .filter(|l| l.variant == variant)
                .map(|l| {
                    let stats = op.stats(l);
                    (l.clients, stats.mean, stats.spread)
                })
                .collect();
            (variant.to_string(), points)
        })
        .collect();

    BarChart::from_series(series, "Number of clients", op.y_desc(kind), None)
}

/// Renders `{plotname}-{w|r}-{tp|rt}.svg` from the `*_numc{max_clients}` reports in `dir`.
///
/// A missing report skips its two charts.
pub fn plot_kvs(
    dir: &Path,
    plotname: &str,
    max_clients: u32,
    style: &PlotStyle,
) -> Result<Vec<PathBuf>, PlotError> {
    let mut written = Vec::new();

    for kind in [MetricKind::Throughput, MetricKind::ResponseTime] {
        let report = dir.join(kvs_report_name(kind, max_clients));
        if !report.is_file() {
            warn!("Report {} not found, skipping", report.display());
            continue;
        }
        let lines = read_kvs_report(&report)?;

        for op in [Operation::Write, Operation::Read] {
            let chart = kvs_chart(&lines, op, kind);
            if chart.is_empty() {
                warn!("No {} rows in {}", kind, report.display());
                continue;
            }
            let path = PathBuf::from(format!(
                "{}-{}-{}.svg",
                plotname,
                op.prefix(),
                kind.prefix()
            ));
            render_bar_chart(&path, &chart, style)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(clients: u32, variant: Variant, write: f64, read: f64) -> KvsReportLine {
        KvsReportLine {
            clients,
            variant,
            write: MeanSpread::new(write, 1.0),
            read: MeanSpread::new(read, 2.0),
        }
    }

    #[test]
    fn test_split_into_write_and_read() {
        let lines = vec![
            line(2, Variant::Sequential, 10.0, 20.0),
            line(1, Variant::Sequential, 5.0, 6.0),
            line(2, Variant::Smelt, 30.0, 40.0),
        ];

        let writes = kvs_chart(&lines, Operation::Write, MetricKind::Throughput);
        assert_eq!(writes.groups, vec!["1", "2"]);
        assert_eq!(writes.series[0].label, "sequential");
        assert_eq!(writes.series[0].points[1].value, 10.0);
        assert_eq!(writes.series[1].points[0].group, 1);
        assert_eq!(writes.y_desc, "Set throughput [x1000 sets/s]");

        let reads = kvs_chart(&lines, Operation::Read, MetricKind::ResponseTime);
        assert_eq!(reads.series[1].points[0].value, 40.0);
        assert_eq!(reads.series[1].points[0].error, 2.0);
        assert_eq!(reads.y_desc, "Get time [x1000 cycles]");
    }

    #[test]
    fn test_missing_reports_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let plotname = dir.path().join("plot");
        let written = plot_kvs(
            dir.path(),
            plotname.to_str().unwrap(),
            4,
            &PlotStyle::default(),
        )
        .unwrap();
        assert!(written.is_empty());
    }
}
