use super::bar_chart::{BarChart, render_bar_chart};
use crate::config::PlotStyle;
use crate::domain::errors::PlotError;
use crate::domain::experiment::{MetricKind, Protocol, Variant};
use crate::domain::report::{AgreeReportLine, agree_report_name};
use crate::infrastructure::report_store::read_agree_report;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Report files `{rt|tp}_r{i}` are looked up for every `i` below this bound.
pub const MAX_REPORT_SCAN: u32 = 100;

/// Bars drawn per replica count, left to right.
pub const AGREE_BARS: [(Protocol, Variant); 6] = [
    (Protocol::OnePaxos, Variant::Sequential),
    (Protocol::Broadcast, Variant::Sequential),
    (Protocol::TwoPhaseCommit, Variant::Sequential),
    (Protocol::OnePaxos, Variant::Smelt),
    (Protocol::Broadcast, Variant::Smelt),
    (Protocol::TwoPhaseCommit, Variant::Smelt),
];

fn y_desc(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::ResponseTime => "Response time [x1000 cycles]",
        MetricKind::Throughput => "Throughput [x1000 agreements/s]",
    }
}

/// Concatenates every `{prefix}_r{i}` report found in `dir`.
pub fn load_agree_reports(dir: &Path, kind: MetricKind) -> Result<Vec<AgreeReportLine>, PlotError> {
    let mut lines = Vec::new();
    for i in 0..MAX_REPORT_SCAN {
        let path = dir.join(agree_report_name(kind, i));
        if !path.is_file() {
            continue;
        }
        info!("Loading {}", path.display());
        lines.extend(read_agree_report(&path)?);
    }
    Ok(lines)
}

pub fn agree_chart(lines: &[AgreeReportLine], kind: MetricKind, style: &PlotStyle) -> BarChart {
    let series = AGREE_BARS
        .iter()
        .map(|&(protocol, variant)| {
            let points = lines
                .iter()
                .filter(|l| l.protocol == protocol && l.variant == variant)
                .map(|l| (l.replicas, l.stats.mean, l.stats.spread))
                .collect();
            (format!("{} {}", protocol.legend_name(), variant), points)
        })
        .collect();

    let y_max = match kind {
        MetricKind::ResponseTime => style.rt_y_max,
        MetricKind::Throughput => style.tp_y_max,
    };
    BarChart::from_series(series, "Number of replicas", y_desc(kind), y_max)
}

/// Renders `{plotname}-{rt|tp}.svg`. Returns `None` when no report rows matched a bar.
pub fn plot_agree(
    dir: &Path,
    plotname: &str,
    kind: MetricKind,
    style: &PlotStyle,
) -> Result<Option<PathBuf>, PlotError> {
    let lines = load_agree_reports(dir, kind)?;
    debug!("Loaded {} {} rows", lines.len(), kind);

    let chart = agree_chart(&lines, kind, style);
    if chart.is_empty() {
        warn!("No {} data to plot in {}", kind, dir.display());
        return Ok(None);
    }

    let path = PathBuf::from(format!("{}-{}.svg", plotname, kind.prefix()));
    render_bar_chart(&path, &chart, style)?;
    info!("Wrote {}", path.display());
    Ok(Some(path))
}
