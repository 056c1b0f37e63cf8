//! Bar charts of the agreement reports found in a directory.

use anyhow::{Context, Result};
use clap::Parser;
use smeltbench::application::plotting::plot_agree;
use smeltbench::config::PlotStyle;
use smeltbench::domain::experiment::MetricKind;
use smeltbench::infrastructure::init_logging;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output prefix; charts are written to `{plotname}-rt.svg` and `{plotname}-tp.svg`
    #[arg(long, default_value = "plot")]
    plotname: String,

    /// Directory holding the `rt_r*` / `tp_r*` reports
    #[arg(long, default_value = ".")]
    input: PathBuf,

    /// TOML file overriding the chart style
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let style = PlotStyle::load(cli.style.as_deref())?;

    for kind in [MetricKind::ResponseTime, MetricKind::Throughput] {
        let written = plot_agree(&cli.input, &cli.plotname, kind, &style)
            .with_context(|| format!("Failed to plot {}", kind))?;
        if written.is_none() {
            warn!("Skipped {} chart", kind);
        }
    }

    Ok(())
}
