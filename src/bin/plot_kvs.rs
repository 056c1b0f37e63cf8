//! Set and get charts of the key-value store reports.

use anyhow::{Context, Result, bail};
use clap::Parser;
use smeltbench::application::plotting::plot_kvs;
use smeltbench::config::PlotStyle;
use smeltbench::infrastructure::init_logging;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Client count the reports were generated for (`*_numc{n}`)
    #[arg(long)]
    max_clients: u32,

    /// Output prefix of the four charts
    #[arg(long, default_value = "plot")]
    plotname: String,

    /// Directory holding the reports
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

    let written = plot_kvs(&cli.input, &cli.plotname, cli.max_clients, &style)
        .context("Failed to plot key-value store reports")?;
    if written.is_empty() {
        bail!(
            "No reports for {} clients in {}",
            cli.max_clients,
            cli.input.display()
        );
    }
    info!("Wrote {} charts", written.len());

    Ok(())
}
