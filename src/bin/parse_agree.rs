//! Aggregates agreement benchmark logs into `tp_r{n}` and `rt_r{n}` reports.

use anyhow::{Context, Result};
use clap::Parser;
use smeltbench::application::{AgreeParser, AgreeSettings};
use smeltbench::config::ParseEnvConfig;
use smeltbench::domain::experiment::MetricKind;
use smeltbench::infrastructure::init_logging;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the raw benchmark output
    #[arg(long, default_value = ".")]
    fpath: PathBuf,

    /// Largest replica count to look for
    #[arg(long)]
    max_replicas: u32,

    /// Tree topology of the library runs (env: SMELT_TREE)
    #[arg(long)]
    tree: Option<String>,

    /// Clients per run (env: SMELT_AGREE_CLIENTS)
    #[arg(long)]
    clients: Option<u32>,

    /// Where reports are written (env: SMELT_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let env = ParseEnvConfig::from_env();
    let output_dir = cli.output_dir.unwrap_or(env.output_dir);
    std::fs::create_dir_all(&output_dir)
        .context(format!("Failed to create output dir: {}", output_dir.display()))?;

    let parser = AgreeParser::new(AgreeSettings {
        input_dir: cli.fpath,
        max_replicas: cli.max_replicas,
        clients: cli.clients.unwrap_or(env.agree_clients),
        tree: cli.tree.unwrap_or(env.tree),
    });

    for kind in [MetricKind::Throughput, MetricKind::ResponseTime] {
        let path = parser
            .run(kind, &output_dir)
            .with_context(|| format!("Failed to build {} report", kind))?;
        info!("{} report: {}", kind, path.display());
    }

    Ok(())
}
