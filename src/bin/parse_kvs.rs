//! Aggregates key-value store client logs into `tp_numc{n}` and `rt_numc{n}` reports.

use anyhow::{Context, Result};
use clap::Parser;
use smeltbench::application::{KvsParser, KvsSettings};
use smeltbench::config::ParseEnvConfig;
use smeltbench::domain::experiment::MetricKind;
use smeltbench::infrastructure::init_logging;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the raw client logs
    #[arg(long, default_value = ".")]
    fpath: PathBuf,

    /// Largest client count to look for
    #[arg(long)]
    max_clients: u32,

    /// Tree topology of the library runs (env: SMELT_TREE)
    #[arg(long)]
    tree: Option<String>,

    /// Where reports are written (env: SMELT_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Report throughput as the total over clients (env: SMELT_KVS_SUM_THROUGHPUT)
    #[arg(long)]
    sum_throughput: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let env = ParseEnvConfig::from_env();
    let output_dir = cli.output_dir.unwrap_or(env.output_dir);
    std::fs::create_dir_all(&output_dir)
        .context(format!("Failed to create output dir: {}", output_dir.display()))?;

    let parser = KvsParser::new(KvsSettings {
        input_dir: cli.fpath,
        max_clients: cli.max_clients,
        tree: cli.tree.unwrap_or(env.tree),
        sum_throughput: cli.sum_throughput || env.kvs_sum_throughput,
    });

    for kind in [MetricKind::Throughput, MetricKind::ResponseTime] {
        let path = parser
            .run(kind, &output_dir)
            .with_context(|| format!("Failed to build {} report", kind))?;
        info!("{} report: {}", kind, path.display());
    }

    Ok(())
}
