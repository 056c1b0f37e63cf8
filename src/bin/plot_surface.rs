//! Renders `x y z` samples as a 3D surface.

use anyhow::{Context, Result, bail};
use clap::Parser;
use smeltbench::application::plotting::surface::{
    SurfaceGrid, parse_surface_points, render_surface,
};
use smeltbench::config::PlotStyle;
use smeltbench::infrastructure::init_logging;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sample file; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value = "surface.svg")]
    output: PathBuf,

    /// TOML file overriding the chart style
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let style = PlotStyle::load(cli.style.as_deref())?;

    let points = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .context(format!("Failed to open samples: {}", path.display()))?;
            parse_surface_points(BufReader::new(file))?
        }
        None => parse_surface_points(io::stdin().lock())?,
    };

    let Some(grid) = SurfaceGrid::from_points(&points)? else {
        bail!("No surface points in input");
    };
    info!("Grid {} x {}", grid.width(), grid.depth());

    render_surface(&cli.output, &grid, &style)?;
    info!("Wrote {}", cli.output.display());
    Ok(())
}
