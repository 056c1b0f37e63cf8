//! Configuration module for smeltbench.
//!
//! Defaults come from environment variables (optionally loaded from `.env`),
//! command-line flags override them. Chart styling can also be read from a
//! TOML file.

mod parse_config;
mod plot_config;

pub use parse_config::ParseEnvConfig;
pub use plot_config::PlotStyle;
