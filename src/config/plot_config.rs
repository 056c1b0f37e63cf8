//! Chart styling, from environment variables or a TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Chart dimensions and axis caps
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    /// Upper y bound of agreement response-time charts (x1000 cycles).
    pub rt_y_max: Option<f64>,
    /// Upper y bound of agreement throughput charts (x1000 agreements/s).
    pub tp_y_max: Option<f64>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            font_size: 19,
            rt_y_max: Some(250.0),
            tp_y_max: Some(850.0),
        }
    }
}

impl PlotStyle {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.parse::<f64>().ok());

        Self {
            width: lookup("SMELT_PLOT_WIDTH")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.width),
            height: lookup("SMELT_PLOT_HEIGHT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.height),
            font_size: lookup("SMELT_PLOT_FONT_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.font_size),
            // A non-positive cap lets the chart scale to its data
            rt_y_max: parsed("SMELT_RT_Y_MAX")
                .map(|v| (v > 0.0).then_some(v))
                .unwrap_or(defaults.rt_y_max),
            tp_y_max: parsed("SMELT_TP_Y_MAX")
                .map(|v| (v > 0.0).then_some(v))
                .unwrap_or(defaults.tp_y_max),
        }
    }

    /// Loads a style from a TOML file; absent keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read plot style file: {}", path.display()))?;
        toml::from_str(&content)
            .context(format!("Failed to parse plot style TOML: {}", path.display()))
    }

    /// The style file wins over the environment when given.
    pub fn load(style_file: Option<&Path>) -> Result<Self> {
        match style_file {
            Some(path) => Self::from_toml_file(path),
            None => Ok(Self::from_env()),
        }
    }
}
