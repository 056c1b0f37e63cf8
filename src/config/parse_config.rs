//! Parsing configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Tree topology name the harness uses for library runs.
pub const DEFAULT_TREE: &str = "adaptivetree";

/// Clients per agreement run, as fixed by the harness scripts.
pub const DEFAULT_AGREE_CLIENTS: u32 = 4;

/// Parser environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEnvConfig {
    pub tree: String,
    pub agree_clients: u32,
    pub output_dir: PathBuf,
    /// Report KVS throughput as the total over clients rather than the mean.
    pub kvs_sum_throughput: bool,
}

impl Default for ParseEnvConfig {
    fn default() -> Self {
        Self {
            tree: DEFAULT_TREE.to_string(),
            agree_clients: DEFAULT_AGREE_CLIENTS,
            output_dir: PathBuf::from("."),
            kvs_sum_throughput: false,
        }
    }
}

impl ParseEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tree = lookup("SMELT_TREE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.tree);

        let agree_clients = lookup("SMELT_AGREE_CLIENTS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.agree_clients);

        let output_dir = lookup("SMELT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let kvs_sum_throughput = lookup("SMELT_KVS_SUM_THROUGHPUT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.kvs_sum_throughput);

        Self {
            tree,
            agree_clients,
            output_dir,
            kvs_sum_throughput,
        }
    }
}
