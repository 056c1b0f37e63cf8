//! Harness log file naming.
//!
//! Every variant of [`LogFile`] mirrors one `sprintf` template of the
//! benchmark harness; the produced names must match byte for byte.

use crate::domain::experiment::{BelowAlgo, Protocol};
use std::path::{Path, PathBuf};

/// Parameter record identifying one harness output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFile {
    /// Per-client agreement response times, written under `rep_{replicas}/`.
    /// `tree` is set for runs on the tree-based library.
    AgreeClient {
        replicas: u32,
        client: u32,
        protocol: Protocol,
        below: BelowAlgo,
        clients: u32,
        tree: Option<String>,
    },
    /// Replica-side agreement throughput of a sequential or hybrid run.
    AgreeThroughput {
        replicas: u32,
        protocol: Protocol,
        below: BelowAlgo,
        clients: u32,
    },
    /// Replica-side agreement throughput of a tree-based run.
    AgreeTreeThroughput {
        replicas: u32,
        protocol: Protocol,
        tree: String,
        clients: u32,
    },
    /// Per-client key-value store statistics.
    KvsClient {
        client: u32,
        clients: u32,
        tree: Option<String>,
    },
}

impl LogFile {
    /// Subdirectory of the results directory holding this file, if any.
    pub fn subdir(&self) -> Option<String> {
        match self {
            LogFile::AgreeClient { replicas, .. } => Some(format!("rep_{}", replicas)),
            _ => None,
        }
    }

    /// Bare file name as the harness writes it.
    pub fn file_name(&self) -> String {
        match self {
            LogFile::AgreeClient {
                client,
                protocol,
                below,
                clients,
                tree: Some(tree),
                ..
            } => format!(
                "client_id_{}_algo_{}_below_{}_{}_num_{}",
                client,
                protocol.algo_id(),
                below.id(),
                tree,
                clients
            ),
            LogFile::AgreeClient {
                client,
                protocol,
                below,
                clients,
                tree: None,
                ..
            } => format!(
                "client_id_{}_algo_{}_below_{}_num_{}",
                client,
                protocol.algo_id(),
                below.id(),
                clients
            ),
            LogFile::AgreeThroughput {
                replicas,
                protocol,
                below,
                clients,
            } => format!(
                "tp_{}_below_{}_num_{}_numc_{}",
                protocol.file_stem(),
                below.id(),
                replicas,
                clients
            ),
            LogFile::AgreeTreeThroughput {
                replicas,
                protocol,
                tree,
                clients,
            } => format!(
                "tp_{}_{}_num_{}_numc_{}",
                tree,
                protocol.file_stem(),
                replicas,
                clients
            ),
            LogFile::KvsClient {
                client,
                clients,
                tree: Some(tree),
            } => format!("client_kvs_{}_id_{}_num_{}", tree, client, clients),
            LogFile::KvsClient {
                client,
                clients,
                tree: None,
            } => format!("client_kvs_id_{}_num_{}", client, clients),
        }
    }

    /// Full path of this file below the results directory `dir`.
    pub fn path(&self, dir: &Path) -> PathBuf {
        match self.subdir() {
            Some(sub) => dir.join(sub).join(self.file_name()),
            None => dir.join(self.file_name()),
        }
    }
}

/// Returns the path of `file` when the harness produced it.
pub fn locate(dir: &Path, file: &LogFile) -> Option<PathBuf> {
    let path = file.path(dir);
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agree_client_names() {
        let sequential = LogFile::AgreeClient {
            replicas: 8,
            client: 2,
            protocol: Protocol::Broadcast,
            below: BelowAlgo::Shm,
            clients: 4,
            tree: None,
        };
        assert_eq!(
            sequential.path(Path::new("results")),
            PathBuf::from("results/rep_8/client_id_2_algo_2_below_4_num_4")
        );

        let smelt = LogFile::AgreeClient {
            replicas: 8,
            client: 0,
            protocol: Protocol::OnePaxos,
            below: BelowAlgo::Direct,
            clients: 4,
            tree: Some("adaptivetree".to_string()),
        };
        assert_eq!(
            smelt.file_name(),
            "client_id_0_algo_0_below_5_adaptivetree_num_4"
        );
    }

    #[test]
    fn test_agree_throughput_names() {
        let hybrid = LogFile::AgreeThroughput {
            replicas: 12,
            protocol: Protocol::TwoPhaseCommit,
            below: BelowAlgo::Shm,
            clients: 4,
        };
        assert_eq!(hybrid.file_name(), "tp_tpc_below_4_num_12_numc_4");
        assert_eq!(hybrid.subdir(), None);

        let tree = LogFile::AgreeTreeThroughput {
            replicas: 12,
            protocol: Protocol::Chain,
            tree: "mst".to_string(),
            clients: 4,
        };
        assert_eq!(tree.file_name(), "tp_mst_chain_num_12_numc_4");
    }

    #[test]
    fn test_kvs_names() {
        let plain = LogFile::KvsClient {
            client: 3,
            clients: 8,
            tree: None,
        };
        assert_eq!(plain.file_name(), "client_kvs_id_3_num_8");

        let smelt = LogFile::KvsClient {
            client: 3,
            clients: 8,
            tree: Some("adaptivetree".to_string()),
        };
        assert_eq!(smelt.file_name(), "client_kvs_adaptivetree_id_3_num_8");
    }

    #[test]
    fn test_locate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = LogFile::KvsClient {
            client: 0,
            clients: 1,
            tree: None,
        };
        assert_eq!(locate(dir.path(), &file), None);

        std::fs::write(file.path(dir.path()), "||\t1\t2\n").unwrap();
        assert_eq!(locate(dir.path(), &file), Some(file.path(dir.path())));
    }
}
