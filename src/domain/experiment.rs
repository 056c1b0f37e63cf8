use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agreement protocols driven by the benchmark harness.
///
/// The discriminant order matches the harness `algo` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Protocol {
    OnePaxos,
    TwoPhaseCommit,
    Broadcast,
    Chain,
}

impl Protocol {
    /// Harness algorithm id, as it appears in `client_id_*_algo_{id}_*` file names.
    pub const fn algo_id(&self) -> u32 {
        match self {
            Protocol::OnePaxos => 0,
            Protocol::TwoPhaseCommit => 1,
            Protocol::Broadcast => 2,
            Protocol::Chain => 3,
        }
    }

    /// Label written into report files.
    pub const fn label(&self) -> &'static str {
        match self {
            Protocol::OnePaxos => "1Paxos",
            Protocol::TwoPhaseCommit => "TPC",
            Protocol::Broadcast => "Broad",
            Protocol::Chain => "Chain",
        }
    }

    /// Short name used by the replica-side throughput files (`tp_{stem}_*`).
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Protocol::OnePaxos => "one",
            Protocol::TwoPhaseCommit => "tpc",
            Protocol::Broadcast => "broad",
            Protocol::Chain => "chain",
        }
    }

    /// Name shown in chart legends.
    pub const fn legend_name(&self) -> &'static str {
        match self {
            Protocol::TwoPhaseCommit => "2PC",
            other => other.label(),
        }
    }

    /// All protocols in harness id order.
    pub const fn all() -> [Protocol; 4] {
        [
            Protocol::OnePaxos,
            Protocol::TwoPhaseCommit,
            Protocol::Broadcast,
            Protocol::Chain,
        ]
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Protocol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::all()
            .into_iter()
            .find(|p| p.label() == s || p.file_stem() == s || p.legend_name() == s)
            .ok_or_else(|| anyhow!("Unknown protocol label: {}", s))
    }
}

/// Lower-level algorithm an agreement protocol is layered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BelowAlgo {
    /// Shared-memory broadcast (harness id 4).
    Shm,
    /// No lower-level algorithm (harness id 5, label `NONE`).
    Direct,
}

impl BelowAlgo {
    pub const fn id(&self) -> u32 {
        match self {
            BelowAlgo::Shm => 4,
            BelowAlgo::Direct => 5,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BelowAlgo::Shm => "SHM",
            BelowAlgo::Direct => "NONE",
        }
    }

    pub const fn all() -> [BelowAlgo; 2] {
        [BelowAlgo::Shm, BelowAlgo::Direct]
    }
}

impl fmt::Display for BelowAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Execution mode that produced a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    Sequential,
    Smelt,
    Hybrid,
}

impl Variant {
    pub const fn label(&self) -> &'static str {
        match self {
            Variant::Sequential => "sequential",
            Variant::Smelt => "smelt",
            Variant::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches('"') {
            "sequential" => Ok(Variant::Sequential),
            "smelt" => Ok(Variant::Smelt),
            "hybrid" => Ok(Variant::Hybrid),
            other => Err(anyhow!(
                "Invalid variant: {}. Must be 'sequential', 'smelt' or 'hybrid'",
                other
            )),
        }
    }
}

/// Which family of measurements a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    ResponseTime,
    Throughput,
}

impl MetricKind {
    /// File name prefix of the report (`rt_*` / `tp_*`).
    pub const fn prefix(&self) -> &'static str {
        match self {
            MetricKind::ResponseTime => "rt",
            MetricKind::Throughput => "tp",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::ResponseTime => write!(f, "response time"),
            MetricKind::Throughput => write!(f, "throughput"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_lookup_tables() {
        let ids: Vec<u32> = Protocol::all().iter().map(|p| p.algo_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(Protocol::TwoPhaseCommit.label(), "TPC");
        assert_eq!(Protocol::TwoPhaseCommit.legend_name(), "2PC");
        assert_eq!(Protocol::Broadcast.file_stem(), "broad");
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!(Protocol::from_str("1Paxos").unwrap(), Protocol::OnePaxos);
        assert_eq!(Protocol::from_str("TPC").unwrap(), Protocol::TwoPhaseCommit);
        assert_eq!(Protocol::from_str("chain").unwrap(), Protocol::Chain);
        assert!(Protocol::from_str("raft").is_err());
    }

    #[test]
    fn test_variant_from_str_strips_quotes() {
        assert_eq!(Variant::from_str("\"smelt\"").unwrap(), Variant::Smelt);
        assert_eq!(Variant::from_str("hybrid").unwrap(), Variant::Hybrid);
        assert!(Variant::from_str("tree").is_err());
    }

    #[test]
    fn test_below_ids() {
        assert_eq!(BelowAlgo::Shm.id(), 4);
        assert_eq!(BelowAlgo::Direct.id(), 5);
        assert_eq!(BelowAlgo::Direct.to_string(), "NONE");
    }
}
