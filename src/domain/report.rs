use crate::domain::experiment::{MetricKind, Protocol, Variant};
use crate::domain::sample::MeanSpread;
use serde::{Deserialize, Serialize};

/// A row that serializes to one tab-delimited report line.
pub trait ReportLine {
    fn to_line(&self) -> String;
}

/// Report numbers are written as integers, truncated toward zero.
fn whole(value: f64) -> i64 {
    value.trunc() as i64
}

/// One agreement aggregate: `replicas \t protocol \t "variant" \t mean \t spread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreeReportLine {
    pub replicas: u32,
    pub protocol: Protocol,
    pub variant: Variant,
    pub stats: MeanSpread,
}

impl ReportLine for AgreeReportLine {
    fn to_line(&self) -> String {
        format!(
            "{}\t{}\t\"{}\"\t{}\t{}",
            self.replicas,
            self.protocol.label(),
            self.variant.label(),
            whole(self.stats.mean),
            whole(self.stats.spread)
        )
    }
}

/// One KVS aggregate: `clients \t "variant" \t w_mean \t w_spread \t r_mean \t r_spread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvsReportLine {
    pub clients: u32,
    pub variant: Variant,
    pub write: MeanSpread,
    pub read: MeanSpread,
}

impl ReportLine for KvsReportLine {
    fn to_line(&self) -> String {
        format!(
            "{}\t\"{}\"\t{}\t{}\t{}\t{}",
            self.clients,
            self.variant.label(),
            whole(self.write.mean),
            whole(self.write.spread),
            whole(self.read.mean),
            whole(self.read.spread)
        )
    }
}

/// `rt_r{max_replicas}` / `tp_r{max_replicas}`.
pub fn agree_report_name(kind: MetricKind, max_replicas: u32) -> String {
    format!("{}_r{}", kind.prefix(), max_replicas)
}

/// `rt_numc{max_clients}` / `tp_numc{max_clients}`.
pub fn kvs_report_name(kind: MetricKind, max_clients: u32) -> String {
    format!("{}_numc{}", kind.prefix(), max_clients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agree_line_format() {
        let line = AgreeReportLine {
            replicas: 8,
            protocol: Protocol::TwoPhaseCommit,
            variant: Variant::Smelt,
            stats: MeanSpread::new(12.9, 3.5),
        };
        assert_eq!(line.to_line(), "8\tTPC\t\"smelt\"\t12\t3");
    }

    #[test]
    fn test_kvs_line_format() {
        let line = KvsReportLine {
            clients: 4,
            variant: Variant::Sequential,
            write: MeanSpread::new(5.0, 7.0),
            read: MeanSpread::new(2.5, 1.0),
        };
        assert_eq!(line.to_line(), "4\t\"sequential\"\t5\t7\t2\t1");
    }

    #[test]
    fn test_report_names() {
        assert_eq!(agree_report_name(MetricKind::ResponseTime, 28), "rt_r28");
        assert_eq!(agree_report_name(MetricKind::Throughput, 4), "tp_r4");
        assert_eq!(kvs_report_name(MetricKind::Throughput, 24), "tp_numc24");
    }
}
