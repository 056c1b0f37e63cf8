use crate::domain::errors::ReportError;
use crate::domain::experiment::{Protocol, Variant};
use crate::domain::report::{AgreeReportLine, KvsReportLine, ReportLine};
use crate::domain::sample::MeanSpread;
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes one line per row to `path`, replacing any previous report.
pub fn write_report<L: ReportLine>(path: &Path, lines: &[L]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.to_line()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!("Printing output to {}", path.display());
    Ok(())
}

type AgreeRow = (u32, String, String, i64, i64);
type KvsRow = (u32, String, i64, i64, i64, i64);

/// Parses an agreement report written by [`write_report`].
pub fn read_agree_report(path: &Path) -> Result<Vec<AgreeReportLine>, ReportError> {
    read_rows(path, |line, (replicas, protocol, variant, mean, spread): AgreeRow| {
        let protocol: Protocol = protocol.parse().map_err(|e| invalid(path, line, e))?;
        let variant: Variant = variant.parse().map_err(|e| invalid(path, line, e))?;
        Ok(AgreeReportLine {
            replicas,
            protocol,
            variant,
            stats: MeanSpread::new(mean as f64, spread as f64),
        })
    })
}

/// Parses a key-value store report written by [`write_report`].
pub fn read_kvs_report(path: &Path) -> Result<Vec<KvsReportLine>, ReportError> {
    read_rows(
        path,
        |line, (clients, variant, w_mean, w_spread, r_mean, r_spread): KvsRow| {
            let variant: Variant = variant.parse().map_err(|e| invalid(path, line, e))?;
            Ok(KvsReportLine {
                clients,
                variant,
                write: MeanSpread::new(w_mean as f64, w_spread as f64),
                read: MeanSpread::new(r_mean as f64, r_spread as f64),
            })
        },
    )
}

fn invalid(path: &Path, line: u64, e: anyhow::Error) -> ReportError {
    ReportError::InvalidRow {
        path: path.to_path_buf(),
        line,
        reason: e.to_string(),
    }
}

fn read_rows<T, L, F>(path: &Path, convert: F) -> Result<Vec<L>, ReportError>
where
    T: DeserializeOwned,
    F: Fn(u64, T) -> Result<L, ReportError>,
{
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    let mut lines = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record).map_err(csv_err)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: T = record.deserialize(None).map_err(csv_err)?;
        lines.push(convert(line, row)?);
    }

    Ok(lines)
}
