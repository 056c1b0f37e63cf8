use crate::domain::errors::SampleError;
use crate::domain::sample::{ColumnSet, SENTINEL, Sample, to_thousands};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reads the sentinel row of one harness log.
///
/// A missing file and a file without a sentinel row both yield `Ok(None)`.
/// A sentinel row whose selected columns are absent or not numeric is an
/// error.
pub fn read_sample(path: &Path, columns: ColumnSet) -> Result<Option<Sample>, SampleError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Skipping missing log {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(SampleError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    info!("{}", path.display());
    parse_sample(BufReader::new(file), path, columns)
}

/// Scans `reader` for the first sentinel row and extracts `columns` from it.
///
/// `path` is only used for diagnostics.
pub fn parse_sample<R: Read>(
    reader: R,
    path: &Path,
    columns: ColumnSet,
) -> Result<Option<Sample>, SampleError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut record = StringRecord::new();
    loop {
        let more = rdr
            .read_record(&mut record)
            .map_err(|source| SampleError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        if !more {
            break;
        }
        if record.get(0) != Some(SENTINEL) {
            continue;
        }

        let values = columns
            .indices()
            .iter()
            .map(|&column| extract(&record, column, path))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Some(Sample::new(values)));
    }

    debug!("No sentinel row in {}", path.display());
    Ok(None)
}

fn extract(record: &StringRecord, column: usize, path: &Path) -> Result<i64, SampleError> {
    let raw = record.get(column).ok_or_else(|| SampleError::MissingField {
        path: path.to_path_buf(),
        column,
    })?;

    let malformed = || SampleError::MalformedField {
        path: path.to_path_buf(),
        column,
        value: raw.to_string(),
    };
    let value: f64 = raw.parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }

    Ok(to_thousands(value))
}
