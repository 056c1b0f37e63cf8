use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting a sample from a harness log
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable log {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Sentinel row in {} has no column {column}", .path.display())]
    MissingField { path: PathBuf, column: usize },

    #[error("Sentinel row in {}: column {column} is not a number ({value:?})", .path.display())]
    MalformedField {
        path: PathBuf,
        column: usize,
        value: String,
    },
}

/// Errors related to writing or re-reading report files
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to access report {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid row in {} at line {line}: {reason}", .path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// Errors related to chart rendering
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to render {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },

    #[error("Invalid surface point on line {line}: {reason}")]
    InvalidPoint { line: usize, reason: String },

    #[error("Surface grid up to ({max_x}, {max_y}) exceeds {limit} cells")]
    GridTooLarge {
        max_x: usize,
        max_y: usize,
        limit: usize,
    },

    #[error("Failed to read plot input: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_error_formatting() {
        let error = SampleError::MalformedField {
            path: PathBuf::from("rep_4/client_id_0_algo_1_below_5_num_4"),
            column: 2,
            value: "abc".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("rep_4/client_id_0_algo_1_below_5_num_4"));
        assert!(msg.contains("column 2"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_report_error_formatting() {
        let error = ReportError::InvalidRow {
            path: PathBuf::from("rt_r8"),
            line: 3,
            reason: "Unknown protocol label: Raft".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("rt_r8"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("Raft"));
    }

    #[test]
    fn test_plot_error_formatting() {
        let error = PlotError::GridTooLarge {
            max_x: 100000,
            max_y: 100000,
            limit: 1 << 24,
        };

        let msg = error.to_string();
        assert!(msg.contains("(100000, 100000)"));
        assert!(msg.contains("16777216 cells"));
    }
}
