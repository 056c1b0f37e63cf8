// Harness log naming and lookup
pub mod locator;

// Sentinel row extraction
pub mod log_reader;

// Tab-delimited report files
pub mod report_store;

pub mod logging;

pub use logging::init_logging;
