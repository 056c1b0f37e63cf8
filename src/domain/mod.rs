// Protocol, variant and metric lookup tables
pub mod experiment;

// Report rows and report file naming
pub mod report;

// Sentinel samples and their aggregates
pub mod sample;

// Domain-specific error types
pub mod errors;
