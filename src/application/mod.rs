// Per-client sample reduction
pub mod aggregator;

// Benchmark parsers
pub mod agree;
pub mod kvs;

// Report charts
pub mod plotting;

pub use agree::{AgreeParser, AgreeSettings};
pub use kvs::{KvsParser, KvsSettings};
