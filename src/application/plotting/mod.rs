// Grouped bar charts shared by the benchmark plots
pub mod bar_chart;

// Agreement response time / throughput charts
pub mod agree_chart;

// Key-value store set / get charts
pub mod kvs_chart;

// Queue benchmark surface
pub mod surface;

pub use agree_chart::plot_agree;
pub use kvs_chart::plot_kvs;
