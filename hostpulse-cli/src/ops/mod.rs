mod output;
mod stats;
mod ui;

pub use output::OutputFormat;
pub use stats::{fetch_stats, local_snapshot};
