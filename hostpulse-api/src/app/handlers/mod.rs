mod health;
mod stats;

pub use health::{handler_404, health};
pub use stats::get_stats;
