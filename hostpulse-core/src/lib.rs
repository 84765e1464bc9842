//! Core library for the host agent: fixed host commands, a process runner,
//! failure-tolerant collectors and the stats aggregator.

mod collector;
mod command;
mod error;
mod models;
mod runner;

#[cfg(test)]
mod fake;

pub use collector::StatsCollector;
pub use command::HostCommand;
pub use error::{CollectError, Result};
pub use models::{MemoryInfo, MonitoredService, ServiceState, StatsSnapshot, CPU_UNAVAILABLE};
pub use runner::{CommandOutput, CommandRunner, SystemRunner, DEFAULT_COMMAND_TIMEOUT};
