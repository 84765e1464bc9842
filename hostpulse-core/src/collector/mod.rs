use crate::command::HostCommand;
use crate::error::{CollectError, Result};
use crate::models::{MemoryInfo, MonitoredService, ServiceState, StatsSnapshot, CPU_UNAVAILABLE};
use crate::runner::{CommandOutput, CommandRunner, SystemRunner, DEFAULT_COMMAND_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;

// 各采集器实现拆分在子模块中
mod cpu;
mod memory;
mod service;
mod snapshot;

/// Gathers host health. Every collector is failure-tolerant: errors are
/// logged and replaced with a sentinel, never returned.
#[derive(Clone)]
pub struct StatsCollector {
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
}

impl std::fmt::Debug for StatsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsCollector")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl StatsCollector {
    /// Watches every [`MonitoredService`], with the default per-command timeout.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Local host collector with the given per-command timeout.
    pub fn system(timeout: Duration) -> Self {
        Self::new(Arc::new(SystemRunner)).with_timeout(timeout)
    }

    /// Run one command under the per-command deadline. Dropping the runner
    /// future on timeout kills the child process.
    async fn run(&self, command: HostCommand) -> Result<CommandOutput> {
        match tokio::time::timeout(self.timeout, self.runner.run(command)).await {
            Ok(result) => result,
            Err(_) => Err(CollectError::Timeout {
                program: command.program(),
                timeout: self.timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Scripted, ScriptedRunner};

    #[tokio::test]
    async fn collectors_share_one_runner() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .with(HostCommand::MemoryReport, Scripted::Ok("1 2 3 4 5 6".into())),
        );
        let collector = StatsCollector::new(runner.clone());
        let info = collector.collect_memory().await;
        assert!(!info.is_empty());
        let _ = collector.collect_cpu().await;
        assert_eq!(runner.calls(), 2);
    }
}
