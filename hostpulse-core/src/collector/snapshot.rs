//! Concurrent fan-out over all collectors.

use super::*;
use chrono::{SecondsFormat, Utc};
use futures::future::join_all;
use std::time::Instant;
use tracing::{debug, instrument};

impl StatsCollector {
    /// Run every probe and collector concurrently and wait for all of them.
    ///
    /// Individual failures show up as sentinel values; this never fails.
    #[instrument(skip_all)]
    pub async fn aggregate(&self) -> StatsSnapshot {
        let started = Instant::now();

        let probes = join_all(MonitoredService::ALL.iter().map(|&service| async move {
            (service.key().to_string(), self.probe(service).await)
        }));
        let (services, cpu, memory) =
            tokio::join!(probes, self.collect_cpu(), self.collect_memory());

        let snapshot = StatsSnapshot {
            cpu,
            memory,
            services: services.into_iter().collect(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "stats collected"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Scripted, ScriptedRunner};
    use crate::runner::CommandOutput;
    use futures::future::BoxFuture;
    use futures::FutureExt;

    const TOP: &str = "%Cpu(s):  6.0 us,  3.0 sy,  0.0 ni, 90.0 id,  1.0 wa";

    fn healthy_host() -> ScriptedRunner {
        ScriptedRunner::new()
            .with(HostCommand::CpuSample, Scripted::Ok(TOP.into()))
            .with(
                HostCommand::MemoryReport,
                Scripted::Ok("1000 400 500 10 90 600".into()),
            )
            .with(
                HostCommand::ServiceStatus(MonitoredService::Mysql),
                Scripted::Ok("LoadState=loaded\nActiveState=active\n".into()),
            )
            .with(
                HostCommand::ServiceStatus(MonitoredService::Postgresql),
                Scripted::Ok("LoadState=loaded\nActiveState=inactive\n".into()),
            )
    }

    #[tokio::test]
    async fn assembles_full_snapshot() {
        let runner = Arc::new(healthy_host());
        let collector = StatsCollector::new(runner.clone());
        let snapshot = collector.aggregate().await;

        assert_eq!(snapshot.cpu, "10%");
        assert_eq!(snapshot.memory, MemoryInfo::from_megabytes([1000, 400, 500, 10, 90, 600]));
        assert_eq!(snapshot.services["mysql"], ServiceState::Running);
        assert_eq!(snapshot.services["postgresql"], ServiceState::Stopped);
        // mongod is not scripted, so the probe cannot run
        assert_eq!(snapshot.services["mongodb"], ServiceState::NotFound);
        assert!(chrono::DateTime::parse_from_rfc3339(&snapshot.timestamp).is_ok());
        assert!(snapshot.timestamp.ends_with('Z'));
        assert_eq!(runner.calls(), 5);
    }

    #[tokio::test]
    async fn everything_failing_keeps_shape() {
        let collector = StatsCollector::new(Arc::new(ScriptedRunner::new()));
        let snapshot = collector.aggregate().await;

        assert_eq!(snapshot.cpu, CPU_UNAVAILABLE);
        assert!(snapshot.memory.is_empty());
        assert_eq!(snapshot.services.len(), 3);
        assert!(snapshot
            .services
            .values()
            .all(|s| *s == ServiceState::NotFound));
    }

    #[tokio::test]
    async fn repeated_snapshots_differ_only_in_timestamp() {
        let collector = StatsCollector::new(Arc::new(healthy_host()));
        let mut first = collector.aggregate().await;
        let second = collector.aggregate().await;
        first.timestamp = second.timestamp.clone();
        assert_eq!(first, second);
    }

    /// Each command takes the same fixed delay.
    struct SlowRunner(Duration);

    impl CommandRunner for SlowRunner {
        fn run(&self, _command: HostCommand) -> BoxFuture<'_, Result<CommandOutput>> {
            let delay = self.0;
            async move {
                tokio::time::sleep(delay).await;
                Ok(CommandOutput::stdout("LoadState=loaded\nActiveState=active\n"))
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn collectors_run_concurrently() {
        let collector = StatsCollector::new(Arc::new(SlowRunner(Duration::from_secs(1))));
        let started = tokio::time::Instant::now();
        let snapshot = collector.aggregate().await;
        // five sequential calls would take five seconds
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(snapshot.services.values().all(|s| *s == ServiceState::Running));
    }

    /// `top` never returns; every other command answers immediately.
    struct HungCpuRunner(ScriptedRunner);

    impl CommandRunner for HungCpuRunner {
        fn run(&self, command: HostCommand) -> BoxFuture<'_, Result<CommandOutput>> {
            match command {
                HostCommand::CpuSample => futures::future::pending().boxed(),
                other => self.0.run(other),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hung_command_degrades_within_timeout() {
        let collector = StatsCollector::new(Arc::new(HungCpuRunner(healthy_host())))
            .with_timeout(Duration::from_millis(200));
        let started = tokio::time::Instant::now();
        let snapshot = collector.aggregate().await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(snapshot.cpu, CPU_UNAVAILABLE);
        assert_eq!(snapshot.memory, MemoryInfo::from_megabytes([1000, 400, 500, 10, 90, 600]));
        assert_eq!(snapshot.services["mysql"], ServiceState::Running);
        assert_eq!(snapshot.services["postgresql"], ServiceState::Stopped);
    }
}
