//! Snapshot commands: remote (`/stats`) and local (in-process collection).

use super::output::{print_json, OutputFormat};
use super::ui::{format_state, print_empty, print_header, print_kv, print_section};
use crate::client::handle_error;
use hostpulse_core::{StatsCollector, StatsSnapshot};
use std::time::Duration;

/// Fetch a snapshot from a running agent.
pub async fn fetch_stats(
    client: &reqwest::Client,
    base: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let url = format!("{}/stats", base.trim_end_matches('/'));
    let resp = client.get(url).send().await?;
    let resp = handle_error(resp).await?;
    let snapshot: StatsSnapshot = resp.json().await?;
    render(&snapshot, base, output)
}

/// Run one collection cycle on this host without going through the agent.
pub async fn local_snapshot(timeout: Duration, output: OutputFormat) -> anyhow::Result<()> {
    let collector = StatsCollector::system(timeout);
    let snapshot = collector.aggregate().await;
    render(&snapshot, "local", output)
}

fn render(snapshot: &StatsSnapshot, source: &str, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => print_json(snapshot)?,
        OutputFormat::Table => {
            print_header("HOST STATS");
            print_kv("Source", source);
            print_kv("Timestamp", &snapshot.timestamp);
            print_kv("CPU", &snapshot.cpu);

            print_section("Memory");
            let memory = &snapshot.memory;
            if memory.is_empty() {
                print_empty("memory report unavailable");
            } else {
                for (key, value) in [
                    ("Total", &memory.total),
                    ("Used", &memory.used),
                    ("Free", &memory.free),
                    ("Shared", &memory.shared),
                    ("Buff/cache", &memory.buff_cache),
                    ("Available", &memory.available),
                ] {
                    print_kv(key, value.as_deref().unwrap_or("-"));
                }
            }

            print_section("Services");
            for (name, state) in &snapshot.services {
                println!("  {:<14} {}", name, format_state(*state));
            }
            println!();
        }
    }
    Ok(())
}
