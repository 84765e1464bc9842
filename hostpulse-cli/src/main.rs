mod client;
mod ops;

use clap::{Parser, Subcommand};
use ops::{fetch_stats, local_snapshot, OutputFormat};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI for the host agent.
#[derive(Parser)]
#[command(
    name = "hostpulse-cli",
    author,
    version,
    about = "Inspect host stats reported by the hostpulse agent"
)]
struct Cli {
    /// Agent base url
    #[arg(long, env = "HOSTPULSE_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Shared secret sent in the token header
    #[arg(long, env = "AGENT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Name of the token header
    #[arg(long, env = "AGENT_TOKEN_HEADER", default_value = "agent_token")]
    header: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch /stats from a running agent
    Stats,
    /// Collect a snapshot on this host directly
    Snapshot {
        /// Per-command timeout in seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件（如果存在），忽略错误
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats => {
            let client = client::build_client(&cli.header, &cli.token)?;
            fetch_stats(&client, &cli.url, cli.output).await?
        }
        Commands::Snapshot { timeout } => {
            local_snapshot(Duration::from_secs(timeout.max(1)), cli.output).await?
        }
    }

    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_parses() {
        let cli = Cli::parse_from(["hostpulse-cli", "--output", "json", "stats"]);
        assert!(matches!(cli.command, Commands::Stats));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn snapshot_timeout_defaults() {
        let cli = Cli::parse_from(["hostpulse-cli", "snapshot"]);
        assert!(matches!(cli.command, Commands::Snapshot { timeout: 5 }));
    }
}
