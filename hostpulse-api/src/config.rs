//! Agent configuration, read once from the process environment.

use anyhow::{bail, Context};
use axum::http::HeaderName;
use hostpulse_core::DEFAULT_COMMAND_TIMEOUT;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

use crate::app::AgentToken;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_HEADER: &str = "agent_token";
/// Only accepted outside production.
const DEV_TOKEN: &str = "dev-agent-token";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// 共享密钥
    pub token: AgentToken,
    pub token_header: HeaderName,
    pub command_timeout: Duration,
    pub production: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let production = get("AGENT_ENV")
            .map(|env| matches!(env.to_ascii_lowercase().as_str(), "production" | "prod"))
            .unwrap_or(false);

        let port = match get("AGENT_PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, fallback = DEFAULT_PORT, "invalid AGENT_PORT; using default port");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let all_interfaces = SocketAddr::from(([0, 0, 0, 0], port));
        let bind = match get("AGENT_BIND") {
            Some(raw) => raw.parse::<SocketAddr>().unwrap_or_else(|_| {
                warn!(value = %raw, fallback = %all_interfaces, "invalid AGENT_BIND; listening on all interfaces");
                all_interfaces
            }),
            None => all_interfaces,
        };

        let token = match get("AGENT_TOKEN") {
            Some(token) => AgentToken::new(token),
            None if production => bail!("AGENT_TOKEN must be set when AGENT_ENV=production"),
            None => {
                warn!("AGENT_TOKEN not set; using the development default token");
                AgentToken::new(DEV_TOKEN)
            }
        };

        let header = get("AGENT_TOKEN_HEADER").unwrap_or_else(|| DEFAULT_TOKEN_HEADER.into());
        let token_header = HeaderName::try_from(header.as_str())
            .with_context(|| format!("invalid AGENT_TOKEN_HEADER: {header}"))?;

        let command_timeout = get("AGENT_COMMAND_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT);

        Ok(Self {
            bind,
            token,
            token_header,
            command_timeout,
            production,
        })
    }
}
