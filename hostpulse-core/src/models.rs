use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel reported in place of a CPU percentage when sampling fails.
pub const CPU_UNAVAILABLE: &str = "N/A";

/// Run state of a monitored service as reported by the process supervisor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceState {
    Running,
    Stopped,
    /// Not installed, or the supervisor query itself failed.
    #[serde(rename = "Not Found")]
    NotFound,
}

/// Database services the agent watches. The set is closed: nothing outside
/// this enum is ever handed to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonitoredService {
    Mysql,
    Postgresql,
    Mongodb,
}

impl MonitoredService {
    pub const ALL: [MonitoredService; 3] = [
        MonitoredService::Mysql,
        MonitoredService::Postgresql,
        MonitoredService::Mongodb,
    ];

    /// Key used in the `services` object of a snapshot.
    pub fn key(self) -> &'static str {
        match self {
            MonitoredService::Mysql => "mysql",
            MonitoredService::Postgresql => "postgresql",
            MonitoredService::Mongodb => "mongodb",
        }
    }

    /// systemd unit name.
    pub fn unit(self) -> &'static str {
        match self {
            MonitoredService::Mysql => "mysql",
            MonitoredService::Postgresql => "postgresql",
            MonitoredService::Mongodb => "mongod",
        }
    }
}

impl fmt::Display for MonitoredService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Memory usage in megabytes, in `free -m` column order.
///
/// Either all six fields are set or none are; an empty value serializes as `{}`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryInfo {
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub used: Option<String>,
    #[serde(default)]
    pub free: Option<String>,
    #[serde(default)]
    pub shared: Option<String>,
    #[serde(default, rename = "buff/cache")]
    pub buff_cache: Option<String>,
    #[serde(default)]
    pub available: Option<String>,
}

impl MemoryInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `[total, used, free, shared, buff/cache, available]`.
    pub fn from_megabytes(values: [u64; 6]) -> Self {
        let mb = |v: u64| Some(format!("{v}MB"));
        let [total, used, free, shared, buff_cache, available] = values;
        Self {
            total: mb(total),
            used: mb(used),
            free: mb(free),
            shared: mb(shared),
            buff_cache: mb(buff_cache),
            available: mb(available),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_none()
    }
}

/// One complete, timestamped collection cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cpu: String,
    pub memory: MemoryInfo,
    pub services: BTreeMap<String, ServiceState>,
    /// RFC 3339 / ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
}
