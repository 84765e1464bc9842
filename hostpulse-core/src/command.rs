//! The fixed set of host commands the agent is allowed to run.

use crate::models::MonitoredService;
use std::fmt;

/// A host command template. Only the service name varies, and it comes from
/// the closed [`MonitoredService`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    /// `systemctl show --property=LoadState --property=ActiveState <unit>`
    ServiceStatus(MonitoredService),
    /// `top -bn1`: one-shot utilization report.
    CpuSample,
    /// `free -m`
    MemoryReport,
}

impl HostCommand {
    pub fn program(&self) -> &'static str {
        match self {
            HostCommand::ServiceStatus(_) => "systemctl",
            HostCommand::CpuSample => "top",
            HostCommand::MemoryReport => "free",
        }
    }

    pub fn args(&self) -> Vec<&'static str> {
        match self {
            HostCommand::ServiceStatus(service) => vec![
                "show",
                "--property=LoadState",
                "--property=ActiveState",
                service.unit(),
            ],
            HostCommand::CpuSample => vec!["-bn1"],
            HostCommand::MemoryReport => vec!["-m"],
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
