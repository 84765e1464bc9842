//! Service status probes against systemd.

use super::*;
use tracing::debug;

/// `ActiveState` values that mean "known unit, not running".
const STOPPED_STATES: &[&str] = &["inactive", "failed", "activating", "deactivating", "reloading"];

/// `LoadState` systemd reports for a unit that is not installed.
const LOAD_STATE_NOT_FOUND: &str = "not-found";

impl StatsCollector {
    /// Probe one service. Never fails; an unusable probe reads as `NotFound`.
    pub async fn probe(&self, service: MonitoredService) -> ServiceState {
        let result = self.run(HostCommand::ServiceStatus(service)).await;
        let state = classify_status(&result);
        match &result {
            Ok(_) => debug!(service = %service, state = ?state, "service probed"),
            Err(e) => debug!(service = %service, state = ?state, error = %e, "service probed"),
        }
        state
    }
}

/// Map a `systemctl show` result onto a [`ServiceState`].
///
/// `systemctl show` exits 0 for units that do not exist and reports
/// `LoadState=not-found`; that check comes before the active state, which
/// reads `inactive` for both stopped and missing units.
pub(crate) fn classify_status(result: &Result<CommandOutput>) -> ServiceState {
    let out = match result {
        Ok(out) => out,
        Err(_) => return ServiceState::NotFound,
    };

    match (
        property(&out.stdout, "LoadState"),
        property(&out.stdout, "ActiveState"),
    ) {
        (None, _) | (Some(LOAD_STATE_NOT_FOUND), _) => ServiceState::NotFound,
        (_, Some("active")) => ServiceState::Running,
        (_, Some(state)) if STOPPED_STATES.contains(&state) => ServiceState::Stopped,
        _ => ServiceState::NotFound,
    }
}

/// Value of one `Key=value` line.
fn property<'a>(stdout: &'a str, name: &str) -> Option<&'a str> {
    stdout.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        (key == name).then(|| value.trim())
    })
}
