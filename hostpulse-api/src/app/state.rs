use hostpulse_core::StatsCollector;
use std::sync::Arc;

use super::middleware::AuthGate;

/// Shared application state for handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<StatsCollector>,
    pub auth: Arc<AuthGate>,
}

impl AppState {
    pub fn new(collector: StatsCollector, auth: AuthGate) -> Self {
        Self {
            collector: Arc::new(collector),
            auth: Arc::new(auth),
        }
    }
}
