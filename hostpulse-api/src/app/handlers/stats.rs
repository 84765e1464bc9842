//! Host stats API

use axum::extract::State;
use axum::Json;
use hostpulse_core::StatsSnapshot;
use tracing::instrument;

use crate::app::AppState;

/// GET /stats - fresh snapshot of CPU, memory and database service state.
///
/// Only reached after the token check; degraded collectors show up as
/// sentinel values, so this always answers 200.
#[instrument(skip_all)]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.collector.aggregate().await)
}
