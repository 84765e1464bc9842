use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{get_stats, handler_404, health};
use super::middleware::require_agent_token;
use super::state::AppState;

/// Build the router with routes and middleware wired.
pub fn app_router(state: AppState) -> Router {
    // 公开端点（不需要认证）
    let public_routes = Router::new().route("/health", get(health));

    // 受保护端点：token 校验在任何采集之前
    let protected_routes = Router::new()
        .route("/stats", get(get_stats))
        .route_layer(from_fn_with_state(state.clone(), require_agent_token));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
