use std::fmt;
use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use super::error::ApiError;
use super::state::AppState;

/// Shared secret expected in the token header. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentToken(String);

impl AgentToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Byte-for-byte, constant-time comparison.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.0.as_bytes().ct_eq(candidate).into()
    }
}

impl fmt::Debug for AgentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AgentToken(***)")
    }
}

/// Header-based shared-secret check in front of protected routes.
#[derive(Debug, Clone)]
pub struct AuthGate {
    header: HeaderName,
    token: AgentToken,
}

impl AuthGate {
    pub fn new(header: HeaderName, token: AgentToken) -> Self {
        Self { header, token }
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Missing, empty or mismatched values fail closed.
    pub fn authorize(&self, value: Option<&HeaderValue>) -> bool {
        match value {
            Some(v) if !v.is_empty() => self.token.matches(v.as_bytes()),
            _ => false,
        }
    }

    fn rejection(&self) -> ApiError {
        ApiError::unauthorized_with_message(format!(
            "A valid \"{}\" header is required.",
            self.header
        ))
    }
}

/// 客户端地址，仅用于日志
fn client_addr(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects the request before any handler work runs unless the token header
/// matches.
pub async fn require_agent_token(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let gate = &state.auth;
    if !gate.authorize(request.headers().get(gate.header())) {
        tracing::warn!(
            client = %client_addr(&request),
            path = %request.uri().path(),
            "rejected request without a valid agent token"
        );
        return Err(gate.rejection());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new(
            HeaderName::from_static("agent_token"),
            AgentToken::new("s3cret"),
        )
    }

    #[test]
    fn exact_match_passes() {
        assert!(gate().authorize(Some(&HeaderValue::from_static("s3cret"))));
    }

    #[test]
    fn everything_else_fails_closed() {
        let gate = gate();
        assert!(!gate.authorize(None));
        assert!(!gate.authorize(Some(&HeaderValue::from_static(""))));
        assert!(!gate.authorize(Some(&HeaderValue::from_static("s3cre"))));
        assert!(!gate.authorize(Some(&HeaderValue::from_static("s3cret "))));
        assert!(!gate.authorize(Some(&HeaderValue::from_static("S3CRET"))));
    }

    #[test]
    fn token_is_redacted() {
        assert_eq!(format!("{:?}", AgentToken::new("s3cret")), "AgentToken(***)");
    }
}
