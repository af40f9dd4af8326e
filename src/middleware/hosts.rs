//! Rejects requests addressed to hosts this deployment does not serve.
use axum::{
    extract::Request,
    http::{header::HOST, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::constants::api::ALLOWED_HOSTS;

/// Middleware checking the request's host against `ALLOWED_HOSTS`.
pub async fn allowed_hosts_middleware(req: Request, next: Next) -> Result<Response, StatusCode> {
    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().host());
    let allowed = host.map_or_else(
        || ALLOWED_HOSTS.iter().any(|pattern| pattern == "*"),
        |host| host_is_allowed(host, &ALLOWED_HOSTS),
    );
    if !allowed {
        tracing::warn!(host = ?host, "Rejected request for a host outside ALLOWED_HOSTS");
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(next.run(req).await)
}

/// Warn if `patterns` is empty, since every request would then be rejected.
/// Returns whether any host can be served.
pub fn check_allowed_hosts(patterns: &[String]) -> bool {
    if patterns.is_empty() {
        tracing::warn!("ALLOWED_HOSTS is empty, every request will be rejected");
        return false;
    }
    true
}

/// Whether `host` (optionally with a port) matches one of `patterns`.
pub fn host_is_allowed(host: &str, patterns: &[String]) -> bool {
    let domain = strip_port(host).trim_end_matches('.').to_ascii_lowercase();
    patterns.iter().any(|pattern| {
        if pattern == "*" {
            return true;
        }
        pattern.strip_prefix('.').map_or_else(
            || domain == *pattern,
            |parent| {
                domain == parent
                    || domain
                        .strip_suffix(parent)
                        .is_some_and(|sub| sub.ends_with('.'))
            },
        )
    })
}

/// Drop a trailing `:port`, leaving bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }
    host.rsplit_once(':').map_or(host, |(domain, _port)| domain)
}
