//! Constants related to reading sessions issued by the auth service.

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";
/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";
/// Prefix of the store keys holding authenticated sessions.
pub const AUTHENTICATED_SESSION_PREFIX: &str = "sessions:authenticated";
