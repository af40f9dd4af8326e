//! Middleware applied to the router: host checks, session lookup and CSRF.
pub mod hosts;
pub mod session;
