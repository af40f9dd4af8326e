//! Constants (primary environment variables/secrets) used across the application.
pub mod api;
pub mod db;
pub mod pagination;
pub mod redis;
mod secrets;
pub mod sessions;
