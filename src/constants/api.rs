//! Constants related to the general configuration of the entire API and its deployment.

use std::{env::var, sync::LazyLock};

/// A prefix to prepend to any API paths to make them externally accessible.
pub static API_URI_PREFIX: LazyLock<String> =
    LazyLock::new(|| var("API_URI_PREFIX").unwrap_or(String::from("/")));

/// The socket address the HTTP listener binds to.
pub static BIND_ADDRESS: LazyLock<String> =
    LazyLock::new(|| var("BIND_ADDRESS").unwrap_or(String::from("0.0.0.0:8080")));

/// Whether the deployment runs in debug mode. Debug mode exposes internal
/// error details in responses and raises the default log level.
pub static DEBUG: LazyLock<bool> = LazyLock::new(|| {
    var("DEBUG").is_ok_and(|value| parse_flag(&value).expect("DEBUG is not a valid boolean"))
});

/// Host patterns this deployment answers to. `*` matches any host, a leading
/// dot matches a domain and all of its subdomains.
pub static ALLOWED_HOSTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    parse_host_list(&var("ALLOWED_HOSTS").unwrap_or_else(|_| String::from("*")))
});

/// The directory served under `/static/`.
pub static STATIC_ROOT: LazyLock<String> =
    LazyLock::new(|| var("STATIC_ROOT").unwrap_or(String::from("static")));

/// The directory served under `/media/` (uploaded organization, teacher and
/// course images).
pub static MEDIA_ROOT: LazyLock<String> =
    LazyLock::new(|| var("MEDIA_ROOT").unwrap_or(String::from("media")));

/// Parse a boolean environment flag. Accepts the usual spellings.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated host list, dropping empty entries.
fn parse_host_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|host| host.trim().to_ascii_lowercase())
        .filter(|host| !host.is_empty())
        .collect()
}
