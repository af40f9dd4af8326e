//! Redis connection related constants.
use std::env::var;
use std::sync::LazyLock;

/// The hostname where the Redis session store can be found.
pub static REDIS_HOST: LazyLock<String> = LazyLock::new(|| {
    var("REDIS_HOST").expect("REDIS_HOST not provided in environment variables")
});

/// The connection URL for the session store. `REDIS_URL` wins over `REDIS_HOST`.
pub static REDIS_URL: LazyLock<String> = LazyLock::new(|| {
    var("REDIS_URL").unwrap_or_else(|_| format!("redis://{}/", *REDIS_HOST))
});
