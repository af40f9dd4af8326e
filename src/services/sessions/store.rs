//! Provides an abstracted interface to the underlying session store. Accessible only
//! within the session service, since no other part of the code should ever access
//! the session store.
use std::sync::Arc;

use crate::constants::sessions::AUTHENTICATED_SESSION_PREFIX;
use redis::{aio::MultiplexedConnection, AsyncCommands as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

#[derive(Clone)]
/// A connection to the session store. Guaranteed to be safe to clone and share
/// between threads. The underlying connection is opened on first use.
pub struct Connection {
    /// The client used to open the connection.
    client: redis::Client,
    /// The shared multiplexed connection, once opened.
    conn: Arc<OnceCell<MultiplexedConnection>>,
}

/// Information stored under an authenticated session token.
pub(super) struct SessionInfo {
    /// The user the session authenticates.
    pub user_id: Uuid,
    /// The CSRF token issued alongside the session.
    pub csrf: String,
}

impl Connection {
    /// Prepare a connection to the session store at `url`. Only the URL is
    /// validated here.
    pub fn open(url: &str) -> Result<Self, errors::SessionStorageError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: Arc::new(OnceCell::new()),
        })
    }

    /// Get the shared multiplexed connection, opening it if needed.
    async fn multiplexed(&self) -> Result<MultiplexedConnection, errors::SessionStorageError> {
        Ok(self
            .conn
            .get_or_try_init(|| self.client.get_multiplexed_async_connection())
            .await?
            .clone())
    }

    /// Get stored session info associated with a given token.
    pub(super) async fn get_info(
        &self,
        token: &str,
    ) -> Result<Option<SessionInfo>, errors::SessionStorageError> {
        let key = format!("{AUTHENTICATED_SESSION_PREFIX}:{token}");
        let mut conn = self.multiplexed().await?;
        let (user_id, csrf): (Option<String>, Option<String>) =
            conn.hget(&key, &["user_id", "csrf"]).await?;
        let (Some(user_id), Some(csrf)) = (user_id, csrf) else {
            return Ok(None);
        };
        Ok(Uuid::parse_str(&user_id).map_or_else(
            |_| {
                tracing::warn!("Session {key} holds a malformed user ID");
                None
            },
            |user_id| Some(SessionInfo { user_id, csrf }),
        ))
    }
}

/// Errors returned by functions in this module.
pub mod errors {
    use redis::RedisError;
    use thiserror::Error;

    /// An error returned by the underlying storage layer.
    #[derive(Error, Debug)]
    #[error(transparent)]
    pub struct SessionStorageError(#[from] RedisError);
}
