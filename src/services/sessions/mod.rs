//! Identifies who is making a request. Sessions are issued by the auth
//! service; this service only reads them.
pub mod store;
use uuid::Uuid;

/// A fully authenticated session read from the session store.
#[derive(Clone, Debug)]
pub struct UserSession {
    /// The user authenticated by this session.
    user_id: Uuid,
    /// The CSRF token state-changing requests must echo back.
    csrf: String,
}

impl UserSession {
    /// Build a session from its parts.
    pub const fn new(user_id: Uuid, csrf: String) -> Self {
        Self { user_id, csrf }
    }
    /// Look up the session identified by `token`. Unknown or expired tokens
    /// yield `None`.
    pub async fn get(
        token: &str,
        session_store_conn: &store::Connection,
    ) -> Result<Option<Self>, errors::SessionStorageError> {
        Ok(session_store_conn
            .get_info(token)
            .await?
            .map(|info| Self::new(info.user_id, info.csrf)))
    }
    /// Get the ID of the user authenticated by this session.
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }
    /// Get this session's CSRF token.
    pub fn csrf_token(&self) -> &str {
        &self.csrf
    }
}

/// Whoever is making the current request. Inserted into every request by the
/// session middleware and passed explicitly into the services.
#[derive(Clone, Debug, Default)]
pub enum Viewer {
    /// No valid session accompanied the request.
    #[default]
    Anonymous,
    /// The request carried a valid session.
    Authenticated(UserSession),
}

impl Viewer {
    /// The authenticated user's ID, if any.
    pub const fn user_id(&self) -> Option<Uuid> {
        match *self {
            Self::Anonymous => None,
            Self::Authenticated(ref session) => Some(session.user_id()),
        }
    }
}

/// Errors returned by function within this module.
pub mod errors {
    pub use super::store::errors::SessionStorageError;
}
