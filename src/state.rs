//! Defines the state shared across the Axum application.
use crate::{db, services::sessions};

#[derive(Clone)]
/// The state struct shared across routers.
pub struct AppState {
    /// A database connection pool for getting new database connections.
    pub db_conn: db::ConnectionPool,
    /// A multiplexed connection for reading sessions from the session store.
    pub session_store: sessions::store::Connection,
}
