//! Contains database models and interaction code.
pub mod models;
use crate::constants::db as constants;
use sqlx::postgres::PgPoolOptions;

/// An alias for the underlying DBMS specific pool type.
pub type ConnectionPool = sqlx::PgPool;

/// An alias for a transaction on the underlying DBMS.
pub type Transaction<'c> = sqlx::Transaction<'c, sqlx::Postgres>;

/// Initiate a pooled connection to the database.
pub async fn connect() -> Result<ConnectionPool, errors::DatabaseError> {
    Ok(PgPoolOptions::new()
        .max_connections(*constants::DB_MAX_CONNECTIONS)
        .connect(&constants::DB_URL)
        .await?)
}

/// Apply any pending schema migrations shipped with the binary.
pub async fn migrate(db_conn: &ConnectionPool) -> Result<(), errors::DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(db_conn)
        .await
        .map_err(sqlx::Error::from)?;
    Ok(())
}

pub mod errors {
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error(transparent)]
    pub struct DatabaseError(#[from] sqlx::Error);
}
