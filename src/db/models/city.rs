//! Models mapping to the city database table. Cities are a read-only lookup
//! used to filter organizations.
use serde::Serialize;
use sqlx::{query_as, FromRow};

use crate::db::{errors::DatabaseError, ConnectionPool};

/// A `City` which is stored in the database.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct City {
    /// The city's ID primary key.
    pub id: i64,
    /// The city's name.
    pub name: String,
    /// A description of the city.
    pub description: String,
}

impl City {
    /// Retrieve every `City` stored in the database, in insertion order.
    pub async fn select_all(db_client: &ConnectionPool) -> Result<Vec<Self>, DatabaseError> {
        Ok(query_as::<_, Self>("SELECT * FROM city ORDER BY id")
            .fetch_all(db_client)
            .await?)
    }
}
