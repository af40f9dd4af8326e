//! Models mapping to the `course_org` database table. Represents a training
//! organization offering courses.
use serde::Serialize;
use sqlx::{query_as, FromRow};

use crate::db::{errors::DatabaseError, ConnectionPool};

/// An `Organization` which is stored in the database. Can only be constructed
/// by reading it from the database (or through test fixtures).
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct Organization {
    /// The organization's ID primary key.
    pub id: i64,
    /// The organization's name.
    pub name: String,
    /// A free-text description of the organization.
    pub description: String,
    /// The organization's category code: `pxjg` (training institution),
    /// `gr` (individual) or `gx` (university).
    pub category: String,
    /// How many times the organization's home page has been viewed.
    pub click_nums: i64,
    /// How many users have favorited the organization.
    pub fav_nums: i64,
    /// How many students study with the organization.
    pub students: i64,
    /// How many courses the organization offers.
    pub course_nums: i64,
    /// Path of the organization's logo under the media root.
    pub image: String,
    /// The organization's street address.
    pub address: String,
    /// The city the organization is located in.
    pub city_id: i64,
}

impl Organization {
    /// Select an `Organization` from the database by its ID.
    pub async fn select_one(
        id: i64,
        db_client: &ConnectionPool,
    ) -> Result<Option<Self>, DatabaseError> {
        Ok(query_as::<_, Self>("SELECT * FROM course_org WHERE id = $1")
            .bind(id)
            .fetch_optional(db_client)
            .await?)
    }
    /// Retrieve all `Organization`s stored in the database, in insertion order.
    pub async fn select_all(db_client: &ConnectionPool) -> Result<Vec<Self>, DatabaseError> {
        Ok(query_as::<_, Self>("SELECT * FROM course_org ORDER BY id")
            .fetch_all(db_client)
            .await?)
    }
    /// Record a view of the organization's home page and return the updated
    /// record, or `None` if no such organization exists.
    pub async fn increment_clicks(
        id: i64,
        db_client: &ConnectionPool,
    ) -> Result<Option<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("UPDATE course_org SET click_nums = click_nums + 1 WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(db_client)
                .await?,
        )
    }
}
