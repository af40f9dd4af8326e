//! Models mapping to the teacher database table. A teacher works for exactly
//! one organization.
use serde::Serialize;
use sqlx::{query_as, FromRow};

use crate::db::{errors::DatabaseError, ConnectionPool};

/// A `Teacher` which is stored in the database.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct Teacher {
    /// The teacher's ID primary key.
    pub id: i64,
    /// The organization the teacher belongs to.
    pub org_id: i64,
    /// The teacher's name.
    pub name: String,
    /// Years of working experience.
    pub work_years: i64,
    /// The teacher's employer.
    pub work_company: String,
    /// The teacher's job title.
    pub work_position: String,
    /// The teacher's teaching style and highlights.
    pub points: String,
    /// How many times the teacher's detail page has been viewed.
    pub click_nums: i64,
    /// How many users have favorited the teacher.
    pub fav_nums: i64,
    /// Path of the teacher's portrait under the media root.
    pub image: String,
}

impl Teacher {
    /// Select a `Teacher` from the database by ID.
    pub async fn select_one(
        id: i64,
        db_client: &ConnectionPool,
    ) -> Result<Option<Self>, DatabaseError> {
        Ok(query_as::<_, Self>("SELECT * FROM teacher WHERE id = $1")
            .bind(id)
            .fetch_optional(db_client)
            .await?)
    }
    /// Retrieve all `Teacher`s stored in the database, in insertion order.
    pub async fn select_all(db_client: &ConnectionPool) -> Result<Vec<Self>, DatabaseError> {
        Ok(query_as::<_, Self>("SELECT * FROM teacher ORDER BY id")
            .fetch_all(db_client)
            .await?)
    }
    /// Retrieve the `limit` most viewed teachers. Ties keep insertion order.
    pub async fn select_most_viewed(
        limit: i64,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("SELECT * FROM teacher ORDER BY click_nums DESC, id LIMIT $1")
                .bind(limit)
                .fetch_all(db_client)
                .await?,
        )
    }
    /// Retrieve the teachers of an organization. `limit` of `None` returns all
    /// of them.
    pub async fn select_by_org(
        org_id: i64,
        limit: Option<i64>,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("SELECT * FROM teacher WHERE org_id = $1 ORDER BY id LIMIT $2")
                .bind(org_id)
                .bind(limit)
                .fetch_all(db_client)
                .await?,
        )
    }
    /// Record a view of the teacher's detail page and return the updated
    /// record, or `None` if no such teacher exists.
    pub async fn increment_clicks(
        id: i64,
        db_client: &ConnectionPool,
    ) -> Result<Option<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("UPDATE teacher SET click_nums = click_nums + 1 WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(db_client)
                .await?,
        )
    }
}
