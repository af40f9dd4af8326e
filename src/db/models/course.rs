//! Models mapping to the course database table.
use serde::Serialize;
use sqlx::{query_as, FromRow};

use crate::db::{errors::DatabaseError, ConnectionPool};

/// A `Course` which is stored in the database.
#[derive(FromRow, Serialize, Clone, Debug)]
pub struct Course {
    /// The course's ID primary key.
    pub id: i64,
    /// The organization offering the course, if any.
    pub org_id: Option<i64>,
    /// The teacher giving the course, if any.
    pub teacher_id: Option<i64>,
    /// The course's name.
    pub name: String,
    /// A description of the course.
    pub description: String,
    /// Difficulty: `cj` (beginner), `zj` (intermediate) or `gj` (advanced).
    pub degree: String,
    /// Study time in minutes.
    pub learn_times: i64,
    /// How many students are enrolled.
    pub students: i64,
    /// How many users have favorited the course.
    pub fav_nums: i64,
    /// How many times the course has been viewed.
    pub click_nums: i64,
    /// Path of the course's cover image under the media root.
    pub image: String,
}

impl Course {
    /// Retrieve the courses offered by an organization. `limit` of `None`
    /// returns all of them.
    pub async fn select_by_org(
        org_id: i64,
        limit: Option<i64>,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("SELECT * FROM course WHERE org_id = $1 ORDER BY id LIMIT $2")
                .bind(org_id)
                .bind(limit)
                .fetch_all(db_client)
                .await?,
        )
    }
    /// Retrieve every course given by a teacher.
    pub async fn select_by_teacher(
        teacher_id: i64,
        db_client: &ConnectionPool,
    ) -> Result<Vec<Self>, DatabaseError> {
        Ok(
            query_as::<_, Self>("SELECT * FROM course WHERE teacher_id = $1 ORDER BY id")
                .bind(teacher_id)
                .fetch_all(db_client)
                .await?,
        )
    }
}
