//! Models mapping to the `user_favorite` database table. A row records that a
//! user has bookmarked a course, organization or teacher.
use serde::Serialize;
use sqlx::{query, query_as, query_scalar, FromRow};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::db::{errors::DatabaseError, ConnectionPool, Transaction};

/// The kind of entity a favorite points at, stored in the `fav_type` column
/// as 1 (course), 2 (organization) or 3 (teacher).
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Course,
    Organization,
    Teacher,
}

impl FavoriteKind {
    /// The value stored in the `fav_type` column.
    pub const fn code(self) -> i16 {
        match self {
            Self::Course => 1,
            Self::Organization => 2,
            Self::Teacher => 3,
        }
    }

    /// Statement adjusting the target's favorite counter by `$2`, never
    /// letting it drop below zero.
    const fn adjust_count_sql(self) -> &'static str {
        match self {
            Self::Course => {
                "UPDATE course SET fav_nums = GREATEST(fav_nums + $2, 0) WHERE id = $1"
            }
            Self::Organization => {
                "UPDATE course_org SET fav_nums = GREATEST(fav_nums + $2, 0) WHERE id = $1"
            }
            Self::Teacher => {
                "UPDATE teacher SET fav_nums = GREATEST(fav_nums + $2, 0) WHERE id = $1"
            }
        }
    }
}

impl TryFrom<i64> for FavoriteKind {
    type Error = i64;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Course),
            2 => Ok(Self::Organization),
            3 => Ok(Self::Teacher),
            other => Err(other),
        }
    }
}

/// The entity a favorite points at.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FavoriteTarget {
    /// The ID of the course, organization or teacher.
    pub id: i64,
    /// Which table `id` refers to.
    pub kind: FavoriteKind,
}

impl FavoriteTarget {
    /// A favorite pointing at an organization.
    pub const fn organization(id: i64) -> Self {
        Self {
            id,
            kind: FavoriteKind::Organization,
        }
    }
    /// A favorite pointing at a teacher.
    pub const fn teacher(id: i64) -> Self {
        Self {
            id,
            kind: FavoriteKind::Teacher,
        }
    }
    /// A favorite pointing at a course.
    pub const fn course(id: i64) -> Self {
        Self {
            id,
            kind: FavoriteKind::Course,
        }
    }
}

/// INSERT model for a `Favorite`.
pub struct FavoriteInsert {
    /// The user bookmarking the target.
    pub user_id: Uuid,
    /// The bookmarked entity.
    pub target: FavoriteTarget,
}

/// A `Favorite` which is stored in the database.
#[derive(FromRow, Debug)]
pub struct Favorite {
    /// The favorite's ID primary key.
    pub id: i64,
    /// The user who owns the favorite.
    pub user_id: Uuid,
    /// The ID of the bookmarked entity.
    pub fav_id: i64,
    /// The kind code of the bookmarked entity.
    pub fav_type: i16,
    /// When the favorite was created.
    pub add_time: PrimitiveDateTime,
}

impl FavoriteInsert {
    /// Store this favorite inside the given transaction. Returns `None` if an
    /// identical favorite already exists.
    pub async fn store(
        self,
        tx: &mut Transaction<'_>,
    ) -> Result<Option<Favorite>, DatabaseError> {
        Ok(query_as::<_, Favorite>(
            "INSERT INTO user_favorite (user_id, fav_id, fav_type) VALUES ($1, $2, $3)
            ON CONFLICT (user_id, fav_id, fav_type) DO NOTHING RETURNING *",
        )
        .bind(self.user_id)
        .bind(self.target.id)
        .bind(self.target.kind.code())
        .fetch_optional(&mut **tx)
        .await?)
    }
}

impl Favorite {
    /// Whether the user has favorited the target.
    pub async fn exists(
        user_id: Uuid,
        target: FavoriteTarget,
        db_client: &ConnectionPool,
    ) -> Result<bool, DatabaseError> {
        Ok(query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_favorite WHERE user_id = $1 AND fav_id = $2 AND fav_type = $3)",
        )
        .bind(user_id)
        .bind(target.id)
        .bind(target.kind.code())
        .fetch_one(db_client)
        .await?)
    }

    /// Delete the user's favorite of the target inside the given transaction.
    /// Returns whether a row was deleted.
    pub async fn remove(
        user_id: Uuid,
        target: FavoriteTarget,
        tx: &mut Transaction<'_>,
    ) -> Result<bool, DatabaseError> {
        Ok(query_scalar::<_, i64>(
            "DELETE FROM user_favorite WHERE user_id = $1 AND fav_id = $2 AND fav_type = $3 RETURNING id",
        )
        .bind(user_id)
        .bind(target.id)
        .bind(target.kind.code())
        .fetch_optional(&mut **tx)
        .await?
        .is_some())
    }

    /// Add `delta` to the target's favorite counter, clamped at zero. Returns
    /// whether the target exists.
    pub async fn adjust_count(
        target: FavoriteTarget,
        delta: i64,
        tx: &mut Transaction<'_>,
    ) -> Result<bool, DatabaseError> {
        Ok(query(target.kind.adjust_count_sql())
            .bind(target.id)
            .bind(delta)
            .execute(&mut **tx)
            .await?
            .rows_affected()
            > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip_through_the_column_value() {
        for kind in [
            FavoriteKind::Course,
            FavoriteKind::Organization,
            FavoriteKind::Teacher,
        ] {
            assert_eq!(FavoriteKind::try_from(i64::from(kind.code())), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_codes_are_rejected() {
        assert_eq!(FavoriteKind::try_from(0), Err(0));
        assert_eq!(FavoriteKind::try_from(4), Err(4));
        assert_eq!(FavoriteKind::try_from(-2), Err(-2));
    }
}
