//! Favorite (bookmark) handling: checking whether a viewer has favorited
//! something and toggling favorites on and off.
//!
//! A favorite row and its target's `fav_nums` counter change together in one
//! transaction. Removing a favorite decrements the counter (never below zero)
//! and adding one increments it, so toggling twice restores both the row set
//! and the counter.
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::{
        self,
        models::favorite::{Favorite, FavoriteInsert, FavoriteKind, FavoriteTarget},
    },
    services::sessions::Viewer,
};

/// The body of a favorite toggle request. Fields are kept as text so that
/// missing or malformed values produce a failure reply rather than a
/// rejected request.
#[derive(Deserialize, Default, Debug)]
pub struct FavoriteForm {
    /// ID of the course, organization or teacher.
    #[serde(default)]
    pub fav_id: Option<String>,
    /// Kind code: 1 course, 2 organization, 3 teacher.
    #[serde(default)]
    pub fav_type: Option<String>,
}

/// What a toggle did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FavoriteToggle {
    /// A new favorite was stored.
    Favorited,
    /// An existing favorite was removed.
    Unfavorited,
}

/// Storage able to answer favorite lookups and apply toggles atomically.
#[expect(
    async_fn_in_trait,
    reason = "Only ever called with concrete store types"
)]
pub trait FavoriteStore {
    /// Whether `user_id` has favorited `target`.
    async fn is_favorited(
        &self,
        user_id: Uuid,
        target: FavoriteTarget,
    ) -> Result<bool, db::errors::DatabaseError>;
    /// Remove the favorite if it exists, otherwise add it, adjusting the
    /// target's counter in the same unit of work.
    async fn toggle(
        &self,
        user_id: Uuid,
        target: FavoriteTarget,
    ) -> Result<FavoriteToggle, errors::FavoriteError>;
}

impl FavoriteStore for db::ConnectionPool {
    async fn is_favorited(
        &self,
        user_id: Uuid,
        target: FavoriteTarget,
    ) -> Result<bool, db::errors::DatabaseError> {
        Favorite::exists(user_id, target, self).await
    }

    async fn toggle(
        &self,
        user_id: Uuid,
        target: FavoriteTarget,
    ) -> Result<FavoriteToggle, errors::FavoriteError> {
        let mut tx = self.begin().await.map_err(db::errors::DatabaseError::from)?;
        if Favorite::remove(user_id, target, &mut tx).await? {
            // The target may have been deleted since; the row goes regardless.
            Favorite::adjust_count(target, -1, &mut tx).await?;
            tx.commit().await.map_err(db::errors::DatabaseError::from)?;
            return Ok(FavoriteToggle::Unfavorited);
        }
        let inserted = FavoriteInsert { user_id, target }.store(&mut tx).await?;
        if inserted.is_none() {
            return Err(errors::FavoriteError::Conflict(target));
        }
        if !Favorite::adjust_count(target, 1, &mut tx).await? {
            return Err(errors::FavoriteError::TargetNonExistent(target));
        }
        tx.commit().await.map_err(db::errors::DatabaseError::from)?;
        Ok(FavoriteToggle::Favorited)
    }
}

/// Whether the viewer has favorited `target`. Anonymous viewers never have,
/// and no lookup is made for them.
pub async fn is_favorited<S: FavoriteStore>(
    viewer: &Viewer,
    target: FavoriteTarget,
    store: &S,
) -> Result<bool, db::errors::DatabaseError> {
    match viewer.user_id() {
        None => Ok(false),
        Some(user_id) => store.is_favorited(user_id, target).await,
    }
}

/// Turn the raw form fields into a favorite target.
pub fn parse_target(form: &FavoriteForm) -> Result<FavoriteTarget, errors::FavoriteError> {
    let parse = |raw: Option<&str>| -> Result<i64, errors::FavoriteError> {
        raw.map_or(Ok(0), |raw| {
            raw.trim()
                .parse()
                .map_err(|_err| errors::FavoriteError::InvalidInput(raw.to_owned()))
        })
    };
    let fav_id = parse(form.fav_id.as_deref())?;
    let fav_type = parse(form.fav_type.as_deref())?;
    if fav_id <= 0 {
        return Err(errors::FavoriteError::InvalidInput(fav_id.to_string()));
    }
    let kind = FavoriteKind::try_from(fav_type)
        .map_err(|code| errors::FavoriteError::InvalidInput(code.to_string()))?;
    Ok(FavoriteTarget { id: fav_id, kind })
}

/// Toggle the viewer's favorite of the target named by `form`.
pub async fn toggle_favorite<S: FavoriteStore>(
    viewer: &Viewer,
    form: &FavoriteForm,
    store: &S,
) -> Result<FavoriteToggle, errors::FavoriteError> {
    let user_id = viewer
        .user_id()
        .ok_or(errors::FavoriteError::Unauthenticated)?;
    let target = parse_target(form)?;
    let toggle = store.toggle(user_id, target).await?;
    tracing::info!(%user_id, ?target, ?toggle, "Favorite toggled");
    Ok(toggle)
}

pub mod errors {
    use crate::db::{errors::DatabaseError, models::favorite::FavoriteTarget};
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum FavoriteError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Only authenticated users can favorite.")]
        Unauthenticated,
        #[error("Invalid favorite field value {0:?}.")]
        InvalidInput(String),
        #[error("The favorite target {0:?} does not exist.")]
        TargetNonExistent(FavoriteTarget),
        #[error("The favorite of {0:?} was changed by a concurrent request.")]
        Conflict(FavoriteTarget),
    }
}
