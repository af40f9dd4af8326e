//! Routes for the teacher list and teacher detail pages.
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    services::{
        sessions::Viewer,
        teachers::{self, TeacherDetailPage, TeacherListPage, TeacherListQuery},
    },
    state::AppState,
    utils::httperror::HttpError,
};

/// Create a router for routes under the teacher service.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/teacher/list/", get(list_teachers))
        .route("/teacher/detail/{teacher_id}/", get(teacher_detail))
}

/// Search and paginate teachers.
async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<TeacherListQuery>,
) -> Result<Json<TeacherListPage>, HttpError> {
    Ok(Json(teachers::list_teachers(query, &state.db_conn).await?))
}

/// A teacher's detail page. Counts as a view.
async fn teacher_detail(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(teacher_id): Path<i64>,
) -> Result<Json<TeacherDetailPage>, HttpError> {
    Ok(Json(
        teachers::teacher_detail(teacher_id, &viewer, &state.db_conn).await?,
    ))
}

impl From<teachers::errors::TeacherListError> for HttpError {
    fn from(err: teachers::errors::TeacherListError) -> Self {
        match err {
            teachers::errors::TeacherListError::DatabaseError(error) => error.into(),
            teachers::errors::TeacherListError::EmptyPage(page) => {
                Self::new(StatusCode::NOT_FOUND, Some(page.to_string()))
            }
        }
    }
}

impl From<teachers::errors::TeacherDetailError> for HttpError {
    fn from(err: teachers::errors::TeacherDetailError) -> Self {
        match err {
            teachers::errors::TeacherDetailError::DatabaseError(error) => error.into(),
            teachers::errors::TeacherDetailError::NonExistent(teacher_id) => {
                tracing::debug!(teacher_id, "Requested a teacher which does not exist");
                Self::not_found("Teacher", teacher_id)
            }
        }
    }
}
