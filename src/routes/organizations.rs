//! Routes for the organization list, the organization detail tabs, inquiries
//! and favorites.
use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Extension, Form, Json, Router,
};

use crate::{
    middleware::session::csrf_middleware,
    services::{
        favorites::{self, FavoriteForm, FavoriteToggle},
        inquiries::{self, InquiryForm},
        organizations::{self, OrgDetailPage, OrgListPage, OrgListQuery, OrgTab},
        sessions::Viewer,
    },
    state::AppState,
    utils::{ajax::StatusReply, httperror::HttpError},
};

/// Create a router for routes under the organization service.
pub fn create_router() -> Router<AppState> {
    let pages = Router::new()
        .route("/list/", get(list_organizations))
        .route("/home/{org_id}/", get(org_home))
        .route("/course/{org_id}/", get(org_courses))
        .route("/desc/{org_id}/", get(org_description))
        .route("/teachers/{org_id}/", get(org_teachers));
    let actions = Router::new()
        .route("/add_ask/", post(add_inquiry))
        .route("/add_fav/", post(toggle_favorite))
        .layer(from_fn(csrf_middleware));
    pages.merge(actions)
}

/// Search, filter and paginate organizations.
async fn list_organizations(
    State(state): State<AppState>,
    Query(query): Query<OrgListQuery>,
) -> Result<Json<OrgListPage>, HttpError> {
    Ok(Json(
        organizations::list_organizations(query, &state.db_conn).await?,
    ))
}

/// Load one detail tab for the organization.
async fn org_tab(
    state: &AppState,
    viewer: &Viewer,
    org_id: i64,
    tab: OrgTab,
) -> Result<Json<OrgDetailPage>, HttpError> {
    Ok(Json(
        organizations::organization_detail(org_id, tab, viewer, &state.db_conn).await?,
    ))
}

/// The organization's home tab. Counts as a view.
async fn org_home(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(org_id): Path<i64>,
) -> Result<Json<OrgDetailPage>, HttpError> {
    org_tab(&state, &viewer, org_id, OrgTab::Home).await
}

/// The organization's course tab.
async fn org_courses(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(org_id): Path<i64>,
) -> Result<Json<OrgDetailPage>, HttpError> {
    org_tab(&state, &viewer, org_id, OrgTab::Course).await
}

/// The organization's description tab.
async fn org_description(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(org_id): Path<i64>,
) -> Result<Json<OrgDetailPage>, HttpError> {
    org_tab(&state, &viewer, org_id, OrgTab::Desc).await
}

/// The organization's teacher tab.
async fn org_teachers(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(org_id): Path<i64>,
) -> Result<Json<OrgDetailPage>, HttpError> {
    org_tab(&state, &viewer, org_id, OrgTab::Teacher).await
}

/// Read a form body, treating an unreadable one as a form with every field
/// missing.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    form.map_or_else(
        |rejection| {
            tracing::debug!(%rejection, "Unreadable form body, treating fields as missing");
            T::default()
        },
        |Form(form)| form,
    )
}

/// Leave an inquiry about a course.
async fn add_inquiry(
    State(state): State<AppState>,
    form: Result<Form<InquiryForm>, FormRejection>,
) -> Result<StatusReply, HttpError> {
    let form = form_or_default(form);
    match inquiries::add_inquiry(&form, &state.db_conn).await {
        Ok(_) => Ok(StatusReply::success()),
        Err(inquiries::errors::InquiryError::InvalidField(field)) => {
            tracing::debug!(field, "Rejected inquiry");
            Ok(StatusReply::fail("failed to add inquiry"))
        }
        Err(inquiries::errors::InquiryError::DatabaseError(err)) => Err(err.into()),
    }
}

/// Favorite the target if the viewer has not yet, otherwise unfavorite it.
async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    form: Result<Form<FavoriteForm>, FormRejection>,
) -> Result<StatusReply, HttpError> {
    let form = form_or_default(form);
    match favorites::toggle_favorite(&viewer, &form, &state.db_conn).await {
        Ok(FavoriteToggle::Favorited) => Ok(StatusReply::success_with("favorited")),
        Ok(FavoriteToggle::Unfavorited) => Ok(StatusReply::success_with("unfavorited")),
        Err(err) => favorite_failure(err),
    }
}

/// Turn a failed toggle into the reply the page script expects.
fn favorite_failure(err: favorites::errors::FavoriteError) -> Result<StatusReply, HttpError> {
    use favorites::errors::FavoriteError;
    match err {
        FavoriteError::DatabaseError(error) => Err(error.into()),
        FavoriteError::Unauthenticated => Ok(StatusReply::fail("user not logged in")),
        FavoriteError::InvalidInput(value) => {
            tracing::debug!(%value, "Rejected favorite with invalid field");
            Ok(StatusReply::fail("invalid favorite"))
        }
        FavoriteError::TargetNonExistent(target) => {
            tracing::warn!(?target, "Attempted to favorite a target which does not exist");
            Ok(StatusReply::fail("favorite target not found"))
        }
        FavoriteError::Conflict(target) => {
            tracing::warn!(?target, "Concurrent favorite toggle lost the race");
            Ok(StatusReply::fail("favorite changed concurrently, retry"))
        }
    }
}

impl From<organizations::errors::OrgListError> for HttpError {
    fn from(err: organizations::errors::OrgListError) -> Self {
        match err {
            organizations::errors::OrgListError::DatabaseError(error) => error.into(),
            organizations::errors::OrgListError::InvalidCity(city) => {
                tracing::debug!(%city, "Rejected organization list with invalid city");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    Some(format!("City {city:?} is not a valid city ID")),
                )
            }
            organizations::errors::OrgListError::EmptyPage(page) => {
                Self::new(StatusCode::NOT_FOUND, Some(page.to_string()))
            }
        }
    }
}

impl From<organizations::errors::OrgDetailError> for HttpError {
    fn from(err: organizations::errors::OrgDetailError) -> Self {
        match err {
            organizations::errors::OrgDetailError::DatabaseError(error) => error.into(),
            organizations::errors::OrgDetailError::NonExistent(org_id) => {
                tracing::debug!(org_id, "Requested an organization which does not exist");
                Self::not_found("Organization", org_id)
            }
        }
    }
}
