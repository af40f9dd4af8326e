//! API routes within the application. Each area exposes a sub-router which is
//! nested under `/org` and wrapped in the shared middleware here.
pub mod organizations;
pub mod teachers;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    constants::api::{API_URI_PREFIX, MEDIA_ROOT, STATIC_ROOT},
    middleware::{hosts::allowed_hosts_middleware, session::session_middleware},
    state::AppState,
};

/// Build the complete application router.
pub fn create_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(root))
        .nest(
            "/org",
            organizations::create_router().merge(teachers::create_router()),
        )
        .nest_service("/static", ServeDir::new(STATIC_ROOT.as_str()))
        .nest_service("/media", ServeDir::new(MEDIA_ROOT.as_str()));
    let prefix = API_URI_PREFIX.trim_end_matches('/');
    let app = if prefix.is_empty() {
        app
    } else {
        Router::new().nest(prefix, app)
    };
    app.layer(from_fn_with_state(state.clone(), session_middleware))
        .layer(from_fn(allowed_hosts_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Simply a healthcheck that this service is functional.
async fn root() -> Json<String> {
    Json("Course catalog service is running".to_owned())
}
