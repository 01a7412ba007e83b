use std::path::Path;

use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use shared::api::Object;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

mod exercises;
pub use exercises::*;

mod users;
pub use users::*;

use crate::{errors::ApiError, state::AppState};

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Assemble the application router: the four api routes, static assets, and a
/// JSON 404 for everything else
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(create_exercise))
        .route(Object::UserLogs.path(), get(list_logs))
        .fallback_service(ServeDir::new(assets_dir).not_found_service(not_found.into_service()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
