use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared::{
    api::payloads::{CreateExerciseRequest, ExerciseResponse, LogsQuery, LogsResponse},
    model::{Exercise, ExerciseFilter, NewExercise, User, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::{
    db::DatabaseConnection,
    errors::{constraint_kind, ApiError, ConstraintKind},
};

/// Resolve the `:id` path segment to a stored user. Ids that don't even parse
/// as uuids can't name a user, so they get the same not-found treatment.
fn fetch_path_user(
    conn: &rusqlite::Connection,
    user_id: &str,
) -> Result<User, ApiError> {
    let user = match Uuid::parse(user_id) {
        Ok(id) => User::fetch_by_id(conn, &id)?,
        Err(_) => None,
    };

    user.ok_or_else(|| ApiError::not_found("User not found"))
}

#[instrument]
pub async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<String>,
    Json(req): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseResponse>), ApiError> {
    req.validate()?;

    let response = conn
        .interact(move |conn| {
            let user = fetch_path_user(conn, &user_id)?;

            let date = req.date()?.unwrap_or_else(|| Utc::now().date_naive());
            let new_exercise = NewExercise::new(
                Uuid::new_v4(),
                user.id,
                req.description()?,
                req.duration()?,
                date,
            );

            let exercise =
                Exercise::create(conn, new_exercise).map_err(|e| match constraint_kind(&e) {
                    Some(ConstraintKind::Check) => ApiError::validation(
                        "Duration should be positive number greater or equal 0.01",
                    ),
                    _ => ApiError::from(e),
                })?;

            Ok::<_, ApiError>(ExerciseResponse::new(exercise, user.username))
        })
        .await??;

    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument]
pub async fn list_logs(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<String>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let (date_range, limit) = query.parse()?;

    let response = conn
        .interact(move |conn| {
            let user = fetch_path_user(conn, &user_id)?;

            let filter = ExerciseFilter {
                user_id: user.id,
                date_range,
            };

            let count = Exercise::count_where(conn, &filter)?;
            let logs = Exercise::find_where(conn, &filter, limit)?;

            Ok::<_, ApiError>(LogsResponse {
                username: user.username,
                id: user.id,
                count,
                logs,
            })
        })
        .await??;

    Ok(Json(response))
}
