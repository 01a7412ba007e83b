use axum::{http::StatusCode, Json};
use shared::{
    api::payloads::{CreateUserRequest, UserListResponse},
    model::{NewUser, User, ValidateModel},
    types::Uuid,
};
use tracing::instrument;

use crate::{
    db::DatabaseConnection,
    errors::{constraint_kind, ApiError, ConstraintKind},
};

#[instrument]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = conn
        .interact(|conn| Ok::<_, ApiError>(User::fetch_all(conn)?))
        .await??;

    Ok(Json(UserListResponse { users }))
}

#[instrument]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    req.validate()?;
    let new_user = NewUser::new(Uuid::new_v4(), req.username()?);

    let user = conn
        .interact(move |conn| {
            if User::fetch_by_username(conn, &new_user.username)?.is_some() {
                Err(ApiError::conflict("Username already exists"))?;
            }

            // The storage unique constraint backstops the check above; a
            // concurrent insert between the two is still a conflict
            User::create(conn, new_user).map_err(|e| match constraint_kind(&e) {
                Some(ConstraintKind::Unique) => ApiError::conflict("Username already exists"),
                _ => ApiError::from(e),
            })
        })
        .await??;

    Ok((StatusCode::CREATED, Json(user)))
}
