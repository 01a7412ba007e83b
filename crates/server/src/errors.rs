use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deadpool_sqlite::{HookError, InteractError, PoolError};
use shared::api::error::{ErrorMessage, ValidationError};
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped onto the four response
/// categories the API exposes. `Internal` keeps the underlying detail for the
/// server log; clients only ever see an opaque message for it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(detail: S) -> Self {
        ApiError::Internal(detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(detail) => {
                error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            },
        };

        (code, Json(ErrorMessage { message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.message)
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::internal(format!("sqlite: {err}"))
    }
}

impl From<InteractError> for ApiError {
    fn from(err: InteractError) -> Self {
        ApiError::internal(format!("interact: {err}"))
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        ApiError::internal(format!("pool: {err}"))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(format!("{err:#}"))
    }
}

impl From<ApiError> for HookError {
    fn from(err: ApiError) -> Self {
        Self::Message(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    Check,
    ForeignKey,
}

/// Classify a storage fault by its SQLite extended result code so handlers
/// can turn constraint violations into the matching taxonomy member.
///
/// See https://www.sqlite.org/rescode.html for the code list.
pub fn constraint_kind(err: &rusqlite::Error) -> Option<ConstraintKind> {
    use rusqlite::ffi;

    match err {
        rusqlite::Error::SqliteFailure(e, _) => match e.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                Some(ConstraintKind::Unique)
            },
            ffi::SQLITE_CONSTRAINT_CHECK => Some(ConstraintKind::Check),
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn_with_constraints() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().expect("open in-memory db");
        conn.execute_batch(
            "CREATE TABLE t (
                id INTEGER PRIMARY KEY,
                name TEXT UNIQUE,
                amount REAL CHECK (amount >= 0.01)
            );",
        )
        .expect("create table");
        conn
    }

    #[test]
    fn classifies_unique_violations() {
        let conn = conn_with_constraints();
        conn.execute("INSERT INTO t (name, amount) VALUES ('a', 1.0)", [])
            .expect("first insert");

        let err = conn
            .execute("INSERT INTO t (name, amount) VALUES ('a', 1.0)", [])
            .expect_err("duplicate insert");

        assert_eq!(constraint_kind(&err), Some(ConstraintKind::Unique));
    }

    #[test]
    fn classifies_check_violations() {
        let conn = conn_with_constraints();

        let err = conn
            .execute("INSERT INTO t (name, amount) VALUES ('b', 0.0)", [])
            .expect_err("check violation");

        assert_eq!(constraint_kind(&err), Some(ConstraintKind::Check));
    }

    #[test]
    fn other_faults_are_not_constraints() {
        let conn = conn_with_constraints();

        let err = conn
            .query_row("SELECT name FROM t WHERE id = 1", [], |row| {
                row.get::<_, String>(0)
            })
            .expect_err("no rows");

        assert_eq!(constraint_kind(&err), None);
    }
}
