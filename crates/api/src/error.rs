use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nzwalks_core::error::{CoreError, FieldErrors};
use nzwalks_db::DbError;
use serde_json::json;
use uuid::Uuid;

/// The only detail a client sees about an unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Something went wrong! We are looking into resolving this.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for storage errors,
/// and adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `nzwalks_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `nzwalks_db`.
    #[error(transparent)]
    Database(#[from] DbError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(errors) => return validation_response(errors),
                CoreError::Configuration(msg) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_API_VERSION",
                    msg.clone(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => return internal_error_response(msg),
            },

            // --- Repository errors ---
            AppError::Database(DbError::MissingReference { field, entity, id }) => {
                let mut errors = FieldErrors::new();
                errors.add(*field, format!("{entity} with id {id} does not exist"));
                return validation_response(&errors);
            }
            AppError::Database(DbError::Sqlx(err)) => return classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn validation_response(errors: &FieldErrors) -> Response {
    let body = json!({
        "error": format!("Validation failed: {errors}"),
        "code": "VALIDATION_ERROR",
        "errors": errors,
    });
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}

/// Log `detail` under a fresh correlation id and return a sanitized 500.
///
/// The correlation id in the body is the only way to find the log entry.
pub fn internal_error_response(detail: &str) -> Response {
    let id = Uuid::new_v4();
    tracing::error!(correlation_id = %id, error = %detail, "Unhandled error");

    let body = json!({
        "id": id,
        "error": INTERNAL_ERROR_MESSAGE,
        "code": "INTERNAL_ERROR",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP response.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (23505) map to 409.
/// - Foreign key violations (23503) not already turned into
///   [`DbError::MissingReference`] map to 400.
/// - Everything else maps to a correlated 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    let (status, code, message) = match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Referenced entity does not exist".to_string(),
        ),
        other => return internal_error_response(&other.to_string()),
    };

    (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
}
