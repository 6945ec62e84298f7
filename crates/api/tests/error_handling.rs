//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use nzwalks_api::error::{AppError, INTERNAL_ERROR_MESSAGE};
use nzwalks_core::error::{CoreError, FieldErrors};
use nzwalks_db::DbError;
use uuid::Uuid;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = Uuid::nil();
    let err = AppError::Core(CoreError::NotFound { entity: "Region", id });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Region with id {id} not found"));
}

// ---------------------------------------------------------------------------
// Test: Validation carries the per-field messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400_with_field_map() {
    let mut errors = FieldErrors::new();
    errors.add("code", "Code has to be exactly 3 characters");
    errors.add("name", "Name is required");
    let err = AppError::Core(CoreError::Validation(errors));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"]["code"][0], "Code has to be exactly 3 characters");
    assert_eq!(json["errors"]["name"][0], "Name is required");
}

// ---------------------------------------------------------------------------
// Test: Configuration (unsupported version) maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configuration_error_returns_400() {
    let err = AppError::Core(CoreError::Configuration("Unsupported API version 'v9'".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNSUPPORTED_API_VERSION");
}

// ---------------------------------------------------------------------------
// Test: Auth errors map to 401 / 403
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_errors_return_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = error_to_response(AppError::Core(CoreError::Forbidden("no".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: MissingReference maps to a validation error on the field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_reference_returns_field_error() {
    let err = AppError::Database(DbError::MissingReference {
        field: "regionId",
        entity: "Region",
        id: Uuid::nil(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["regionId"][0].as_str().unwrap().contains("does not exist"));
}

// ---------------------------------------------------------------------------
// Test: Internal errors are sanitized and carry a correlation id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Database(DbError::Sqlx(sqlx::Error::Protocol(
        "secret database credentials leaked".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
    assert!(!json.to_string().contains("credentials"));
}

#[tokio::test]
async fn core_internal_error_is_sanitized_too() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("disk full".into()))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn unclassified_sqlx_error_is_internal() {
    let err = AppError::Database(DbError::Sqlx(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["id"].is_string());
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}
