//! Handlers for `/api/{version}/regions`.
//!
//! Every handler authorizes the caller, then resolves the requested API
//! version, and only then touches the repository.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use nzwalks_core::dto::{AddRegionRequest, UpdateRegionRequest};
use nzwalks_core::entity::Entity;
use nzwalks_core::error::CoreError;
use nzwalks_core::mapping::ToDomain;
use nzwalks_core::region::Region;
use nzwalks_core::roles::{authorize, READ_ACCESS, WRITE_ACCESS};
use nzwalks_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Region::NAME,
        id,
    })
}

/// GET /api/{version}/regions
///
/// Supports `filterOn`, `filterQuery`, `sortBy`, `isAscending`, `pageNumber`
/// and `pageSize`.
pub async fn list_regions(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<String>, AppError>,
    params: Result<AppQuery<ListParams>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, READ_ACCESS)?;
    let AppPath(version) = path?;
    let projection = state.mappers.regions.resolve(&version)?;
    let AppQuery(params) = params?;
    let query = params.into_query()?;

    let regions = state.regions.get_all(&query).await?;

    tracing::info!(
        count = regions.len(),
        version = %projection.version(),
        "Listed regions"
    );
    Ok(Json(projection.apply_all(&regions)))
}

/// GET /api/{version}/regions/{id}
pub async fn get_region(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<(String, DbId)>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, READ_ACCESS)?;
    let AppPath((version, id)) = path?;
    let projection = state.mappers.regions.resolve(&version)?;

    let region = state.regions.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(projection.apply(&region)))
}

/// POST /api/{version}/regions
///
/// Responds 201 with a `Location` header pointing at the new region.
pub async fn create_region(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<String>, AppError>,
    body: Result<AppJson<AddRegionRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let AppPath(version) = path?;
    let projection = state.mappers.regions.resolve(&version)?;
    let AppJson(input) = body?;
    let input = input.to_domain()?;

    let region = state.regions.create(&input).await?;

    tracing::info!(
        region_id = %region.id,
        code = %region.code,
        subject = %ctx.subject,
        "Region created"
    );

    let location = format!("/api/{}/regions/{}", projection.version(), region.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(projection.apply(&region)),
    ))
}

/// PUT /api/{version}/regions/{id}
pub async fn update_region(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<(String, DbId)>, AppError>,
    body: Result<AppJson<UpdateRegionRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let AppPath((version, id)) = path?;
    let projection = state.mappers.regions.resolve(&version)?;
    let AppJson(input) = body?;
    let input = input.to_domain()?;

    let region = state
        .regions
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(region_id = %id, subject = %ctx.subject, "Region updated");
    Ok(Json(projection.apply(&region)))
}

/// DELETE /api/{version}/regions/{id}
///
/// Returns the region as it was before deletion. Its walks are deleted too.
pub async fn delete_region(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<(String, DbId)>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let AppPath((version, id)) = path?;
    let projection = state.mappers.regions.resolve(&version)?;

    let region = state.regions.delete(id).await?.ok_or_else(|| not_found(id))?;

    tracing::info!(region_id = %id, subject = %ctx.subject, "Region deleted");
    Ok(Json(projection.apply(&region)))
}
