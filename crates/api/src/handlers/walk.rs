//! Handlers for `/api/walks`. Walks have a single wire shape.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use nzwalks_core::dto::{AddWalkRequest, UpdateWalkRequest};
use nzwalks_core::entity::Entity;
use nzwalks_core::error::CoreError;
use nzwalks_core::mapping::ToDomain;
use nzwalks_core::roles::{authorize, READ_ACCESS, WRITE_ACCESS};
use nzwalks_core::types::DbId;
use nzwalks_core::walk::Walk;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Walk::NAME,
        id,
    })
}

/// GET /api/walks
pub async fn list_walks(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    params: Result<AppQuery<ListParams>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, READ_ACCESS)?;
    let projection = state.mappers.walk_projection()?;
    let AppQuery(params) = params?;
    let query = params.into_query()?;

    let walks = state.walks.get_all(&query).await?;

    tracing::info!(count = walks.len(), "Listed walks");
    Ok(Json(projection.apply_all(&walks)))
}

/// GET /api/walks/{id}
pub async fn get_walk(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<DbId>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, READ_ACCESS)?;
    let AppPath(id) = path?;
    let projection = state.mappers.walk_projection()?;

    let walk = state.walks.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(projection.apply(&walk)))
}

/// POST /api/walks
pub async fn create_walk(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    body: Result<AppJson<AddWalkRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let projection = state.mappers.walk_projection()?;
    let AppJson(input) = body?;
    let input = input.to_domain()?;

    let walk = state.walks.create(&input).await?;

    tracing::info!(
        walk_id = %walk.id,
        region_id = %walk.region_id,
        subject = %ctx.subject,
        "Walk created"
    );

    let location = format!("/api/walks/{}", walk.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(projection.apply(&walk)),
    ))
}

/// PUT /api/walks/{id}
pub async fn update_walk(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<DbId>, AppError>,
    body: Result<AppJson<UpdateWalkRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let AppPath(id) = path?;
    let projection = state.mappers.walk_projection()?;
    let AppJson(input) = body?;
    let input = input.to_domain()?;

    let walk = state
        .walks
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(walk_id = %id, subject = %ctx.subject, "Walk updated");
    Ok(Json(projection.apply(&walk)))
}

/// DELETE /api/walks/{id}
pub async fn delete_walk(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    path: Result<AppPath<DbId>, AppError>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let AppPath(id) = path?;
    let projection = state.mappers.walk_projection()?;

    let walk = state.walks.delete(id).await?.ok_or_else(|| not_found(id))?;

    tracing::info!(walk_id = %id, subject = %ctx.subject, "Walk deleted");
    Ok(Json(projection.apply(&walk)))
}
