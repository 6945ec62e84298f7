pub mod health;
pub mod image;
pub mod region;
pub mod walk;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /{version}/regions                list (Reader|Writer), create (Writer)
/// /{version}/regions/{id}           get (Reader|Writer), update, delete (Writer)
///
/// /walks                            list (Reader|Writer), create (Writer)
/// /walks/{id}                       get (Reader|Writer), update, delete (Writer)
///
/// /images/upload                    multipart upload (Writer)
/// ```
///
/// `{version}` is `v1` or `v2` (also `1`, `1.0`, `v1.0`, any case).
pub fn api_routes(max_upload_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(region::router())
        .merge(walk::router())
        .merge(image::router(max_upload_body_bytes))
}
