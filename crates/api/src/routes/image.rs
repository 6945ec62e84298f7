use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Upload route. The body limit sits above the 10 MiB image limit so that
/// oversize files reach validation and get a field error.
pub fn router(max_upload_body_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/images/upload",
        post(image::upload_image).layer(DefaultBodyLimit::max(max_upload_body_bytes)),
    )
}
