use axum::routing::get;
use axum::Router;

use crate::handlers::region;
use crate::state::AppState;

/// Region routes, versioned by the first path segment.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{version}/regions",
            get(region::list_regions).post(region::create_region),
        )
        .route(
            "/{version}/regions/{id}",
            get(region::get_region)
                .put(region::update_region)
                .delete(region::delete_region),
        )
}
