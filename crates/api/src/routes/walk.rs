use axum::routing::get;
use axum::Router;

use crate::handlers::walk;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/walks", get(walk::list_walks).post(walk::create_walk))
        .route(
            "/walks/{id}",
            get(walk::get_walk)
                .put(walk::update_walk)
                .delete(walk::delete_walk),
        )
}
