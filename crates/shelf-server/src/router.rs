use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all catalogue endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/author", post(handler::create_author))
        .route(
            "/author/:id",
            put(handler::update_author).delete(handler::delete_author),
        )
        .route("/book", post(handler::create_book))
        .route("/books", get(handler::list_books))
        .route(
            "/book/:id",
            get(handler::get_book)
                .put(handler::update_book)
                .delete(handler::delete_book),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
