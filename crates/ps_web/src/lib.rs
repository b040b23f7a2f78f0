use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    // The UI is served from a different origin.
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/search/:query", get(handlers::search_articles))
        .route("/save", post(handlers::save_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ps_core::{Article, Error, RankedArticle, Result, SearchResponse};
}
