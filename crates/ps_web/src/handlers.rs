use axum::{
    extract::{Path, Query, State},
    Json,
};
use ps_core::{
    ArticleRanker, ArticleSource, ArticleStore, Error, RankedArticle, SaveReceipt, SearchResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Upper bound on how many candidates a single search may pull from the
/// source.
pub const MAX_RESULTS_LIMIT: usize = 300;

fn default_max_results() -> usize {
    50
}

fn default_display_results() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_display_results")]
    pub display_results: usize,
    #[serde(default)]
    pub profile: String,
}

pub async fn search_articles(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = query.trim().to_string();
    if query.is_empty() {
        return Err(Error::InvalidQuery("query must not be empty".to_string()).into());
    }
    if params.max_results < 1 || params.max_results > MAX_RESULTS_LIMIT {
        return Err(Error::InvalidQuery(format!(
            "max_results must be between 1 and {}",
            MAX_RESULTS_LIMIT
        ))
        .into());
    }
    if params.display_results < 1 || params.display_results > params.max_results {
        return Err(Error::InvalidQuery(
            "display_results must be between 1 and max_results".to_string(),
        )
        .into());
    }

    tracing::info!(
        "🔎 searching {:?} on {} (max {}, display {})",
        query,
        state.source.name(),
        params.max_results,
        params.display_results
    );
    let candidates = state.source.search(&query, params.max_results).await?;
    let response = state
        .ranker
        .rank(candidates, &params.profile, params.display_results)
        .await?;
    Ok(Json(response))
}

pub async fn save_articles(
    State(state): State<Arc<AppState>>,
    Json(articles): Json<Vec<RankedArticle>>,
) -> Result<Json<SaveReceipt>, ApiError> {
    tracing::info!("💾 saving {} articles to {}", articles.len(), state.store.name());
    let receipt = state.store.save_articles(&articles).await?;
    Ok(Json(receipt))
}
