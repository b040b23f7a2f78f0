use std::sync::Arc;

use ps_core::{ArticleRanker, ArticleSource, ArticleStore};

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub ranker: Arc<dyn ArticleRanker>,
    pub store: Arc<dyn ArticleStore>,
}
