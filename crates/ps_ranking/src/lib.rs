use std::sync::Arc;

use ps_core::{Article, ArticleRanker, RankedArticle, SearchResponse};

pub mod keyword;
pub mod openai;
pub mod reply;

pub use keyword::KeywordRanker;
pub use openai::OpenAiRanker;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

/// Pick a ranking model from the configuration. Without an API key the
/// deterministic keyword ranker stands in, so search still works offline.
pub fn create_ranker(config: Config) -> Arc<dyn ArticleRanker> {
    match config.api_key {
        Some(api_key) => Arc::new(OpenAiRanker::new(
            api_key,
            config.model_name,
            config.base_url,
        )),
        None => {
            tracing::warn!("no API key configured, using keyword ranking");
            Arc::new(KeywordRanker::new())
        }
    }
}

/// Unranked prefix of the candidate list, used when no profile was given or
/// when ranking degrades.
pub(crate) fn passthrough(
    articles: Vec<Article>,
    limit: usize,
    reasoning: &str,
    llm_reasoning: impl Into<String>,
) -> SearchResponse {
    SearchResponse {
        articles: articles
            .into_iter()
            .take(limit)
            .map(|article| RankedArticle::unranked(article, reasoning))
            .collect(),
        llm_reasoning: llm_reasoning.into(),
    }
}

pub(crate) const NO_PROFILE_REASONING: &str = "No profile provided";
pub(crate) const NO_PROFILE_SUMMARY: &str = "No profile was provided for ranking.";
