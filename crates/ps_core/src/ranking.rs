use crate::types::{Article, SearchResponse};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleRanker: Send + Sync {
    /// Human-readable name of the ranking model.
    fn name(&self) -> &str;

    /// Score `articles` against a free-text user profile and return at most
    /// `limit` of them, sorted by descending score.
    async fn rank(&self, articles: Vec<Article>, profile: &str, limit: usize)
        -> Result<SearchResponse>;
}
