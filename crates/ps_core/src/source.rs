use crate::types::Article;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable name of the upstream source.
    fn name(&self) -> &str;

    /// Fetch up to `max_results` candidate articles for a query, most
    /// relevant first.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Article>>;
}
