use crate::types::{RankedArticle, SaveReceipt};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Human-readable name of the backend.
    fn name(&self) -> &str;

    /// Durably persist a sequence of articles. Any per-article failure fails
    /// the whole batch.
    async fn save_articles(&self, articles: &[RankedArticle]) -> Result<SaveReceipt>;

    /// Read back everything previously saved.
    async fn load_saved(&self) -> Result<Vec<RankedArticle>>;
}
