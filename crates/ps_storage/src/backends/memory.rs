use async_trait::async_trait;
use ps_core::{ArticleStore, RankedArticle, Result, SaveReceipt};
use tokio::sync::RwLock;

/// Ephemeral store for tests and keyless local runs. Upserts by link so a
/// re-saved article keeps its original position.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<RankedArticle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn save_articles(&self, articles: &[RankedArticle]) -> Result<SaveReceipt> {
        let mut store = self.articles.write().await;
        for article in articles {
            if let Some(existing) = store
                .iter_mut()
                .find(|a| a.article.link == article.article.link)
            {
                *existing = article.clone();
            } else {
                store.push(article.clone());
            }
        }

        Ok(SaveReceipt {
            message: format!("{} articles saved to memory", articles.len()),
            saved_files: articles
                .iter()
                .map(|a| a.article.link.clone())
                .collect(),
        })
    }

    async fn load_saved(&self) -> Result<Vec<RankedArticle>> {
        Ok(self.articles.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ps_core::Article;

    fn ranked(title: &str, score: f64) -> RankedArticle {
        RankedArticle {
            article: Article {
                title: title.to_string(),
                description: format!("{} description", title),
                link: format!("http://arxiv.org/abs/{}", title),
                published: Utc::now(),
            },
            score,
            reasoning: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn round_trips_a_batch_in_order() {
        let store = MemoryStore::new();
        let batch = vec![ranked("a", 90.0), ranked("b", 50.0), ranked("c", 10.0)];

        let receipt = store.save_articles(&batch).await.unwrap();
        assert_eq!(receipt.saved_files.len(), 3);

        let loaded = store.load_saved().await.unwrap();
        assert_eq!(loaded, batch);
    }

    #[tokio::test]
    async fn resaving_updates_in_place() {
        let store = MemoryStore::new();
        store
            .save_articles(&[ranked("a", 10.0), ranked("b", 20.0)])
            .await
            .unwrap();
        store.save_articles(&[ranked("a", 99.0)]).await.unwrap();

        let loaded = store.load_saved().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].article.title, "a");
        assert_eq!(loaded[0].score, 99.0);
        assert_eq!(loaded[1].article.title, "b");
    }
}
