use async_trait::async_trait;
use ps_core::{Article, ArticleSource, Error, Result};
use url::Url;

pub mod feed;

pub use feed::parse_feed;

const DEFAULT_BASE_URL: &str = "http://export.arxiv.org/api/query";

/// Client for the arXiv export API.
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn query_url(&self, query: &str, max_results: usize) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("search_query", format!("all:{}", query)),
                ("start", "0".to_string()),
                ("max_results", max_results.to_string()),
                ("sortBy", "relevance".to_string()),
                ("sortOrder", "descending".to_string()),
            ],
        )
        .map_err(|e| Error::Source(format!("invalid arXiv query URL: {}", e)))
    }
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for ArxivClient {
    fn name(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidQuery("query must not be empty".to_string()));
        }

        let url = self.query_url(query, max_results)?;
        tracing::debug!("fetching {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "arXiv returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let mut articles = parse_feed(&body)?;
        articles.truncate(max_results);
        Ok(articles)
    }
}

/// Extract the arXiv id from an abstract link such as
/// `http://arxiv.org/abs/2401.00001v1`.
pub fn arxiv_id(link: &str) -> Option<&str> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

/// PDF download URL for an abstract link.
pub fn pdf_url(link: &str) -> Option<String> {
    arxiv_id(link).map(|id| format!("https://arxiv.org/pdf/{}.pdf", id))
}
