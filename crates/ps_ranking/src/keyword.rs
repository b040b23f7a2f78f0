use async_trait::async_trait;
use ps_core::{Article, ArticleRanker, RankedArticle, Result, SearchResponse};

use crate::{passthrough, NO_PROFILE_REASONING, NO_PROFILE_SUMMARY};

/// Deterministic fallback ranker: scores each article by the fraction of
/// profile terms found in its title or description. Stands in for the LLM
/// when no API key is configured, and doubles as the test model.
#[derive(Debug, Clone, Default)]
pub struct KeywordRanker;

impl KeywordRanker {
    pub fn new() -> Self {
        Self
    }
}

fn terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(|t| t.to_string())
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

#[async_trait]
impl ArticleRanker for KeywordRanker {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn rank(
        &self,
        articles: Vec<Article>,
        profile: &str,
        limit: usize,
    ) -> Result<SearchResponse> {
        let profile_terms = terms(profile);
        if profile_terms.is_empty() {
            return Ok(passthrough(
                articles,
                limit,
                NO_PROFILE_REASONING,
                NO_PROFILE_SUMMARY,
            ));
        }

        let scored_count = articles.len();
        let mut ranked: Vec<RankedArticle> = articles
            .into_iter()
            .map(|article| {
                let haystack =
                    format!("{} {}", article.title, article.description).to_lowercase();
                let matched: Vec<&str> = profile_terms
                    .iter()
                    .filter(|term| haystack.contains(term.as_str()))
                    .map(|term| term.as_str())
                    .collect();
                let score = 100.0 * matched.len() as f64 / profile_terms.len() as f64;
                let reasoning = if matched.is_empty() {
                    "No profile terms matched".to_string()
                } else {
                    format!("Matches profile terms: {}", matched.join(", "))
                };
                RankedArticle {
                    article,
                    score,
                    reasoning,
                }
            })
            .collect();

        // Stable sort keeps the source's relevance order between equal scores.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        Ok(SearchResponse {
            articles: ranked,
            llm_reasoning: format!(
                "Keyword overlap ranking: scored {} articles against {} profile terms.",
                scored_count,
                profile_terms.len()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            link: format!("http://arxiv.org/abs/{}", title),
            published: Utc::now(),
        }
    }

    #[tokio::test]
    async fn scores_by_term_overlap() {
        let ranker = KeywordRanker::new();
        let articles = vec![
            article("Cooking", "nothing relevant here"),
            article("Quantum Computing Advances", "error correction on quantum hardware"),
            article("Quantum Chemistry", "molecular simulation"),
        ];

        let response = ranker
            .rank(articles, "quantum computing", 10)
            .await
            .unwrap();

        assert_eq!(response.articles.len(), 3);
        assert_eq!(
            response.articles[0].article.title,
            "Quantum Computing Advances"
        );
        assert_eq!(response.articles[0].score, 100.0);
        assert_eq!(response.articles[1].article.title, "Quantum Chemistry");
        assert_eq!(response.articles[1].score, 50.0);
        assert_eq!(response.articles[2].score, 0.0);
        assert!(response.articles[0]
            .reasoning
            .contains("computing, quantum"));
    }

    #[tokio::test]
    async fn respects_limit() {
        let ranker = KeywordRanker::new();
        let articles = (0..5)
            .map(|i| article(&format!("quantum {}", i), ""))
            .collect();

        let response = ranker.rank(articles, "quantum", 2).await.unwrap();
        assert_eq!(response.articles.len(), 2);
    }

    #[tokio::test]
    async fn empty_profile_is_passthrough() {
        let ranker = KeywordRanker::new();
        let articles = vec![article("a", ""), article("b", "")];

        let response = ranker.rank(articles, "", 10).await.unwrap();
        assert_eq!(response.articles.len(), 2);
        assert_eq!(response.articles[0].article.title, "a");
        assert!(response.articles.iter().all(|a| a.score == 0.0));
        assert_eq!(
            response.llm_reasoning,
            "No profile was provided for ranking."
        );
    }
}
