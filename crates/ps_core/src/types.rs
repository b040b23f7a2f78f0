use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate article as fetched from the upstream source, before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

/// An article scored against a user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub score: f64,
    pub reasoning: String,
}

/// Wire payload for a search: ranked articles in descending score order plus
/// the ranker's overall rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub articles: Vec<RankedArticle>,
    pub llm_reasoning: String,
}

/// Wire payload for a save: what was stored and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
    pub saved_files: Vec<String>,
}

impl RankedArticle {
    pub fn unranked(article: Article, reasoning: impl Into<String>) -> Self {
        Self {
            article,
            score: 0.0,
            reasoning: reasoning.into(),
        }
    }
}
