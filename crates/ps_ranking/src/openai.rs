use std::fmt;

use async_trait::async_trait;
use ps_core::{Article, ArticleRanker, Result, SearchResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::reply;
use crate::{passthrough, NO_PROFILE_REASONING, NO_PROFILE_SUMMARY};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str = "You are a research paper recommendation system. \
Your task is to analyze articles and match them with a user's research \
profile. Provide detailed reasoning for your selections.";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Ranks articles against a profile through an OpenAI-style chat-completions
/// API. Transport failures and malformed replies degrade to the unranked
/// candidate prefix rather than failing the search.
pub struct OpenAiRanker {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiRanker {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ps_core::Error::Ranking("empty model reply".to_string()))
    }
}

impl fmt::Debug for OpenAiRanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiRanker")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

pub fn build_prompt(articles: &[Article], profile: &str) -> String {
    let articles_text = articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            format!(
                "Article {}:\nTitle: {}\nSummary: {}",
                i + 1,
                article.title,
                article.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Given the following user profile and list of articles, analyze and rank \
the articles based on their relevance to the user's research profile, \
expertise, and interests.\n\n\
User Profile:\n{profile}\n\n\
Articles:\n{articles_text}\n\n\
For each article, provide:\n\
1. A relevance score (0-100)\n\
2. A brief explanation of why this article matches or doesn't match the profile\n\n\
Format your response as follows:\n\
RANKINGS:\n\
1: [article number], [score]\n\
2: [article number], [score]\n\
(etc.)\n\n\
EXPLANATIONS:\n\
[article number]: [explanation]\n\
[article number]: [explanation]\n\
(etc.)\n\n\
SUMMARY:\n\
[Brief overall explanation of your ranking decisions]"
    )
}

#[async_trait]
impl ArticleRanker for OpenAiRanker {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn rank(
        &self,
        articles: Vec<Article>,
        profile: &str,
        limit: usize,
    ) -> Result<SearchResponse> {
        if profile.trim().is_empty() {
            return Ok(passthrough(
                articles,
                limit,
                NO_PROFILE_REASONING,
                NO_PROFILE_SUMMARY,
            ));
        }

        let prompt = build_prompt(&articles, profile);
        let outcome = match self.complete(prompt).await {
            Ok(text) => reply::parse(&text),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(reply) => Ok(reply.apply(&articles, limit)),
            Err(e) => {
                tracing::error!("ranking failed: {}", e);
                Ok(passthrough(
                    articles,
                    limit,
                    "Ranking failed",
                    format!("Error during ranking: {}", e),
                ))
            }
        }
    }
}
