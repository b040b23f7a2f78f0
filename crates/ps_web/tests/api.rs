use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use ps_core::{
    Article, ArticleSource, ArticleStore, Error, RankedArticle, Result, SaveReceipt,
    SearchResponse,
};
use ps_ranking::KeywordRanker;
use ps_storage::MemoryStore;
use ps_web::{create_app, AppState};
use tower::ServiceExt;

struct StubSource {
    articles: Vec<Article>,
}

#[async_trait]
impl ArticleSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<Article>> {
        Ok(self.articles.iter().take(max_results).cloned().collect())
    }
}

struct FailingSource;

#[async_trait]
impl ArticleSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<Article>> {
        Err(Error::Source("upstream unreachable".to_string()))
    }
}

fn article(title: &str, description: &str) -> Article {
    Article {
        title: title.to_string(),
        description: description.to_string(),
        link: format!("http://arxiv.org/abs/{}", title.replace(' ', "-")),
        published: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
    }
}

fn fixture_articles() -> Vec<Article> {
    vec![
        article("Cooking at Home", "recipes and techniques"),
        article("Quantum Computing Advances", "quantum computing hardware"),
        article("Quantum Chemistry", "quantum simulation of molecules"),
    ]
}

async fn test_app(source: Arc<dyn ArticleSource>, store: Arc<MemoryStore>) -> axum::Router {
    create_app(AppState {
        source,
        ranker: Arc::new(KeywordRanker::new()),
        store,
    })
    .await
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn search_returns_ranked_articles_sorted_by_score() {
    let source = Arc::new(StubSource {
        articles: fixture_articles(),
    });
    let app = test_app(source, Arc::new(MemoryStore::new())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search/quantum?profile=quantum%20computing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: SearchResponse = body_json(response).await;
    assert_eq!(body.articles.len(), 3);
    assert_eq!(
        body.articles[0].article.title,
        "Quantum Computing Advances"
    );
    for pair in body.articles.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(!body.llm_reasoning.is_empty());
}

#[tokio::test]
async fn search_caps_results_at_display_results() {
    let source = Arc::new(StubSource {
        articles: fixture_articles(),
    });
    let app = test_app(source, Arc::new(MemoryStore::new())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search/quantum?display_results=1&profile=quantum")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: SearchResponse = body_json(response).await;
    assert_eq!(body.articles.len(), 1);
}

#[tokio::test]
async fn blank_query_is_rejected() {
    let source = Arc::new(StubSource {
        articles: fixture_articles(),
    });
    let app = test_app(source, Arc::new(MemoryStore::new())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search/%20%20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn out_of_range_bounds_are_rejected() {
    for uri in [
        "/search/quantum?max_results=0",
        "/search/quantum?max_results=301",
        "/search/quantum?max_results=5&display_results=6",
        "/search/quantum?display_results=0",
    ] {
        let source = Arc::new(StubSource {
            articles: fixture_articles(),
        });
        let app = test_app(source, Arc::new(MemoryStore::new())).await;

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn source_failure_is_a_generic_500() {
    let app = test_app(Arc::new(FailingSource), Arc::new(MemoryStore::new())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search/quantum")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("upstream"));
}

#[tokio::test]
async fn save_persists_the_submitted_sequence() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(StubSource {
        articles: fixture_articles(),
    });
    let app = test_app(source, store.clone()).await;

    let batch: Vec<RankedArticle> = fixture_articles()
        .into_iter()
        .enumerate()
        .map(|(i, article)| RankedArticle {
            article,
            score: 90.0 - 10.0 * i as f64,
            reasoning: format!("rank {}", i + 1),
        })
        .collect();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/save")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&batch).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let receipt: SaveReceipt = body_json(response).await;
    assert_eq!(receipt.saved_files.len(), 3);

    let loaded = store.load_saved().await.unwrap();
    assert_eq!(loaded, batch);
}
