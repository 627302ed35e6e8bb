use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/trending", get(handlers::trending_topics))
        .route("/api/drafts", post(handlers::create_draft))
        .route("/api/drafts/regenerate", post(handlers::regenerate_draft))
        .route("/api/drafts/validate", post(handlers::validate))
        .route("/api/drafts/approval-email", post(handlers::render_approval_email))
        .route("/api/publish", post(handlers::publish))
        .route("/api/social/connections", get(handlers::social_connections))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> nd_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nd_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use nd_core::{ArticleSource, RssArticle};
    use nd_feeds::{TopicConfig, TopicRanker};
    use nd_inference::models::CannedModel;
    use nd_inference::{DraftGenerator, StaticGuidelines};
    use nd_social::{SocialConfig, SocialPublisher};

    struct StaticSource(Vec<RssArticle>);

    #[async_trait]
    impl ArticleSource for StaticSource {
        async fn recent_articles(&self, _days_back: i64) -> Vec<RssArticle> {
            self.0.clone()
        }
    }

    fn article(n: usize) -> RssArticle {
        RssArticle {
            title: format!("Ransomware gang hits supplier #{}", n),
            link: format!("https://news.example.com/story-{}", n),
            pub_date: Utc::now(),
            content: "Full text.".to_string(),
            content_snippet: format!(
                "Story {} about a ransomware crew that encrypted the file servers of a regional supplier and demanded payment.",
                n
            ),
            source: "Example News".to_string(),
            author: None,
            categories: vec![],
        }
    }

    fn app(articles: Vec<RssArticle>) -> Router {
        let source: Arc<dyn ArticleSource> = Arc::new(StaticSource(articles));
        let state = AppState {
            ranker: Arc::new(TopicRanker::new(source.clone(), TopicConfig::default())),
            source,
            generator: Arc::new(DraftGenerator::new(
                Arc::new(CannedModel::sample()),
                Arc::new(StaticGuidelines::default()),
            )),
            publisher: Arc::new(SocialPublisher::from_config(SocialConfig::default()).unwrap()),
            site_url: "https://example.com".to_string(),
        };
        create_app(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn generated_draft() -> Value {
        let (_, body) = send(app((1..=3).map(article).collect()), "POST", "/api/drafts", Some(json!({}))).await;
        body["draft"].clone()
    }

    #[tokio::test]
    async fn test_list_articles() {
        let (status, body) = send(app((1..=3).map(article).collect()), "GET", "/api/articles?days_back=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert!(body[0]["contentSnippet"].as_str().unwrap().len() >= 100);
    }

    #[tokio::test]
    async fn test_negative_days_rejected() {
        let (status, body) = send(app(vec![]), "GET", "/api/articles?days_back=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("days_back"));
    }

    #[tokio::test]
    async fn test_huge_days_rejected() {
        for uri in [
            "/api/articles?days_back=200000000",
            "/api/trending?days_back=9223372036854775807",
        ] {
            let (status, body) = send(app((1..=3).map(article).collect()), "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body["error"].as_str().unwrap().contains("days_back"));
        }

        let (status, _) = send(
            app((1..=3).map(article).collect()),
            "POST",
            "/api/drafts",
            Some(json!({ "daysBack": 200_000_000 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_trending() {
        let (status, body) = send(app((1..=3).map(article).collect()), "GET", "/api/trending", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["keyword"], "ransomware");
        assert_eq!(body[0]["frequency"], 3);
    }

    #[tokio::test]
    async fn test_create_draft() {
        let (status, body) = send(app((1..=3).map(article).collect()), "POST", "/api/drafts", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["validation"]["valid"], true);
        assert_eq!(body["draft"]["aiModel"], "canned-sample");
        assert_eq!(body["draft"]["sourceUrls"].as_array().unwrap().len(), 3);
        assert_eq!(body["trendingTopics"][0]["keyword"], "ransomware");
    }

    #[tokio::test]
    async fn test_create_draft_without_articles() {
        let (status, _) = send(app(vec![]), "POST", "/api/drafts", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_regenerate_draft() {
        let draft = generated_draft().await;
        let (status, body) = send(
            app(vec![]),
            "POST",
            "/api/drafts/regenerate",
            Some(json!({ "draft": draft.clone(), "feedback": "Shorter intro please" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["draft"]["sourceUrls"], draft["sourceUrls"]);
        assert!(body["draft"]["aiPrompt"].as_str().unwrap().contains("Shorter intro please"));

        let (status, _) = send(
            app(vec![]),
            "POST",
            "/api/drafts/regenerate",
            Some(json!({ "draft": draft, "feedback": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_reports_errors() {
        let mut draft = generated_draft().await;
        draft["content"] = json!("too short");
        draft["keywords"] = json!([]);
        let (status, body) = send(app(vec![]), "POST", "/api/drafts/validate", Some(draft)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_approval_email_uses_site_links() {
        let draft = generated_draft().await;
        let (status, body) = send(
            app(vec![]),
            "POST",
            "/api/drafts/approval-email",
            Some(json!({ "draft": draft, "token": "0123456789abcdef" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["subject"].as_str().unwrap().starts_with("Blog post ready for review"));
        let html = body["html"].as_str().unwrap();
        assert!(html.contains("https://example.com/api/blog/approve?token=0123456789abcdef"));
        assert!(html.contains("01234567..."));
        assert!(body["text"].as_str().unwrap().contains("Reject: https://example.com/api/blog/reject"));
    }

    #[tokio::test]
    async fn test_publish_without_platforms() {
        let draft = generated_draft().await;
        let (status, body) = send(app(vec![]), "POST", "/api/publish", Some(json!({ "draft": draft.clone() }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (_, body) = send(
            app(vec![]),
            "POST",
            "/api/publish",
            Some(json!({ "draft": draft, "platforms": ["facebook", "twitter"] })),
        )
        .await;
        assert_eq!(body[0]["platform"], "facebook");
        assert_eq!(body[0]["error"], "facebook is not configured");
        assert_eq!(body[1]["platform"], "twitter");
        assert_eq!(body[1]["success"], false);
    }

    #[tokio::test]
    async fn test_social_connections_empty() {
        let (status, body) = send(app(vec![]), "GET", "/api/social/connections", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
