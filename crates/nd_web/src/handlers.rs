use std::sync::Arc;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use nd_core::{
    recent_cutoff, validate_draft, BlogPostDraft, ConnectionStatus, PublishResult, RssArticle, TrendingTopic,
    ValidationReport,
};
use nd_feeds::SelectionOptions;
use nd_notify::{approval_email, ApprovalEmail, ApprovalLinks};
use crate::error::ApiError;
use crate::AppState;

pub const DEFAULT_DAYS_BACK: i64 = 7;

#[derive(Debug, Default, Deserialize)]
pub struct DaysBack {
    pub days_back: Option<i64>,
}

impl DaysBack {
    fn resolve(&self) -> Result<i64, ApiError> {
        let days = self.days_back.unwrap_or(DEFAULT_DAYS_BACK);
        recent_cutoff(days)?;
        Ok(days)
    }
}

/// A draft together with its validation report and the material it was written from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft: BlogPostDraft,
    pub validation: ValidationReport,
    pub articles: Vec<RssArticle>,
    pub trending_topics: Vec<TrendingTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub draft: BlogPostDraft,
    pub feedback: String,
    #[serde(default)]
    pub articles: Vec<RssArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalEmailRequest {
    pub draft: BlogPostDraft,
    pub token: String,
    #[serde(default)]
    pub links: Option<ApprovalLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub draft: BlogPostDraft,
    #[serde(default)]
    pub blog_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Only these platforms; every configured one when absent
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DaysBack>,
) -> Result<Json<Vec<RssArticle>>, ApiError> {
    let days_back = query.resolve()?;
    Ok(Json(state.source.recent_articles(days_back).await))
}

pub async fn trending_topics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DaysBack>,
) -> Result<Json<Vec<TrendingTopic>>, ApiError> {
    let days_back = query.resolve()?;
    Ok(Json(state.ranker.identify_trending_topics(days_back).await))
}

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    Json(options): Json<SelectionOptions>,
) -> Result<Json<DraftResponse>, ApiError> {
    recent_cutoff(options.days_back)?;
    let selection = state.ranker.select_articles_for_blog(options).await;
    if selection.articles.is_empty() {
        return Err(ApiError::Unprocessable(
            "no recent articles are available to write about".to_string(),
        ));
    }

    let draft = state
        .generator
        .generate_blog_post(&selection.articles, &selection.trending_topics)
        .await?;
    let validation = validate_draft(&draft);

    Ok(Json(DraftResponse {
        draft,
        validation,
        articles: selection.articles,
        trending_topics: selection.trending_topics,
    }))
}

pub async fn regenerate_draft(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    if request.feedback.trim().is_empty() {
        return Err(ApiError::BadRequest("feedback is required".to_string()));
    }

    let draft = state
        .generator
        .regenerate_blog_post(&request.draft, &request.feedback, &request.articles)
        .await?;
    let validation = validate_draft(&draft);

    Ok(Json(DraftResponse {
        draft,
        validation,
        articles: request.articles,
        trending_topics: Vec::new(),
    }))
}

pub async fn validate(Json(draft): Json<BlogPostDraft>) -> Json<ValidationReport> {
    Json(validate_draft(&draft))
}

pub async fn render_approval_email(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApprovalEmailRequest>,
) -> Result<Json<ApprovalEmail>, ApiError> {
    if request.token.trim().is_empty() {
        return Err(ApiError::BadRequest("token is required".to_string()));
    }
    let links = request
        .links
        .unwrap_or_else(|| ApprovalLinks::for_token(&state.site_url, &request.token));
    Ok(Json(approval_email(&request.draft, &request.token, &links)?))
}

pub async fn publish(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PublishRequest>,
) -> Json<Vec<PublishResult>> {
    let draft = &request.draft;
    let blog_url = request
        .blog_url
        .clone()
        .unwrap_or_else(|| state.blog_url(&draft.slug));
    let image_url = request.image_url.as_deref();
    let publisher = &state.publisher;

    let results = match &request.platforms {
        None => publisher.publish_to_all(draft, &blog_url, image_url).await,
        Some(platforms) => {
            let mut results = Vec::with_capacity(platforms.len());
            for platform in platforms {
                let result = match platform.as_str() {
                    "twitter" => publisher.publish_to_twitter(draft, &blog_url).await,
                    name => publisher.publish_to(name, draft, &blog_url, image_url).await,
                };
                results.push(result);
            }
            results
        }
    };
    Json(results)
}

pub async fn social_connections(State(state): State<Arc<AppState>>) -> Json<Vec<ConnectionStatus>> {
    Json(state.publisher.test_connections().await)
}
