use std::fmt;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use nd_core::{BlogPostDraft, Error, Result};

pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod twitter;

pub use facebook::Facebook;
pub use instagram::Instagram;
pub use linkedin::LinkedIn;
pub use twitter::Twitter;

/// What gets shared: an approved draft and where it lives.
#[derive(Debug, Clone, Copy)]
pub struct SocialPost<'a> {
    pub draft: &'a BlogPostDraft,
    pub blog_url: &'a str,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub post_id: String,
    pub post_url: Option<String>,
}

/// One social network the publisher can post to.
#[async_trait]
pub trait Platform: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn requires_image(&self) -> bool {
        false
    }

    async fn publish(&self, http: &Client, post: &SocialPost<'_>) -> Result<PublishedPost>;

    /// Read-only call proving the credentials work; returns the account name.
    async fn check_connection(&self, http: &Client) -> Result<String>;
}

/// Decodes a JSON API response, turning an error status into a platform
/// error carrying the API's own message when it has one.
pub(crate) async fn read_json(platform: &str, response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body
            .pointer("/error/message")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        return Err(Error::platform(platform, message));
    }
    if body.is_null() {
        return Err(Error::platform(platform, "response is not valid JSON"));
    }
    Ok(body)
}

pub(crate) fn string_field(platform: &str, body: &Value, field: &str) -> Result<String> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(Error::platform(platform, format!("response has no `{}`", field))),
    }
}

pub(crate) fn hashtag_line(hashtags: &[String]) -> String {
    hashtags.join(" ")
}
