use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use nd_core::text::truncate_chars;
use nd_core::Result;
use crate::config::LinkedInConfig;
use super::{hashtag_line, read_json, string_field, Platform, PublishedPost, SocialPost};

const NAME: &str = "linkedin";
/// Longest share commentary LinkedIn accepts.
pub const MAX_COMMENTARY_CHARS: usize = 3000;

#[derive(Debug, Clone)]
pub struct LinkedIn {
    config: LinkedInConfig,
}

impl LinkedIn {
    pub fn new(config: LinkedInConfig) -> Self {
        Self { config }
    }

    pub fn commentary(post: &SocialPost<'_>) -> String {
        let linkedin = &post.draft.social_media.linkedin;
        let text = format!(
            "{}\n\n{}\n\nRead more: {}\n\n{}",
            linkedin.title,
            linkedin.content,
            post.blog_url,
            hashtag_line(&linkedin.hashtags)
        );
        truncate_chars(text.trim_end(), MAX_COMMENTARY_CHARS).to_string()
    }

    /// UGC share body; an image post when an image is supplied, a link
    /// preview of the article otherwise.
    pub fn share_body(&self, post: &SocialPost<'_>) -> Value {
        let draft = post.draft;
        let (category, media_url) = match post.image_url {
            Some(image_url) => ("IMAGE", image_url),
            None => ("ARTICLE", post.blog_url),
        };

        json!({
            "author": format!("urn:li:organization:{}", self.config.org_id),
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": Self::commentary(post) },
                    "shareMediaCategory": category,
                    "media": [{
                        "status": "READY",
                        "originalUrl": media_url,
                        "title": { "text": draft.title },
                        "description": { "text": draft.excerpt },
                    }],
                }
            },
            "visibility": {
                "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
            }
        })
    }
}

#[async_trait]
impl Platform for LinkedIn {
    fn name(&self) -> &str {
        NAME
    }

    async fn publish(&self, http: &Client, post: &SocialPost<'_>) -> Result<PublishedPost> {
        let url = format!("{}/ugcPosts", self.config.api_url);
        let response = http
            .post(&url)
            .bearer_auth(self.config.access_token.expose())
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&self.share_body(post))
            .send()
            .await?;
        let created = read_json(NAME, response).await?;
        let post_id = string_field(NAME, &created, "id")?;

        Ok(PublishedPost {
            post_url: Some(format!("https://www.linkedin.com/feed/update/{}", post_id)),
            post_id,
        })
    }

    async fn check_connection(&self, http: &Client) -> Result<String> {
        let url = format!("{}/me", self.config.api_url);
        let response = http
            .get(&url)
            .bearer_auth(self.config.access_token.expose())
            .send()
            .await?;
        let me = read_json(NAME, response).await?;
        string_field(NAME, &me, "localizedFirstName").or_else(|_| string_field(NAME, &me, "id"))
    }
}
