use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use nd_core::{Error, Result};
use crate::config::InstagramConfig;
use super::{hashtag_line, read_json, string_field, Platform, PublishedPost, SocialPost};

const NAME: &str = "instagram";

/// Instagram only accepts posts built around an image: a media container is
/// created first and then published.
#[derive(Debug, Clone)]
pub struct Instagram {
    config: InstagramConfig,
}

impl Instagram {
    pub fn new(config: InstagramConfig) -> Self {
        Self { config }
    }

    pub fn caption(post: &SocialPost<'_>) -> String {
        let instagram = &post.draft.social_media.instagram;
        format!("{}\n\n{}", instagram.caption, hashtag_line(&instagram.hashtags))
            .trim_end()
            .to_string()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.graph_url, self.config.account_id, path)
    }
}

#[async_trait]
impl Platform for Instagram {
    fn name(&self) -> &str {
        NAME
    }

    fn requires_image(&self) -> bool {
        true
    }

    async fn publish(&self, http: &Client, post: &SocialPost<'_>) -> Result<PublishedPost> {
        let image_url = post
            .image_url
            .ok_or_else(|| Error::platform(NAME, "an image URL is required to post on Instagram"))?;
        let token = self.config.access_token.expose();

        let response = http
            .post(self.endpoint("media"))
            .json(&json!({
                "image_url": image_url,
                "caption": Self::caption(post),
                "access_token": token,
            }))
            .send()
            .await?;
        let container = read_json(NAME, response).await?;
        let creation_id = string_field(NAME, &container, "id")?;
        debug!("Instagram media container {} created", creation_id);

        let response = http
            .post(self.endpoint("media_publish"))
            .json(&json!({
                "creation_id": creation_id,
                "access_token": token,
            }))
            .send()
            .await?;
        let published = read_json(NAME, response).await?;

        Ok(PublishedPost {
            post_id: string_field(NAME, &published, "id")?,
            post_url: None,
        })
    }

    async fn check_connection(&self, http: &Client) -> Result<String> {
        let url = format!("{}/{}", self.config.graph_url, self.config.account_id);
        let response = http
            .get(&url)
            .query(&[
                ("fields", "id,username"),
                ("access_token", self.config.access_token.expose()),
            ])
            .send()
            .await?;
        let account = read_json(NAME, response).await?;
        string_field(NAME, &account, "username").or_else(|_| string_field(NAME, &account, "id"))
    }
}
