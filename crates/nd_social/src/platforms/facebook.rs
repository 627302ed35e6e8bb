use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use nd_core::Result;
use crate::config::FacebookConfig;
use super::{hashtag_line, read_json, string_field, Platform, PublishedPost, SocialPost};

const NAME: &str = "facebook";

#[derive(Debug, Clone)]
pub struct Facebook {
    config: FacebookConfig,
}

impl Facebook {
    pub fn new(config: FacebookConfig) -> Self {
        Self { config }
    }

    pub fn message(post: &SocialPost<'_>) -> String {
        let facebook = &post.draft.social_media.facebook;
        format!(
            "{}\n\n{}\n\nRead more: {}\n\n{}",
            facebook.title,
            facebook.description,
            post.blog_url,
            hashtag_line(&facebook.hashtags)
        )
        .trim_end()
        .to_string()
    }
}

#[async_trait]
impl Platform for Facebook {
    fn name(&self) -> &str {
        NAME
    }

    async fn publish(&self, http: &Client, post: &SocialPost<'_>) -> Result<PublishedPost> {
        let mut body = json!({
            "message": Self::message(post),
            "link": post.blog_url,
            "access_token": self.config.access_token.expose(),
        });
        if let Some(image_url) = post.image_url {
            body["picture"] = json!(image_url);
        }

        let url = format!("{}/{}/feed", self.config.graph_url, self.config.page_id);
        let response = http.post(&url).json(&body).send().await?;
        let created = read_json(NAME, response).await?;
        let post_id = string_field(NAME, &created, "id")?;

        Ok(PublishedPost {
            post_url: Some(format!("https://www.facebook.com/{}", post_id)),
            post_id,
        })
    }

    async fn check_connection(&self, http: &Client) -> Result<String> {
        let url = format!("{}/me", self.config.graph_url);
        let response = http
            .get(&url)
            .query(&[("access_token", self.config.access_token.expose())])
            .send()
            .await?;
        let me = read_json(NAME, response).await?;
        string_field(NAME, &me, "name").or_else(|_| string_field(NAME, &me, "id"))
    }
}
