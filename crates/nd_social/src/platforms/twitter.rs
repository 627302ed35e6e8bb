use async_trait::async_trait;
use reqwest::Client;
use nd_core::{Error, Result};
use super::{Platform, PublishedPost, SocialPost};

/// Placeholder until posting to X/Twitter is supported; every call fails.
#[derive(Debug, Clone, Default)]
pub struct Twitter;

#[async_trait]
impl Platform for Twitter {
    fn name(&self) -> &str {
        "twitter"
    }

    async fn publish(&self, _http: &Client, _post: &SocialPost<'_>) -> Result<PublishedPost> {
        Err(Error::NotImplemented("Twitter publishing".to_string()))
    }

    async fn check_connection(&self, _http: &Client) -> Result<String> {
        Err(Error::NotImplemented("Twitter connection check".to_string()))
    }
}
