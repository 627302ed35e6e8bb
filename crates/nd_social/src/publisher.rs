use std::panic::AssertUnwindSafe;
use futures::future::join_all;
use futures::FutureExt;
use reqwest::Client;
use tracing::{error, info, warn};
use nd_core::{BlogPostDraft, ConnectionStatus, PublishResult, Result};
use crate::config::SocialConfig;
use crate::platforms::{Facebook, Instagram, LinkedIn, Platform, SocialPost, Twitter};

pub const USER_AGENT: &str = "NewsdeskBot/1.0 (+social publisher)";

/// Shares approved drafts on every configured platform.
#[derive(Debug)]
pub struct SocialPublisher {
    http: Client,
    platforms: Vec<Box<dyn Platform>>,
}

impl SocialPublisher {
    pub fn from_config(config: SocialConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: SocialConfig) -> Self {
        let mut publisher = Self {
            http,
            platforms: Vec::new(),
        };
        if let Some(facebook) = config.facebook {
            publisher = publisher.with_platform(Box::new(Facebook::new(facebook)));
        }
        if let Some(instagram) = config.instagram {
            publisher = publisher.with_platform(Box::new(Instagram::new(instagram)));
        }
        if let Some(linkedin) = config.linkedin {
            publisher = publisher.with_platform(Box::new(LinkedIn::new(linkedin)));
        }
        if config.twitter.is_some() {
            publisher = publisher.with_platform(Box::new(Twitter));
        }
        publisher
    }

    pub fn with_platform(mut self, platform: Box<dyn Platform>) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.name()).collect()
    }

    fn platform(&self, name: &str) -> Option<&dyn Platform> {
        self.platforms
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// One publish attempt; never fails, errors and panics end up in the result.
    async fn run(&self, platform: &dyn Platform, post: &SocialPost<'_>) -> PublishResult {
        let name = platform.name();
        if platform.requires_image() && post.image_url.is_none() {
            warn!("Skipping {}: no image supplied", name);
            return PublishResult::failed(name, format!("{} requires an image URL", name));
        }

        match AssertUnwindSafe(platform.publish(&self.http, post))
            .catch_unwind()
            .await
        {
            Ok(Ok(published)) => {
                info!("Published \"{}\" to {} as {}", post.draft.title, name, published.post_id);
                PublishResult::published(name, published.post_id, published.post_url)
            }
            Ok(Err(e)) => {
                warn!("Publishing to {} failed: {}", name, e);
                PublishResult::failed(name, e.to_string())
            }
            Err(_) => {
                error!("Publisher for {} panicked", name);
                PublishResult::failed(name, format!("{} publisher panicked", name))
            }
        }
    }

    /// Posts to every configured platform at once, one result per platform in
    /// configuration order.
    pub async fn publish_to_all(
        &self,
        draft: &BlogPostDraft,
        blog_url: &str,
        image_url: Option<&str>,
    ) -> Vec<PublishResult> {
        let post = SocialPost {
            draft,
            blog_url,
            image_url,
        };
        info!("Publishing \"{}\" to {} platforms", draft.title, self.platforms.len());
        join_all(self.platforms.iter().map(|p| self.run(p.as_ref(), &post))).await
    }

    pub async fn publish_to(
        &self,
        name: &str,
        draft: &BlogPostDraft,
        blog_url: &str,
        image_url: Option<&str>,
    ) -> PublishResult {
        let post = SocialPost {
            draft,
            blog_url,
            image_url,
        };
        match self.platform(name) {
            Some(platform) => self.run(platform, &post).await,
            None => PublishResult::failed(name, format!("{} is not configured", name)),
        }
    }

    pub async fn publish_to_facebook(&self, draft: &BlogPostDraft, blog_url: &str, image_url: Option<&str>) -> PublishResult {
        self.publish_to("facebook", draft, blog_url, image_url).await
    }

    pub async fn publish_to_instagram(&self, draft: &BlogPostDraft, blog_url: &str, image_url: Option<&str>) -> PublishResult {
        self.publish_to("instagram", draft, blog_url, image_url).await
    }

    pub async fn publish_to_linkedin(&self, draft: &BlogPostDraft, blog_url: &str, image_url: Option<&str>) -> PublishResult {
        self.publish_to("linkedin", draft, blog_url, image_url).await
    }

    /// Always a failed result until posting to Twitter is supported.
    pub async fn publish_to_twitter(&self, draft: &BlogPostDraft, blog_url: &str) -> PublishResult {
        let post = SocialPost {
            draft,
            blog_url,
            image_url: None,
        };
        self.run(&Twitter, &post).await
    }

    /// Read-only credential check of every configured platform.
    pub async fn test_connections(&self) -> Vec<ConnectionStatus> {
        join_all(self.platforms.iter().map(|platform| async move {
            let name = platform.name();
            match AssertUnwindSafe(platform.check_connection(&self.http))
                .catch_unwind()
                .await
            {
                Ok(Ok(account)) => ConnectionStatus::connected(name, account),
                Ok(Err(e)) => {
                    warn!("Connection check for {} failed: {}", name, e);
                    ConnectionStatus::failed(name, e.to_string())
                }
                Err(_) => ConnectionStatus::failed(name, format!("{} connection check panicked", name)),
            }
        }))
        .await
    }
}
