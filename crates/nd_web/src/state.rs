use std::sync::Arc;
use nd_core::ArticleSource;
use nd_feeds::TopicRanker;
use nd_inference::DraftGenerator;
use nd_social::SocialPublisher;

pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub ranker: Arc<TopicRanker>,
    pub generator: Arc<DraftGenerator>,
    pub publisher: Arc<SocialPublisher>,
    /// Public site root, used for approval links and blog post URLs
    pub site_url: String,
}

impl AppState {
    pub fn blog_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.site_url.trim_end_matches('/'), slug)
    }
}
