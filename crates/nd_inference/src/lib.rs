use std::fmt;

pub mod defaults;
pub mod generator;
pub mod guidelines;
pub mod models;
pub mod parse;
pub mod prompt;

pub use generator::DraftGenerator;
pub use guidelines::{select_guidelines, FileGuidelines, GuidelineProvider, StaticGuidelines};
pub use models::{create_model, ModelKind};

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

pub mod prelude {
    pub use super::generator::DraftGenerator;
    pub use super::models::create_model;
    pub use super::Config;
    pub use nd_core::{BlogPostDraft, CompletionModel, Error, Result, RssArticle, TrendingTopic};
}
