pub mod draft;
pub mod error;
pub mod models;
pub mod publish;
pub mod sources;
pub mod text;
pub mod types;
pub mod validation;

pub use draft::{BlogPostDraft, FacebookPost, InstagramPost, LinkedInPost, SocialMedia};
pub use error::{Error, Result};
pub use models::CompletionModel;
pub use publish::{ConnectionStatus, PublishResult};
pub use sources::{recent_cutoff, ArticleSource, MAX_DAYS_BACK};
pub use types::{ArticleSelection, RssArticle, TrendingTopic};
pub use validation::{validate_draft, ValidationReport};
