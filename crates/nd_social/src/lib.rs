pub mod config;
pub mod platforms;
pub mod publisher;

pub use config::SocialConfig;
pub use platforms::{Platform, PublishedPost, SocialPost};
pub use publisher::SocialPublisher;
