pub mod cli;
pub mod html;
pub mod logging;
pub mod reader;
pub mod sources;
pub mod topics;

pub use cli::{handle_command, FeedArgs, FeedCommands};
pub use reader::SourceReader;
pub use sources::{default_sources, FeedSource};
pub use topics::{rank_topics, SelectionOptions, TopicConfig, TopicRanker};

pub mod prelude {
    pub use super::reader::SourceReader;
    pub use super::topics::TopicRanker;
    pub use nd_core::{ArticleSource, Error, Result, RssArticle, TrendingTopic};
}
