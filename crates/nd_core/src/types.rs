use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized news item pulled from a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssArticle {
    pub title: String,
    pub link: String,
    pub pub_date: DateTime<Utc>,
    /// Plain text, HTML stripped and whitespace collapsed
    pub content: String,
    pub content_snippet: String,
    /// Display name of the feed the item came from
    pub source: String,
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RssArticle {
    /// Lowercased title and snippet, the text keyword matching runs against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.content_snippet).to_lowercase()
    }
}

/// A tracked keyword together with the articles that mention it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub keyword: String,
    pub frequency: usize,
    pub articles: Vec<RssArticle>,
    pub relevance_score: f64,
}

/// Articles picked as source material for one blog post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSelection {
    pub articles: Vec<RssArticle>,
    pub trending_topics: Vec<TrendingTopic>,
}
