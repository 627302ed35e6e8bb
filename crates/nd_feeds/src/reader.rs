use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use feed_rs::model::Entry;
use futures::future::join_all;
use reqwest::Client;
use url::Url;
use nd_core::text::truncate_chars;
use nd_core::{recent_cutoff, ArticleSource, Error, Result, RssArticle};
use crate::html::html_to_text;
use crate::logging::Logger;
use crate::sources::{default_sources, FeedSource};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str = "NewsdeskBot/1.0 (+blog content pipeline)";
/// Length of the generated snippet when a feed item carries no description
pub const SNIPPET_CHARS: usize = 300;

pub struct SourceReader {
    client: Client,
    sources: Vec<FeedSource>,
    logger: Logger,
}

impl SourceReader {
    pub fn new(sources: Vec<FeedSource>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, sources))
    }

    pub fn with_default_sources() -> Result<Self> {
        Self::new(default_sources())
    }

    pub fn with_client(client: Client, sources: Vec<FeedSource>) -> Self {
        Self {
            client,
            sources,
            logger: Logger::new().with_prefix("feeds".to_string()),
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Fetches and normalizes one feed. A feed that times out, answers with an
    /// error status or serves unparseable XML yields no articles.
    pub async fn fetch_from_source(&self, source: &FeedSource) -> Vec<RssArticle> {
        let logger = self.logger.clone().with_prefix(source.name.clone());
        match self.try_fetch(source).await {
            Ok(articles) => {
                logger.debug(&format!("fetched {} articles", articles.len()));
                articles
            }
            Err(e) => {
                logger.error(&format!("failed to fetch {}: {}", source.feed_url, e));
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, source: &FeedSource) -> Result<Vec<RssArticle>> {
        let response = self
            .client
            .get(&source.feed_url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        parse_feed(&body, source)
    }

    /// All configured feeds fetched concurrently, newest article first.
    pub async fn fetch_all_sources(&self) -> Vec<RssArticle> {
        let batches = join_all(self.sources.iter().map(|source| self.fetch_from_source(source))).await;

        let mut articles: Vec<RssArticle> = batches.into_iter().flatten().collect();
        articles.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        self.logger.info(&format!(
            "fetched {} articles from {} sources",
            articles.len(),
            self.sources.len()
        ));
        articles
    }

    /// An out-of-range `days_back` is logged and yields no articles.
    pub async fn fetch_recent_articles(&self, days_back: i64) -> Vec<RssArticle> {
        let cutoff = match recent_cutoff(days_back) {
            Ok(cutoff) => cutoff,
            Err(e) => {
                self.logger.warn(&e.to_string());
                return Vec::new();
            }
        };
        self.fetch_all_sources()
            .await
            .into_iter()
            .filter(|article| article.pub_date >= cutoff)
            .collect()
    }
}

#[async_trait]
impl ArticleSource for SourceReader {
    async fn recent_articles(&self, days_back: i64) -> Vec<RssArticle> {
        self.fetch_recent_articles(days_back).await
    }
}

/// Parses an RSS or Atom payload into articles attributed to `source`.
pub fn parse_feed(bytes: &[u8], source: &FeedSource) -> Result<Vec<RssArticle>> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| Error::Feed(format!("{}: {}", source.name, e)))?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| to_article(entry, source))
        .collect())
}

/// Some feeds publish site-relative item links.
fn resolve_link(base_url: &str, href: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

fn to_article(entry: Entry, source: &FeedSource) -> RssArticle {
    let title = entry
        .title
        .map(|t| html_to_text(&t.content))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let link = entry
        .links
        .first()
        .map(|l| l.href.trim())
        .filter(|href| !href.is_empty())
        .map(|href| resolve_link(&source.base_url, href))
        .unwrap_or_else(|| source.base_url.clone());

    let pub_date = entry.published.or(entry.updated).unwrap_or_else(Utc::now);

    let summary = entry
        .summary
        .map(|s| html_to_text(&s.content))
        .unwrap_or_default();
    let body = entry
        .content
        .and_then(|c| c.body)
        .map(|b| html_to_text(&b))
        .unwrap_or_default();

    let content = if body.is_empty() { summary.clone() } else { body };
    let content_snippet = if summary.is_empty() {
        truncate_chars(&content, SNIPPET_CHARS).to_string()
    } else {
        summary
    };

    let author = entry
        .authors
        .into_iter()
        .map(|person| person.name.trim().to_string())
        .find(|name| !name.is_empty());

    let categories = entry
        .categories
        .into_iter()
        .map(|category| category.term)
        .filter(|term| !term.is_empty())
        .collect();

    RssArticle {
        title,
        link,
        pub_date,
        content,
        content_snippet,
        source: source.name.clone(),
        author,
        categories,
    }
}
