use std::cmp::Ordering;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use nd_core::{ArticleSelection, ArticleSource, RssArticle, TrendingTopic};
use crate::logging::Logger;

const DEFAULT_KEYWORDS: &[&str] = &[
    "ransomware",
    "phishing",
    "malware",
    "data breach",
    "vulnerability",
    "zero-day",
    "patch",
    "mfa",
    "multi-factor",
    "password",
    "credential",
    "backup",
    "cloud",
    "microsoft",
    "m365",
    "office 365",
    "azure",
    "email",
    "endpoint",
    "firewall",
    "vpn",
    "compliance",
    "hipaa",
    "social engineering",
    "supply chain",
    "artificial intelligence",
];

/// Keywords that matter most to small and mid-sized customers.
const SMB_KEYWORDS: &[&str] = &[
    "ransomware",
    "phishing",
    "backup",
    "mfa",
    "password",
    "m365",
    "email",
    "compliance",
];

const SPAM_MARKERS: &[&str] = &["sponsored", "advertisement", "press release"];
const MIN_QUALITY_SNIPPET_CHARS: usize = 100;
const MAX_QUALITY_AGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfig {
    pub keywords: Vec<String>,
    pub smb_keywords: Vec<String>,
    /// Keywords seen in fewer articles than this are noise
    pub min_frequency: usize,
    pub max_topics: usize,
    pub max_articles_per_topic: usize,
    pub smb_boost: f64,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            smb_keywords: SMB_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_frequency: 3,
            max_topics: 10,
            max_articles_per_topic: 5,
            smb_boost: 1.5,
        }
    }
}

impl TopicConfig {
    fn is_smb(&self, keyword: &str) -> bool {
        self.smb_keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionOptions {
    pub max_articles: usize,
    pub days_back: i64,
    pub prefer_trending: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            max_articles: 5,
            days_back: 7,
            prefer_trending: true,
        }
    }
}

/// Counts tracked keywords across `articles` and returns the trending ones,
/// highest relevance first.
///
/// A keyword matches an article when it appears in the lowercased title or
/// snippet. Its score is the match count, boosted for SMB keywords, as a
/// percentage of the corpus size, rounded to two decimals.
pub fn rank_topics(articles: &[RssArticle], config: &TopicConfig) -> Vec<TrendingTopic> {
    if articles.is_empty() {
        return Vec::new();
    }

    let total = articles.len() as f64;
    let texts: Vec<String> = articles.iter().map(RssArticle::search_text).collect();

    let mut topics: Vec<TrendingTopic> = config
        .keywords
        .iter()
        .filter_map(|keyword| {
            let needle = keyword.to_lowercase();
            let matching: Vec<&RssArticle> = articles
                .iter()
                .zip(&texts)
                .filter(|(_, text)| text.contains(&needle))
                .map(|(article, _)| article)
                .collect();

            let frequency = matching.len();
            if frequency < config.min_frequency {
                return None;
            }

            let boost = if config.is_smb(keyword) { config.smb_boost } else { 1.0 };
            let relevance_score = round2(frequency as f64 * boost / total * 100.0);

            Some(TrendingTopic {
                keyword: keyword.clone(),
                frequency,
                articles: matching
                    .into_iter()
                    .take(config.max_articles_per_topic)
                    .cloned()
                    .collect(),
                relevance_score,
            })
        })
        .collect();

    topics.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    topics.truncate(config.max_topics);
    topics
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether an article is good enough to write about without a trending topic.
pub fn passes_quality_filter(article: &RssArticle, now: DateTime<Utc>) -> bool {
    if article.content_snippet.chars().count() < MIN_QUALITY_SNIPPET_CHARS {
        return false;
    }
    if article.pub_date < now - chrono::Duration::days(MAX_QUALITY_AGE_DAYS) {
        return false;
    }
    let text = article.search_text();
    !SPAM_MARKERS.iter().any(|marker| text.contains(marker))
}

pub struct TopicRanker {
    source: Arc<dyn ArticleSource>,
    config: TopicConfig,
    logger: Logger,
}

impl TopicRanker {
    pub fn new(source: Arc<dyn ArticleSource>, config: TopicConfig) -> Self {
        Self {
            source,
            config,
            logger: Logger::new().with_prefix("topics".to_string()),
        }
    }

    pub fn config(&self) -> &TopicConfig {
        &self.config
    }

    pub async fn identify_trending_topics(&self, days_back: i64) -> Vec<TrendingTopic> {
        let articles = self.source.recent_articles(days_back).await;
        let topics = rank_topics(&articles, &self.config);
        self.logger.info(&format!(
            "{} trending topics across {} articles",
            topics.len(),
            articles.len()
        ));
        topics
    }

    /// Picks source material for one post: the top trending topic's articles
    /// when trending is preferred and available, otherwise the most recent
    /// articles that pass the quality filter.
    pub async fn select_articles_for_blog(&self, options: SelectionOptions) -> ArticleSelection {
        let articles = self.source.recent_articles(options.days_back).await;
        let trending_topics = if options.prefer_trending {
            rank_topics(&articles, &self.config)
        } else {
            Vec::new()
        };

        if let Some(top) = trending_topics.first() {
            self.logger.info(&format!(
                "writing about trending topic '{}' ({} articles)",
                top.keyword, top.frequency
            ));
            let selected = top.articles.iter().take(options.max_articles).cloned().collect();
            return ArticleSelection {
                articles: selected,
                trending_topics,
            };
        }

        let now = Utc::now();
        let selected: Vec<RssArticle> = articles
            .into_iter()
            .filter(|article| passes_quality_filter(article, now))
            .take(options.max_articles)
            .collect();
        self.logger.info(&format!(
            "no trending topic used, selected {} recent articles",
            selected.len()
        ));

        ArticleSelection {
            articles: selected,
            trending_topics,
        }
    }
}
