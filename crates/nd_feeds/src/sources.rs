use serde::{Deserialize, Serialize};

/// A feed the reader pulls articles from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    pub name: String,
    /// Homepage, used as the link of items that carry none
    pub base_url: String,
    pub feed_url: String,
    pub category: String,
}

impl FeedSource {
    pub fn new(name: &str, base_url: &str, feed_url: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            feed_url: feed_url.to_string(),
            category: category.to_string(),
        }
    }
}

/// The security news outlets the blog draws on.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "The Hacker News",
            "https://thehackernews.com",
            "https://feeds.feedburner.com/TheHackersNews",
            "security-news",
        ),
        FeedSource::new(
            "BleepingComputer",
            "https://www.bleepingcomputer.com",
            "https://www.bleepingcomputer.com/feed/",
            "security-news",
        ),
        FeedSource::new(
            "Krebs on Security",
            "https://krebsonsecurity.com",
            "https://krebsonsecurity.com/feed/",
            "investigative",
        ),
        FeedSource::new(
            "Dark Reading",
            "https://www.darkreading.com",
            "https://www.darkreading.com/rss.xml",
            "security-news",
        ),
        FeedSource::new(
            "SecurityWeek",
            "https://www.securityweek.com",
            "https://www.securityweek.com/feed/",
            "security-news",
        ),
        FeedSource::new(
            "CISA Advisories",
            "https://www.cisa.gov",
            "https://www.cisa.gov/cybersecurity-advisories/all.xml",
            "government",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let sources = default_sources();
        assert_eq!(sources.len(), 6);
        assert!(sources.iter().all(|s| s.feed_url.starts_with("https://")));
        let mut names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
