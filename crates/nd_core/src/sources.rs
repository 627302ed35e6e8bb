use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crate::error::{Error, Result};
use crate::types::RssArticle;

/// Widest lookback window accepted anywhere in the pipeline.
pub const MAX_DAYS_BACK: i64 = 3650;

/// Anything that can hand out recently published articles.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Articles published within the last `days_back` days, newest first.
    /// Never fails: unavailable sources contribute nothing.
    async fn recent_articles(&self, days_back: i64) -> Vec<RssArticle>;
}

/// Oldest publication time still inside a `days_back` window ending at `now`.
pub fn cutoff_from(now: DateTime<Utc>, days_back: i64) -> Result<DateTime<Utc>> {
    if !(0..=MAX_DAYS_BACK).contains(&days_back) {
        return Err(Error::InvalidInput(format!(
            "days_back must be between 0 and {}, got {}",
            MAX_DAYS_BACK, days_back
        )));
    }
    Duration::try_days(days_back)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| Error::InvalidInput(format!("days_back {} is out of range", days_back)))
}

pub fn recent_cutoff(days_back: i64) -> Result<DateTime<Utc>> {
    cutoff_from(Utc::now(), days_back)
}
