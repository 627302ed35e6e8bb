use std::sync::Arc;
use clap::{Args, Subcommand};
use nd_core::{Result, MAX_DAYS_BACK};
use crate::reader::SourceReader;
use crate::topics::{TopicConfig, TopicRanker};

#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    #[command(subcommand)]
    pub command: FeedCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FeedCommands {
    /// List configured feeds
    List,
    /// Fetch recent articles from every feed
    Fetch {
        /// Only keep articles published within this many days
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(0..=MAX_DAYS_BACK))]
        days: i64,
        /// Maximum number of articles to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Print JSON instead of a summary line per article
        #[arg(long)]
        json: bool,
    },
    /// Show trending topics across recent articles
    Trending {
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(0..=MAX_DAYS_BACK))]
        days: i64,
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(args: FeedArgs, reader: Arc<SourceReader>, config: TopicConfig) -> Result<()> {
    match args.command {
        FeedCommands::List => {
            println!("Configured feeds:");
            for source in reader.sources() {
                println!("  {} [{}] {}", source.name, source.category, source.feed_url);
            }
        }
        FeedCommands::Fetch { days, limit, json } => {
            let articles = reader.fetch_recent_articles(days).await;
            let shown: Vec<_> = articles.into_iter().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Found {} articles", shown.len());
                for article in &shown {
                    println!(
                        "{} [{}] {} - {}",
                        article.pub_date.format("%Y-%m-%d"),
                        article.source,
                        article.title,
                        article.link
                    );
                }
            }
        }
        FeedCommands::Trending { days, json } => {
            let ranker = TopicRanker::new(reader, config);
            let topics = ranker.identify_trending_topics(days).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&topics)?);
            } else if topics.is_empty() {
                println!("No trending topics in the last {} days", days);
            } else {
                for (rank, topic) in topics.iter().enumerate() {
                    println!(
                        "{:>2}. {} (score {:.2}, {} articles)",
                        rank + 1,
                        topic.keyword,
                        topic.relevance_score,
                        topic.frequency
                    );
                    for article in &topic.articles {
                        println!("      - {}", article.title);
                    }
                }
            }
        }
    }
    Ok(())
}
