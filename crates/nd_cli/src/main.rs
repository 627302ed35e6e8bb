use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use nd_core::{validate_draft, ArticleSource, BlogPostDraft, Error, Result, MAX_DAYS_BACK};
use nd_feeds::{handle_command, FeedArgs, FeedCommands, SelectionOptions, SourceReader, TopicConfig, TopicRanker};
use nd_inference::guidelines::DEFAULT_GUIDELINES_PATH;
use nd_inference::{create_model, select_guidelines, Config, DraftGenerator, ModelKind, DEFAULT_BASE_URL, DEFAULT_MODEL};
use nd_notify::{approval_email, ApprovalLinks};
use nd_social::{SocialConfig, SocialPublisher};
use nd_web::AppState;

mod drafts;
mod interval;

use drafts::{read_draft, write_draft, write_draft_to};
use interval::Interval;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turns security news into reviewed blog posts and social shares", long_about = None)]
pub struct Cli {
    /// Completion backend used to write drafts
    #[arg(long, value_enum, env = "NEWSDESK_MODEL", default_value_t = ModelKind::Anthropic)]
    model: ModelKind,
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_MODEL)]
    model_name: String,
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,
    /// Brand and style guidelines; built-in guidelines are used when the file is missing
    #[arg(long, env = "NEWSDESK_GUIDELINES", default_value = DEFAULT_GUIDELINES_PATH)]
    guidelines: PathBuf,
    /// Public site root used for blog and approval links
    #[arg(long, env = "NEWSDESK_SITE_URL", default_value = "https://example.com")]
    site_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect the configured news feeds
    Feeds(FeedArgs),
    /// Rank trending topics across recent articles
    Trending {
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(0..=MAX_DAYS_BACK))]
        days: i64,
        #[arg(long)]
        json: bool,
    },
    /// Select source articles and write a new draft
    Generate {
        #[arg(long, default_value_t = 5)]
        max_articles: usize,
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(0..=MAX_DAYS_BACK))]
        days: i64,
        /// Use the most recent quality articles instead of the top trending topic
        #[arg(long)]
        no_trending: bool,
        /// Directory drafts are saved to as <slug>.json; printed to stdout when absent
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Keep generating on this interval (e.g. 30m, 6h, 1d, 1d12h)
        #[arg(long)]
        interval: Option<Interval>,
    },
    /// Revise a saved draft with reviewer feedback
    Regenerate {
        draft: PathBuf,
        #[arg(long)]
        feedback: String,
        /// Where to write the revision; overwrites the input when absent
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a saved draft against the editorial rules
    Validate { draft: PathBuf },
    /// Render the approval email for a saved draft
    Email {
        draft: PathBuf,
        #[arg(long)]
        token: String,
        #[arg(long, value_enum, default_value_t = EmailFormat::Html)]
        format: EmailFormat,
    },
    /// Share an approved draft on the configured social platforms
    Publish {
        draft: PathBuf,
        /// Canonical URL of the published post; defaults to <site-url>/blog/<slug>
        #[arg(long)]
        blog_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Only publish to these platforms
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Verify social platform credentials without posting
    CheckSocial,
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "NEWSDESK_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmailFormat {
    Html,
    Text,
    Json,
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model_name: self.model_name.clone(),
            base_url: self.api_base_url.clone(),
            ..Config::default()
        }
    }

    fn generator(&self) -> Result<DraftGenerator> {
        let model = create_model(self.model, &self.inference_config())?;
        info!("🧠 Drafts will be written by {} ({})", model.name(), model.model_id());
        Ok(DraftGenerator::new(model, select_guidelines(&self.guidelines)))
    }

    fn blog_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.site_url.trim_end_matches('/'), slug)
    }
}

fn print_validation(draft: &BlogPostDraft) -> bool {
    let report = validate_draft(draft);
    if report.valid {
        println!("✅ \"{}\" passes every editorial check", draft.title);
    } else {
        println!("⚠️ \"{}\" has {} problem(s):", draft.title, report.errors.len());
        for problem in &report.errors {
            println!("  - {}", problem);
        }
    }
    report.valid
}

async fn generate_once(
    ranker: &TopicRanker,
    generator: &DraftGenerator,
    options: SelectionOptions,
    out_dir: Option<&PathBuf>,
) -> Result<()> {
    let selection = ranker.select_articles_for_blog(options).await;
    if selection.articles.is_empty() {
        return Err(Error::Feed("no recent articles are available to write about".to_string()));
    }

    let draft = generator
        .generate_blog_post(&selection.articles, &selection.trending_topics)
        .await?;
    print_validation(&draft);

    match out_dir {
        Some(dir) => {
            let path = write_draft(dir, &draft)?;
            info!("📝 Draft saved to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&draft)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    nd_feeds::logging::init_logging();
    let cli = Cli::parse();

    let reader = Arc::new(SourceReader::with_default_sources()?);

    match &cli.command {
        Commands::Feeds(args) => handle_command(args.clone(), reader, TopicConfig::default()).await?,
        Commands::Trending { days, json } => {
            let args = FeedArgs {
                command: FeedCommands::Trending {
                    days: *days,
                    json: *json,
                },
            };
            handle_command(args, reader, TopicConfig::default()).await?
        }
        Commands::Generate {
            max_articles,
            days,
            no_trending,
            out_dir,
            interval,
        } => {
            let ranker = TopicRanker::new(reader, TopicConfig::default());
            let generator = cli.generator()?;
            let options = SelectionOptions {
                max_articles: *max_articles,
                days_back: *days,
                prefer_trending: !no_trending,
            };

            if let Some(interval) = interval {
                let out_dir = out_dir.clone().unwrap_or_else(|| PathBuf::from("drafts"));
                info!("Running in periodic mode with {}s interval", interval.0.as_secs());
                loop {
                    info!("Starting generation cycle");
                    if let Err(e) = generate_once(&ranker, &generator, options, Some(&out_dir)).await {
                        error!("Error during generation: {}", e);
                    }
                    info!("Waiting {}s before next cycle", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                generate_once(&ranker, &generator, options, out_dir.as_ref()).await?;
            }
        }
        Commands::Regenerate { draft, feedback, output } => {
            let original = read_draft(draft)?;
            let generator = cli.generator()?;
            let revised = generator.regenerate_blog_post(&original, feedback, &[]).await?;
            print_validation(&revised);
            let target = output.as_ref().unwrap_or(draft);
            write_draft_to(target, &revised)?;
            info!("📝 Revised draft saved to {}", target.display());
        }
        Commands::Validate { draft } => {
            let draft = read_draft(draft)?;
            if !print_validation(&draft) {
                std::process::exit(1);
            }
        }
        Commands::Email { draft, token, format } => {
            let draft = read_draft(draft)?;
            let links = ApprovalLinks::for_token(&cli.site_url, token);
            let email = approval_email(&draft, token, &links)?;
            match format {
                EmailFormat::Html => println!("{}", email.html),
                EmailFormat::Text => println!("Subject: {}\n\n{}", email.subject, email.text),
                EmailFormat::Json => println!("{}", serde_json::to_string_pretty(&email)?),
            }
        }
        Commands::Publish {
            draft,
            blog_url,
            image_url,
            platforms,
        } => {
            let draft = read_draft(draft)?;
            let publisher = SocialPublisher::from_config(SocialConfig::from_env())?;
            let blog_url = blog_url.clone().unwrap_or_else(|| cli.blog_url(&draft.slug));
            let image_url = image_url.as_deref();

            let results = if platforms.is_empty() {
                publisher.publish_to_all(&draft, &blog_url, image_url).await
            } else {
                let mut results = Vec::new();
                for platform in platforms {
                    results.push(match platform.as_str() {
                        "twitter" => publisher.publish_to_twitter(&draft, &blog_url).await,
                        name => publisher.publish_to(name, &draft, &blog_url, image_url).await,
                    });
                }
                results
            };

            if results.is_empty() {
                println!("No social platforms are configured");
            }
            for result in &results {
                if result.success {
                    println!(
                        "✅ {}: {}",
                        result.platform,
                        result.post_url.as_deref().or(result.post_id.as_deref()).unwrap_or("published")
                    );
                } else {
                    println!("❌ {}: {}", result.platform, result.error.as_deref().unwrap_or("failed"));
                }
            }
        }
        Commands::CheckSocial => {
            let config = SocialConfig::from_env();
            info!("Configured platforms: {:?}", config.configured_platforms());
            let publisher = SocialPublisher::from_config(config)?;
            let statuses = publisher.test_connections().await;
            if statuses.is_empty() {
                println!("No social platforms are configured");
            }
            for status in statuses {
                if status.connected {
                    println!("✅ {}: {}", status.platform, status.detail.unwrap_or_default());
                } else {
                    println!("❌ {}: {}", status.platform, status.error.unwrap_or_default());
                }
            }
        }
        Commands::Serve { addr } => {
            let source: Arc<dyn ArticleSource> = reader;
            let state = AppState {
                ranker: Arc::new(TopicRanker::new(source.clone(), TopicConfig::default())),
                source,
                generator: Arc::new(cli.generator()?),
                publisher: Arc::new(SocialPublisher::from_config(SocialConfig::from_env())?),
                site_url: cli.site_url.clone(),
            };
            nd_web::serve(state, *addr).await?;
        }
    }

    Ok(())
}
