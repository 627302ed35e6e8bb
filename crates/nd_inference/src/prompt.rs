use nd_core::{BlogPostDraft, RssArticle, TrendingTopic};

pub const CONTENT_REQUIREMENTS: &str = "\
## Content Requirements

- Length: 800 to 1500 words of body content
- SEO: a compelling title under 60 characters where possible, a meta description of 120 to 160 characters, and 3 to 6 keywords
- Format: markdown with ## and ### headings, short paragraphs, bullet lists where they help
- Hook: open with why this matters to a small business owner right now
- Scannability: a reader skimming the headings should get the main advice
- Accuracy: only state facts found in the source material, and credit the sources
- Close with a practical next step and a soft call to action";

pub const RESPONSE_FORMAT: &str = r##"## Response Format

Respond with ONLY a single JSON object, no commentary before or after it, using exactly this structure:

{
  "title": "Blog post title",
  "excerpt": "One or two sentence summary for listings",
  "content": "Full markdown body",
  "metaTitle": "SEO title",
  "metaDescription": "SEO description, 120-160 characters",
  "keywords": ["keyword one", "keyword two", "keyword three"],
  "featuredImagePrompt": "Description of a featured image for an image generator",
  "category": "Cybersecurity News",
  "tags": ["tag-one", "tag-two"],
  "facebook": {
    "title": "Post headline, max 80 characters",
    "description": "Post text, max 200 characters",
    "hashtags": ["#Cybersecurity", "#SmallBusiness"]
  },
  "instagram": {
    "caption": "Engaging caption, max 2000 characters, ending with a link-in-bio prompt",
    "hashtags": ["#Cybersecurity", "#SmallBusiness", "#TechTips"]
  },
  "linkedin": {
    "title": "Professional headline",
    "content": "Professional post text, max 3000 characters",
    "hashtags": ["#Cybersecurity", "#ManagedIT"]
  }
}"##;

/// Renders the source articles as labeled blocks.
pub fn render_sources(articles: &[RssArticle]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            format!(
                "### Source {}: {}\nTitle: {}\nPublished: {}\nLink: {}\nContent: {}\n",
                i + 1,
                article.source,
                article.title,
                article.pub_date.format("%Y-%m-%d"),
                article.link,
                article.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_topics(topics: &[TrendingTopic]) -> String {
    let mut section = String::from("## Trending Topics\n\n");
    for (rank, topic) in topics.iter().enumerate() {
        section.push_str(&format!(
            "{}. {} (mentioned in {} articles, relevance {:.2})\n",
            rank + 1,
            topic.keyword,
            topic.frequency,
            topic.relevance_score
        ));
    }
    if let Some(top) = topics.first() {
        section.push_str(&format!(
            "\nPrioritize the top trending topic, \"{}\", and explain what it means for small businesses.\n",
            top.keyword
        ));
    }
    section
}

/// Prompt for a brand-new post written from `articles`.
pub fn build_generation_prompt(guidelines: &str, articles: &[RssArticle], topics: &[TrendingTopic]) -> String {
    let mut prompt = format!(
        "You are the content writer for a managed IT services company. Write an original blog post \
         for our website based on the recent security news below.\n\n\
         {}\n\n{}\n\n## Source Material\n\n{}\n",
        guidelines.trim(),
        CONTENT_REQUIREMENTS,
        render_sources(articles)
    );

    if !topics.is_empty() {
        prompt.push('\n');
        prompt.push_str(&render_topics(topics));
    }

    prompt.push('\n');
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

/// Prompt asking for a revision of `original` that addresses reviewer `feedback`.
pub fn build_regeneration_prompt(
    guidelines: &str,
    original: &BlogPostDraft,
    feedback: &str,
    articles: &[RssArticle],
) -> String {
    let sources = if articles.is_empty() {
        original
            .source_urls
            .iter()
            .map(|url| format!("- {}", url))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        render_sources(articles)
    };

    format!(
        "You are the content writer for a managed IT services company. A reviewer asked for changes \
         to the blog post draft below. Revise it to address the feedback while keeping our brand voice.\n\n\
         {}\n\n{}\n\n\
         ## Previous Draft\n\nTitle: {}\n\n{}\n\n\
         ## Reviewer Feedback\n\n{}\n\n\
         ## Source Material\n\n{}\n\n{}",
        guidelines.trim(),
        CONTENT_REQUIREMENTS,
        original.title,
        original.content,
        feedback.trim(),
        sources,
        RESPONSE_FORMAT
    )
}
