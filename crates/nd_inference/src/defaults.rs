use nd_core::text::{reading_time, slugify, truncate_chars};
use nd_core::{BlogPostDraft, Error, FacebookPost, InstagramPost, LinkedInPost, Result, SocialMedia};
use crate::parse::{RawDraft, StringList};

pub const DEFAULT_CATEGORY: &str = "Cybersecurity News";
pub const FACEBOOK_HASHTAGS: &[&str] = &["#Cybersecurity", "#SmallBusiness"];
pub const INSTAGRAM_HASHTAGS: &[&str] = &["#Cybersecurity", "#SmallBusiness", "#ITSecurity", "#TechTips"];
pub const LINKEDIN_HASHTAGS: &[&str] = &["#Cybersecurity", "#ManagedIT", "#SmallBusiness"];

const EXCERPT_CHARS: usize = 160;

/// Provenance recorded on every draft.
#[derive(Debug, Clone, Default)]
pub struct DraftContext {
    pub source_urls: Vec<String>,
    pub ai_prompt: String,
    pub ai_model: String,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn list_or(value: Option<StringList>, fallback: &[&str]) -> Vec<String> {
    let items = value.map(StringList::into_vec).unwrap_or_default();
    if items.is_empty() {
        fallback.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

fn hashtags_or(value: Option<StringList>, fallback: &[&str]) -> Vec<String> {
    list_or(value, fallback)
        .into_iter()
        .map(|tag| {
            if tag.starts_with('#') {
                tag
            } else {
                format!("#{}", tag.replace(' ', ""))
            }
        })
        .collect()
}

/// First prose paragraph of the body, shortened for listings.
fn excerpt_from(content: &str) -> String {
    let paragraph = content
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty() && !p.starts_with('#'))
        .unwrap_or_else(|| content.trim());
    let flat = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        format!("{}...", truncate_chars(&flat, EXCERPT_CHARS - 3).trim_end())
    }
}

pub fn default_image_prompt(title: &str) -> String {
    format!(
        "Professional, modern illustration for a cybersecurity blog post titled \"{}\". \
         Clean flat design, blue and teal palette, no text.",
        title
    )
}

/// Completes a model draft: derives slug and reading time, backfills every
/// missing optional field and attaches provenance. Only a missing title or
/// body is an error.
pub fn fill_defaults(raw: RawDraft, context: DraftContext) -> Result<BlogPostDraft> {
    let title = present(raw.title)
        .ok_or_else(|| Error::Parse("model response is missing required field `title`".to_string()))?;
    let content = present(raw.content)
        .ok_or_else(|| Error::Parse("model response is missing required field `content`".to_string()))?;
    let excerpt = present(raw.excerpt).unwrap_or_else(|| excerpt_from(&content));

    let facebook = raw.facebook.unwrap_or_default();
    let instagram = raw.instagram.unwrap_or_default();
    let linkedin = raw.linkedin.unwrap_or_default();

    let social_media = SocialMedia {
        facebook: FacebookPost {
            title: present(facebook.title).unwrap_or_else(|| title.clone()),
            description: present(facebook.description).unwrap_or_else(|| excerpt.clone()),
            hashtags: hashtags_or(facebook.hashtags, FACEBOOK_HASHTAGS),
        },
        instagram: InstagramPost {
            caption: present(instagram.caption)
                .unwrap_or_else(|| format!("{}\n\n{}\n\nLink in bio for the full article.", title, excerpt)),
            hashtags: hashtags_or(instagram.hashtags, INSTAGRAM_HASHTAGS),
        },
        linkedin: LinkedInPost {
            title: present(linkedin.title).unwrap_or_else(|| title.clone()),
            content: present(linkedin.content)
                .unwrap_or_else(|| format!("{}\n\nRead the full article on our blog.", excerpt)),
            hashtags: hashtags_or(linkedin.hashtags, LINKEDIN_HASHTAGS),
        },
    };

    Ok(BlogPostDraft {
        slug: slugify(&title),
        reading_time: reading_time(&content),
        meta_title: present(raw.meta_title).unwrap_or_else(|| title.clone()),
        meta_description: present(raw.meta_description).unwrap_or_else(|| excerpt.clone()),
        keywords: list_or(raw.keywords, &[]),
        featured_image_prompt: present(raw.featured_image_prompt)
            .unwrap_or_else(|| default_image_prompt(&title)),
        category: present(raw.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        tags: list_or(raw.tags, &[]),
        source_urls: context.source_urls,
        ai_prompt: context.ai_prompt,
        ai_model: context.ai_model,
        social_media,
        title,
        excerpt,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_raw_draft, RawFacebook};

    fn context() -> DraftContext {
        DraftContext {
            source_urls: vec!["https://news.example.com/a".to_string()],
            ai_prompt: "prompt".to_string(),
            ai_model: "test-model".to_string(),
        }
    }

    #[test]
    fn test_minimal_draft_is_fully_populated() {
        let body = "Ransomware keeps hitting small offices. ".repeat(15);
        let raw = parse_raw_draft(&format!(
            r#"{{"title": "Ransomware 101", "excerpt": "The basics.", "content": "{}"}}"#,
            body
        ))
        .unwrap();

        let draft = fill_defaults(raw, context()).unwrap();
        assert_eq!(draft.slug, "ransomware-101");
        assert_eq!(draft.meta_title, "Ransomware 101");
        assert_eq!(draft.meta_description, "The basics.");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
        assert!(draft.keywords.is_empty());
        assert!(draft.tags.is_empty());
        assert!(draft.featured_image_prompt.contains("\"Ransomware 101\""));
        assert_eq!(draft.reading_time, "1 min read");

        let social = &draft.social_media;
        assert_eq!(social.facebook.title, "Ransomware 101");
        assert_eq!(social.facebook.description, "The basics.");
        assert_eq!(social.facebook.hashtags, vec!["#Cybersecurity", "#SmallBusiness"]);
        assert!(social.instagram.caption.starts_with("Ransomware 101\n\nThe basics."));
        assert_eq!(social.instagram.hashtags.len(), INSTAGRAM_HASHTAGS.len());
        assert_eq!(social.linkedin.title, "Ransomware 101");
        assert!(social.linkedin.content.starts_with("The basics."));
        assert_eq!(social.linkedin.hashtags, vec!["#Cybersecurity", "#ManagedIT", "#SmallBusiness"]);

        assert_eq!(draft.source_urls, vec!["https://news.example.com/a"]);
        assert_eq!(draft.ai_prompt, "prompt");
        assert_eq!(draft.ai_model, "test-model");
    }

    #[test]
    fn test_model_values_win_over_defaults() {
        let raw = RawDraft {
            title: Some("Title".into()),
            content: Some("Body".into()),
            excerpt: Some("Excerpt".into()),
            meta_title: Some("Meta".into()),
            category: Some("Best Practices".into()),
            facebook: Some(RawFacebook {
                title: Some("FB".into()),
                description: None,
                hashtags: Some(StringList::List(vec!["Ransomware".into(), "Small Business".into()])),
            }),
            ..RawDraft::default()
        };
        let draft = fill_defaults(raw, context()).unwrap();
        assert_eq!(draft.meta_title, "Meta");
        assert_eq!(draft.category, "Best Practices");
        assert_eq!(draft.social_media.facebook.title, "FB");
        assert_eq!(draft.social_media.facebook.description, "Excerpt");
        assert_eq!(draft.social_media.facebook.hashtags, vec!["#Ransomware", "#SmallBusiness"]);
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let raw = RawDraft {
            title: Some("Title".into()),
            content: Some("Body".into()),
            excerpt: Some("Excerpt".into()),
            meta_title: Some("   ".into()),
            category: Some(String::new()),
            ..RawDraft::default()
        };
        let draft = fill_defaults(raw, context()).unwrap();
        assert_eq!(draft.meta_title, "Title");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_missing_required_fields() {
        let no_title = RawDraft {
            content: Some("Body".into()),
            ..RawDraft::default()
        };
        let err = fill_defaults(no_title, context()).unwrap_err();
        assert!(err.to_string().contains("`title`"));

        let no_content = RawDraft {
            title: Some("Title".into()),
            ..RawDraft::default()
        };
        assert!(matches!(fill_defaults(no_content, context()), Err(Error::Parse(_))));
    }

    #[test]
    fn test_excerpt_derived_from_body() {
        let body = format!("## Heading\n\n{}\n\nSecond paragraph.", "word ".repeat(60));
        let raw = RawDraft {
            title: Some("Title".into()),
            content: Some(body),
            ..RawDraft::default()
        };
        let draft = fill_defaults(raw, context()).unwrap();
        assert!(draft.excerpt.starts_with("word word"));
        assert!(draft.excerpt.ends_with("..."));
        assert!(draft.excerpt.chars().count() <= 160);
    }
}
