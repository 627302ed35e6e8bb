use html_escape::encode_double_quoted_attribute;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use nd_core::text::truncate_chars;
use nd_core::{BlogPostDraft, Error, Result};
use crate::markdown::to_html;

/// Characters of the body shown in the preview.
pub const PREVIEW_CHARS: usize = 1000;
const TOKEN_PREFIX_CHARS: usize = 8;
const APPROVAL_TEMPLATE: &str = include_str!("../templates/approval_email.html");

/// Where the reviewer's buttons point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalLinks {
    pub preview_url: String,
    pub approve_url: String,
    pub reject_url: String,
    pub edit_url: String,
}

impl ApprovalLinks {
    /// The conventional admin URLs for `token` under `base_url`.
    pub fn for_token(base_url: &str, token: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            preview_url: format!("{}/admin/blog/preview/{}", base, token),
            approve_url: format!("{}/api/blog/approve?token={}", base, token),
            reject_url: format!("{}/api/blog/reject?token={}", base, token),
            edit_url: format!("{}/admin/blog/edit/{}", base, token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn approval_subject(draft: &BlogPostDraft) -> String {
    format!("Blog post ready for review: {}", draft.title)
}

pub fn approval_email(draft: &BlogPostDraft, token: &str, links: &ApprovalLinks) -> Result<ApprovalEmail> {
    Ok(ApprovalEmail {
        subject: approval_subject(draft),
        html: generate_blog_approval_email(draft, token, links)?,
        text: generate_blog_approval_text(draft, token, links),
    })
}

fn short_token(token: &str) -> String {
    if token.chars().count() > TOKEN_PREFIX_CHARS {
        format!("{}...", truncate_chars(token, TOKEN_PREFIX_CHARS))
    } else {
        token.to_string()
    }
}

/// Leading part of the body and whether anything was cut.
fn body_preview(content: &str) -> (&str, bool) {
    let preview = truncate_chars(content, PREVIEW_CHARS);
    (preview, preview.len() < content.len())
}

#[derive(Serialize)]
struct SocialCard<'a> {
    platform: &'static str,
    heading: &'a str,
    body: &'a str,
    hashtags: String,
}

impl<'a> SocialCard<'a> {
    fn new(platform: &'static str, heading: &'a str, body: &'a str, hashtags: &[String]) -> Self {
        Self {
            platform,
            heading,
            body,
            hashtags: hashtags.join(" "),
        }
    }
}

/// A URL already encoded for a double-quoted attribute.
#[derive(Serialize)]
struct Href {
    href: String,
}

#[derive(Serialize)]
struct Action {
    label: &'static str,
    href: String,
    color: &'static str,
}

fn href(url: &str) -> String {
    encode_double_quoted_attribute(url).into_owned()
}

fn action(label: &'static str, url: &str, color: &'static str) -> Action {
    Action {
        label,
        href: href(url),
        color,
    }
}

/// HTML approval email for a freshly generated draft.
pub fn generate_blog_approval_email(draft: &BlogPostDraft, token: &str, links: &ApprovalLinks) -> Result<String> {
    let (preview, truncated) = body_preview(&draft.content);
    let social = &draft.social_media;

    let mut context = Context::new();
    context.insert("subject", &approval_subject(draft));
    context.insert("title", &draft.title);
    context.insert("category", &draft.category);
    context.insert("reading_time", &draft.reading_time);
    context.insert("excerpt", &draft.excerpt);
    context.insert("keywords", &draft.keywords);
    context.insert("body", &to_html(preview));
    context.insert("truncated", &truncated);
    context.insert("preview_href", &href(&links.preview_url));
    context.insert(
        "social",
        &[
            SocialCard::new(
                "Facebook",
                &social.facebook.title,
                &social.facebook.description,
                &social.facebook.hashtags,
            ),
            SocialCard::new("Instagram", "", &social.instagram.caption, &social.instagram.hashtags),
            SocialCard::new(
                "LinkedIn",
                &social.linkedin.title,
                &social.linkedin.content,
                &social.linkedin.hashtags,
            ),
        ],
    );
    context.insert("meta_title", &draft.meta_title);
    context.insert("meta_description", &draft.meta_description);
    context.insert("slug", &draft.slug);
    context.insert(
        "sources",
        &draft.source_urls.iter().map(|url| Href { href: href(url) }).collect::<Vec<_>>(),
    );
    context.insert(
        "actions",
        &[
            action("Approve & Publish", &links.approve_url, "#16a34a"),
            action("Reject", &links.reject_url, "#dc2626"),
            action("Request Changes", &links.edit_url, "#d97706"),
            action("Preview", &links.preview_url, "#2563eb"),
        ],
    );
    context.insert("token", &short_token(token));

    Tera::one_off(APPROVAL_TEMPLATE, &context, true).map_err(|e| Error::Render(format!("approval email: {}", e)))
}

/// Plain-text alternative of [`generate_blog_approval_email`].
pub fn generate_blog_approval_text(draft: &BlogPostDraft, token: &str, links: &ApprovalLinks) -> String {
    let (preview, truncated) = body_preview(&draft.content);
    let social = &draft.social_media;
    let mut out = String::new();

    out.push_str(&format!("NEW BLOG POST READY FOR REVIEW\n\n{}\n", draft.title));
    out.push_str(&format!("{} | {}\n\n", draft.category, draft.reading_time));
    out.push_str(&format!("{}\n\n", draft.excerpt));
    if !draft.keywords.is_empty() {
        out.push_str(&format!("Keywords: {}\n\n", draft.keywords.join(", ")));
    }

    out.push_str("CONTENT PREVIEW\n---------------\n");
    out.push_str(preview.trim_end());
    out.push('\n');
    if truncated {
        out.push_str(&format!("[Preview truncated. View full post: {}]\n", links.preview_url));
    }

    out.push_str("\nSOCIAL MEDIA PREVIEW\n--------------------\n");
    out.push_str(&format!(
        "Facebook: {}\n{}\n{}\n\n",
        social.facebook.title,
        social.facebook.description,
        social.facebook.hashtags.join(" ")
    ));
    out.push_str(&format!(
        "Instagram:\n{}\n{}\n\n",
        social.instagram.caption,
        social.instagram.hashtags.join(" ")
    ));
    out.push_str(&format!(
        "LinkedIn: {}\n{}\n{}\n",
        social.linkedin.title,
        social.linkedin.content,
        social.linkedin.hashtags.join(" ")
    ));

    out.push_str("\nSEO\n---\n");
    out.push_str(&format!(
        "Meta title: {}\nMeta description: {}\nSlug: {}\n",
        draft.meta_title, draft.meta_description, draft.slug
    ));

    out.push_str("\nSOURCES\n-------\n");
    for url in &draft.source_urls {
        out.push_str(&format!("- {}\n", url));
    }

    out.push_str(&format!(
        "\nApprove: {}\nReject: {}\nRequest changes: {}\nPreview: {}\n\nApproval token: {}\n",
        links.approve_url,
        links.reject_url,
        links.edit_url,
        links.preview_url,
        short_token(token)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::{FacebookPost, InstagramPost, LinkedInPost, SocialMedia};

    fn draft(content: &str) -> BlogPostDraft {
        BlogPostDraft {
            title: "Phishing & You".to_string(),
            slug: "phishing-you".to_string(),
            excerpt: "How to spot a lure.".to_string(),
            content: content.to_string(),
            reading_time: "3 min read".to_string(),
            meta_title: "Phishing & You".to_string(),
            meta_description: "Spot phishing before it spots you.".to_string(),
            keywords: vec!["phishing".to_string(), "email".to_string()],
            featured_image_prompt: "a fishing hook".to_string(),
            source_urls: vec!["https://news.example.com/phish".to_string()],
            ai_prompt: "prompt".to_string(),
            ai_model: "model".to_string(),
            category: "Best Practices".to_string(),
            tags: vec![],
            social_media: SocialMedia {
                facebook: FacebookPost {
                    title: "FB title".to_string(),
                    description: "FB description".to_string(),
                    hashtags: vec!["#Cybersecurity".to_string()],
                },
                instagram: InstagramPost {
                    caption: "IG caption".to_string(),
                    hashtags: vec!["#TechTips".to_string()],
                },
                linkedin: LinkedInPost {
                    title: "LI title".to_string(),
                    content: "LI content".to_string(),
                    hashtags: vec!["#ManagedIT".to_string()],
                },
            },
        }
    }

    fn links() -> ApprovalLinks {
        ApprovalLinks::for_token("https://example.com/", "abcdef1234567890")
    }

    #[test]
    fn test_links_for_token() {
        let links = links();
        assert_eq!(links.preview_url, "https://example.com/admin/blog/preview/abcdef1234567890");
        assert_eq!(links.approve_url, "https://example.com/api/blog/approve?token=abcdef1234567890");
        assert_eq!(links.reject_url, "https://example.com/api/blog/reject?token=abcdef1234567890");
        assert_eq!(links.edit_url, "https://example.com/admin/blog/edit/abcdef1234567890");
    }

    #[test]
    fn test_html_contains_every_section() {
        let html = generate_blog_approval_email(&draft("## Intro\n\nBe **careful**."), "abcdef1234567890", &links()).unwrap();

        assert!(html.contains("Phishing &amp; You"));
        assert!(html.contains("Best Practices"));
        assert!(html.contains("3 min read"));
        assert!(html.contains(">phishing</span>"));
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<strong>careful</strong>"));
        assert!(html.contains("FB description"));
        assert!(html.contains("IG caption"));
        assert!(html.contains("LI content"));
        assert!(html.contains("#ManagedIT"));
        assert!(html.contains("Spot phishing before it spots you."));
        assert!(html.contains(r#"<a href="https://news.example.com/phish">"#));
        for url in [&links().approve_url, &links().reject_url, &links().edit_url, &links().preview_url] {
            assert!(html.contains(url.as_str()));
        }
        assert!(!html.contains("View full post"));
    }

    #[test]
    fn test_token_is_shortened() {
        let email = approval_email(&draft("Body"), "abcdef1234567890", &links()).unwrap();
        assert!(email.html.contains("Approval token: abcdef12..."));
        assert!(email.text.contains("Approval token: abcdef12..."));
        assert_eq!(email.subject, "Blog post ready for review: Phishing & You");

        let html = generate_blog_approval_email(&draft("Body"), "short", &links()).unwrap();
        assert!(html.contains("Approval token: short<"));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let content = format!("{}UNIQUE_TAIL", "a".repeat(PREVIEW_CHARS));
        let html = generate_blog_approval_email(&draft(&content), "tok", &links()).unwrap();
        assert!(html.contains("View full post"));
        assert!(!html.contains("UNIQUE_TAIL"));

        let text = generate_blog_approval_text(&draft(&content), "tok", &links());
        assert!(text.contains("View full post"));
        assert!(!text.contains("UNIQUE_TAIL"));
    }

    #[test]
    fn test_action_buttons_and_escaping() {
        let mut d = draft("Body");
        d.excerpt = "<script>alert(1)</script>".to_string();
        d.source_urls = vec![r#"https://news.example.com/a"onclick="x"#.to_string()];
        let html = generate_blog_approval_email(&d, "abcdef1234567890", &links()).unwrap();

        assert!(html.contains(r#"<a href="https://example.com/api/blog/approve?token=abcdef1234567890" style="#));
        assert!(html.contains(r#"<a href="https://example.com/api/blog/reject?token=abcdef1234567890" style="#));
        assert!(html.contains(r#"<a href="https://example.com/admin/blog/edit/abcdef1234567890" style="#));
        assert!(html.contains(">Approve &amp; Publish</a>"));
        assert!(html.contains(">Request Changes</a>"));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("https://news.example.com/a&quot;onclick=&quot;x"));
        assert!(!html.contains(r#""onclick=""#));
    }

    #[test]
    fn test_empty_sources_and_headingless_card() {
        let mut d = draft("Body");
        d.source_urls.clear();
        let html = generate_blog_approval_email(&d, "tok", &links()).unwrap();
        assert!(html.contains("<p>No sources recorded.</p>"));
        assert!(html.contains(r#"<p style="margin:0;white-space:pre-line">IG caption</p>"#));
        assert!(html.contains("<strong>FB title</strong><br>FB description"));
    }

    #[test]
    fn test_body_at_limit_is_not_truncated() {
        let content = "b".repeat(PREVIEW_CHARS);
        let text = generate_blog_approval_text(&draft(&content), "tok", &links());
        assert!(!text.contains("View full post"));
    }

    #[test]
    fn test_text_lists_sources_and_actions() {
        let text = generate_blog_approval_text(&draft("Body"), "abcdef1234567890", &links());
        assert!(text.contains("- https://news.example.com/phish"));
        assert!(text.contains("Approve: https://example.com/api/blog/approve?token=abcdef1234567890"));
        assert!(text.contains("Keywords: phishing, email"));
        assert!(text.contains("Facebook: FB title"));
    }
}
