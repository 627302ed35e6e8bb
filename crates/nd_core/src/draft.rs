use serde::{Deserialize, Serialize};

/// A generated blog post, ready for review and publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Markdown body
    pub content: String,
    pub reading_time: String,

    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,

    pub featured_image_prompt: String,

    pub source_urls: Vec<String>,
    pub ai_prompt: String,
    pub ai_model: String,

    pub category: String,
    pub tags: Vec<String>,

    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    pub facebook: FacebookPost,
    pub instagram: InstagramPost,
    pub linkedin: LinkedInPost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacebookPost {
    pub title: String,
    pub description: String,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramPost {
    pub caption: String,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedInPost {
    pub title: String,
    pub content: String,
    pub hashtags: Vec<String>,
}
