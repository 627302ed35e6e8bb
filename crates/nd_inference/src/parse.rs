use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use nd_core::{Error, Result};

lazy_static! {
    static ref FENCED_JSON: Regex = Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n(.*?)```").unwrap();
}

/// Ways of locating the JSON object inside a free-form model reply, tried in
/// the order of [`ExtractionStrategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The body of the first fenced code block
    FencedBlock,
    /// Everything from the first `{` to the last `}`
    BraceSpan,
}

impl ExtractionStrategy {
    pub const ORDER: [Self; 2] = [Self::FencedBlock, Self::BraceSpan];

    pub fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        match self {
            Self::FencedBlock => FENCED_JSON
                .captures(text)
                .and_then(|captures| captures.get(1))
                .map(|body| body.as_str().trim())
                .filter(|body| !body.is_empty()),
            Self::BraceSpan => {
                let start = text.find('{')?;
                let end = text.rfind('}')?;
                (start < end).then(|| &text[start..=end])
            }
        }
    }
}

/// Pulls the single JSON object out of a model reply.
pub fn extract_json(text: &str) -> Result<Value> {
    let mut last_error = None;

    for strategy in ExtractionStrategy::ORDER {
        let Some(candidate) = strategy.candidate(text) else {
            continue;
        };
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) if value.is_object() => return Ok(value),
            Ok(_) => last_error = Some(format!("{:?} candidate is not a JSON object", strategy)),
            Err(e) => last_error = Some(format!("{:?} candidate is not valid JSON: {}", strategy, e)),
        }
    }

    Err(Error::Parse(
        last_error.unwrap_or_else(|| "no JSON object found in model response".to_string()),
    ))
}

/// Accepts `["a", "b"]` as well as `"a, b"` for list fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Joined(String),
}

impl StringList {
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            Self::List(items) => items,
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFacebook {
    pub title: Option<String>,
    pub description: Option<String>,
    pub hashtags: Option<StringList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawInstagram {
    pub caption: Option<String>,
    pub hashtags: Option<StringList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawLinkedIn {
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Option<StringList>,
}

/// The draft exactly as the model returned it; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDraft {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Option<StringList>,
    pub featured_image_prompt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<StringList>,
    pub facebook: Option<RawFacebook>,
    pub instagram: Option<RawInstagram>,
    pub linkedin: Option<RawLinkedIn>,
}

pub fn parse_raw_draft(reply: &str) -> Result<RawDraft> {
    let value = extract_json(reply)?;
    serde_json::from_value(value).map_err(|e| Error::Parse(format!("unexpected draft shape: {}", e)))
}
