use serde::{Deserialize, Serialize};
use crate::draft::BlogPostDraft;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MIN_CONTENT_CHARS: usize = 500;
pub const MAX_CONTENT_CHARS: usize = 10_000;
pub const MIN_META_DESCRIPTION_CHARS: usize = 120;
pub const MAX_META_DESCRIPTION_CHARS: usize = 160;
pub const MIN_KEYWORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks a draft against the editorial rules. Every rule is evaluated and
/// all failures are reported; nothing is corrected.
pub fn validate_draft(draft: &BlogPostDraft) -> ValidationReport {
    let mut errors = Vec::new();

    let title_len = draft.title.trim().chars().count();
    if title_len == 0 {
        errors.push("Title is required".to_string());
    } else if draft.title.chars().count() > MAX_TITLE_CHARS {
        errors.push(format!(
            "Title is too long ({} characters, maximum {})",
            draft.title.chars().count(),
            MAX_TITLE_CHARS
        ));
    }

    let content_len = draft.content.chars().count();
    if content_len < MIN_CONTENT_CHARS {
        errors.push(format!(
            "Content is too short ({} characters, minimum {})",
            content_len, MIN_CONTENT_CHARS
        ));
    } else if content_len > MAX_CONTENT_CHARS {
        errors.push(format!(
            "Content is too long ({} characters, maximum {})",
            content_len, MAX_CONTENT_CHARS
        ));
    }

    let meta_len = draft.meta_description.chars().count();
    if !(MIN_META_DESCRIPTION_CHARS..=MAX_META_DESCRIPTION_CHARS).contains(&meta_len) {
        errors.push(format!(
            "Meta description should be between {} and {} characters (got {})",
            MIN_META_DESCRIPTION_CHARS, MAX_META_DESCRIPTION_CHARS, meta_len
        ));
    }

    if draft.keywords.len() < MIN_KEYWORDS {
        errors.push(format!(
            "At least {} keywords are required (got {})",
            MIN_KEYWORDS,
            draft.keywords.len()
        ));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
