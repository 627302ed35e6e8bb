use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use nd_core::Result;

pub const DEFAULT_GUIDELINES_PATH: &str = "content/blog-guidelines.md";

pub const DEFAULT_GUIDELINES: &str = "\
# Brand and Style Guidelines

Voice: knowledgeable, calm and practical. We are the trusted IT partner for
small and mid-sized businesses, not a vendor selling fear.

Audience: business owners and office managers without a security team.
Explain technical terms in plain language the first time they appear.

Tone:
- Confident but never alarmist; pair every risk with a concrete action
- Use \"you\" and \"your business\"; avoid jargon-heavy paragraphs
- Credit the original reporting when summarising news

Always end with a clear next step the reader can take this week, and mention
that our team can help without a hard sell.";

/// Supplies the brand and style guidelines the draft prompt opens with.
pub trait GuidelineProvider: Send + Sync + fmt::Debug {
    fn guidelines(&self) -> String;
}

/// Guidelines compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticGuidelines(String);

impl StaticGuidelines {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Default for StaticGuidelines {
    fn default() -> Self {
        Self::new(DEFAULT_GUIDELINES)
    }
}

impl GuidelineProvider for StaticGuidelines {
    fn guidelines(&self) -> String {
        self.0.clone()
    }
}

/// Guidelines read from a text file maintained by the marketing team.
#[derive(Debug, Clone)]
pub struct FileGuidelines {
    path: PathBuf,
    text: String,
}

impl FileGuidelines {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        Ok(Self { path, text })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GuidelineProvider for FileGuidelines {
    fn guidelines(&self) -> String {
        self.text.clone()
    }
}

/// The file-backed provider when `path` can be read and is not blank,
/// the built-in guidelines otherwise.
pub fn select_guidelines(path: impl AsRef<Path>) -> Arc<dyn GuidelineProvider> {
    let path = path.as_ref();
    match FileGuidelines::load(path) {
        Ok(file) if !file.text.trim().is_empty() => {
            tracing::info!(path = %path.display(), "using guidelines file");
            Arc::new(file)
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "guidelines file is empty, using built-in guidelines");
            Arc::new(StaticGuidelines::default())
        }
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "guidelines file unavailable, using built-in guidelines");
            Arc::new(StaticGuidelines::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_select_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Always mention quarterly reviews.").unwrap();

        let provider = select_guidelines(file.path());
        assert_eq!(provider.guidelines().trim(), "Always mention quarterly reviews.");
    }

    #[test]
    fn test_select_falls_back_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let provider = select_guidelines(dir.path().join("missing.md"));
        assert_eq!(provider.guidelines(), DEFAULT_GUIDELINES);
    }

    #[test]
    fn test_select_falls_back_when_blank() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let provider = select_guidelines(file.path());
        assert_eq!(provider.guidelines(), DEFAULT_GUIDELINES);
    }

    #[test]
    fn test_file_guidelines_load_error() {
        assert!(FileGuidelines::load("/definitely/not/here.md").is_err());
    }
}
