use std::fs;
use std::path::{Path, PathBuf};
use nd_core::{BlogPostDraft, Result};

pub fn read_draft(path: &Path) -> Result<BlogPostDraft> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes `draft` as `<dir>/<slug>.json` and returns the path.
pub fn write_draft(dir: &Path, draft: &BlogPostDraft) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", draft.slug));
    fs::write(&path, serde_json::to_string_pretty(draft)?)?;
    Ok(path)
}

pub fn write_draft_to(path: &Path, draft: &BlogPostDraft) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(draft)?)?;
    Ok(())
}
