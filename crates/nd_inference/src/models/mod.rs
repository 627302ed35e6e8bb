use std::str::FromStr;
use std::sync::Arc;
use nd_core::{CompletionModel, Error, Result};
use crate::Config;

pub mod anthropic;
pub mod canned;

pub use anthropic::AnthropicModel;
pub use canned::CannedModel;

/// Which completion backend drafts are written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// Hosted Anthropic Messages API
    #[default]
    Anthropic,
    /// Fixed sample reply, no network access
    Canned,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "canned" | "dummy" => Ok(Self::Canned),
            other => Err(Error::Config(format!(
                "Unknown model '{}'. Available models: anthropic (default), canned",
                other
            ))),
        }
    }
}

pub fn create_model(kind: ModelKind, config: &Config) -> Result<Arc<dyn CompletionModel>> {
    let model: Arc<dyn CompletionModel> = match kind {
        ModelKind::Anthropic => Arc::new(AnthropicModel::new(config.clone())?),
        ModelKind::Canned => Arc::new(CannedModel::sample()),
    };
    tracing::info!(model = model.name(), model_id = model.model_id(), "completion model ready");
    Ok(model)
}
