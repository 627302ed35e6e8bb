use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A hosted text-completion model that turns a single user prompt into a reply.
#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    /// Human readable backend name, used in logs
    fn name(&self) -> &str;

    /// Identifier of the model version, recorded on every draft for audit
    fn model_id(&self) -> &str;

    /// Send the prompt and return the first text block of the reply
    async fn complete(&self, prompt: &str) -> Result<String>;
}
