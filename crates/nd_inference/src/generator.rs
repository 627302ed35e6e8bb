use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use nd_core::{BlogPostDraft, CompletionModel, Error, Result, RssArticle, TrendingTopic};
use crate::defaults::{fill_defaults, DraftContext};
use crate::guidelines::GuidelineProvider;
use crate::parse::parse_raw_draft;
use crate::prompt::{build_generation_prompt, build_regeneration_prompt};

/// Writes blog drafts from news articles with a completion model.
#[derive(Clone)]
pub struct DraftGenerator {
    model: Arc<dyn CompletionModel>,
    guidelines: Arc<dyn GuidelineProvider>,
}

impl fmt::Debug for DraftGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftGenerator")
            .field("model", &self.model.model_id())
            .field("guidelines", &self.guidelines)
            .finish()
    }
}

impl DraftGenerator {
    pub fn new(model: Arc<dyn CompletionModel>, guidelines: Arc<dyn GuidelineProvider>) -> Self {
        Self { model, guidelines }
    }

    pub fn model(&self) -> &Arc<dyn CompletionModel> {
        &self.model
    }

    pub async fn generate_blog_post(
        &self,
        articles: &[RssArticle],
        trending_topics: &[TrendingTopic],
    ) -> Result<BlogPostDraft> {
        if articles.is_empty() {
            return Err(Error::Inference(
                "cannot generate a blog post without source articles".to_string(),
            ));
        }

        info!(
            "Generating blog post from {} articles with {}",
            articles.len(),
            self.model.name()
        );
        let prompt = build_generation_prompt(&self.guidelines.guidelines(), articles, trending_topics);
        let source_urls = articles.iter().map(|a| a.link.clone()).collect();
        self.run(prompt, source_urls).await
    }

    /// Revises `original` according to reviewer feedback. When no articles
    /// are given the original draft's sources are kept.
    pub async fn regenerate_blog_post(
        &self,
        original: &BlogPostDraft,
        feedback: &str,
        articles: &[RssArticle],
    ) -> Result<BlogPostDraft> {
        info!("Regenerating \"{}\" with reviewer feedback", original.title);
        let prompt =
            build_regeneration_prompt(&self.guidelines.guidelines(), original, feedback, articles);
        let source_urls = if articles.is_empty() {
            original.source_urls.clone()
        } else {
            articles.iter().map(|a| a.link.clone()).collect()
        };
        self.run(prompt, source_urls).await
    }

    async fn run(&self, prompt: String, source_urls: Vec<String>) -> Result<BlogPostDraft> {
        debug!("Prompt is {} chars", prompt.len());
        let reply = self.model.complete(&prompt).await?;
        debug!("Model replied with {} chars", reply.len());

        let raw = parse_raw_draft(&reply)?;
        let draft = fill_defaults(
            raw,
            DraftContext {
                source_urls,
                ai_model: self.model.model_id().to_string(),
                ai_prompt: prompt,
            },
        )?;
        info!("Draft ready: \"{}\" ({})", draft.title, draft.reading_time);
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::guidelines::StaticGuidelines;
    use crate::models::CannedModel;

    fn article(link: &str) -> RssArticle {
        RssArticle {
            title: "Ransomware hits regional dentist chain".to_string(),
            link: link.to_string(),
            pub_date: Utc::now(),
            content: "Full story about a ransomware attack.".to_string(),
            content_snippet: "A ransomware attack took a dentist chain offline.".to_string(),
            source: "BleepingComputer".to_string(),
            author: None,
            categories: vec![],
        }
    }

    fn generator(model: Arc<CannedModel>) -> DraftGenerator {
        DraftGenerator::new(model, Arc::new(StaticGuidelines::new("Be friendly.")))
    }

    #[tokio::test]
    async fn test_generate_from_prose_wrapped_reply() {
        let model = Arc::new(CannedModel::sample());
        let draft = generator(model.clone())
            .generate_blog_post(&[article("https://news.example.com/1")], &[])
            .await
            .unwrap();

        assert_eq!(
            draft.slug,
            "ransomware-is-targeting-small-businesses-5-steps-to-protect-yours"
        );
        assert_eq!(draft.source_urls, vec!["https://news.example.com/1"]);
        assert_eq!(draft.ai_model, "canned-sample");
        assert!(draft.ai_prompt.contains("Be friendly."));
        assert!(draft.ai_prompt.contains("https://news.example.com/1"));
        assert_eq!(model.prompts().len(), 1);
        assert!(nd_core::validate_draft(&draft).valid);
    }

    #[tokio::test]
    async fn test_generate_requires_articles() {
        let model = Arc::new(CannedModel::sample());
        let err = generator(model.clone())
            .generate_blog_post(&[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_reply_without_json_is_parse_error() {
        let model = Arc::new(CannedModel::new("Sorry, I cannot help with that."));
        let err = generator(model)
            .generate_blog_post(&[article("https://news.example.com/1")], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_regenerate_includes_feedback_and_keeps_sources() {
        let model = Arc::new(CannedModel::sample());
        let generator = generator(model.clone());
        let original = generator
            .generate_blog_post(&[article("https://news.example.com/1")], &[])
            .await
            .unwrap();

        let revised = generator
            .regenerate_blog_post(&original, "Make the intro shorter.", &[])
            .await
            .unwrap();

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Make the intro shorter."));
        assert!(prompt.contains(&original.title));
        assert_eq!(revised.source_urls, original.source_urls);
    }
}
