use std::fmt;
use std::sync::Mutex;
use async_trait::async_trait;
use nd_core::{CompletionModel, Result};

/// Reply used for offline dry runs: a complete draft wrapped the way models
/// usually wrap it.
const SAMPLE_REPLY: &str = r###"Here is the blog post you asked for:

```json
{
  "title": "Ransomware Is Targeting Small Businesses: 5 Steps to Protect Yours",
  "excerpt": "Ransomware crews increasingly go after small businesses. Here is what is changing and the five controls that stop most attacks.",
  "content": "## Why small businesses are in the crosshairs\n\nAttackers have learned that **small businesses** often run without a dedicated security team, which makes them faster to breach and more likely to pay.\n\n## Five steps that stop most attacks\n\n- Turn on multi-factor authentication for email and remote access\n- Keep offline, tested backups of critical data\n- Patch internet-facing systems within days, not months\n- Train staff to recognise phishing lures\n- Have an incident response contact ready before you need one\n\n## What to do next\n\nStart with *MFA and backups*: they are cheap, quick to roll out and blunt the two most common attack paths. If you are unsure where you stand, [book a security review](https://example.com/contact) with our team.",
  "metaTitle": "Ransomware Protection for Small Businesses | 5 Steps",
  "metaDescription": "Ransomware gangs are shifting focus to small businesses. Learn the five practical controls that stop most attacks before they start today.",
  "keywords": ["ransomware", "small business security", "mfa", "backups"],
  "featuredImagePrompt": "A small office protected by a glowing shield, modern flat illustration, blue and teal palette",
  "category": "Cybersecurity News",
  "tags": ["ransomware", "smb", "best-practices"],
  "facebook": {
    "title": "Is your business ready for ransomware?",
    "description": "Five practical steps that stop most ransomware attacks against small businesses.",
    "hashtags": ["#Cybersecurity", "#SmallBusiness", "#Ransomware"]
  },
  "instagram": {
    "caption": "Ransomware crews are going after small businesses. Five steps to stay out of their sights, starting with MFA and backups.",
    "hashtags": ["#Cybersecurity", "#SmallBusiness", "#Ransomware", "#TechTips"]
  },
  "linkedin": {
    "title": "Ransomware is targeting small businesses",
    "content": "Attackers are shifting toward small and mid-sized businesses. In our latest post we break down five controls that stop most ransomware attacks, from MFA to tested offline backups.",
    "hashtags": ["#Cybersecurity", "#ManagedIT", "#SmallBusiness"]
  }
}
```

Let me know if you want any changes."###;

/// Completion model that always answers with the same text and remembers
/// every prompt it was given.
pub struct CannedModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl fmt::Debug for CannedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CannedModel")
            .field("reply_chars", &self.reply.len())
            .finish()
    }
}

impl CannedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_REPLY)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }
}

#[async_trait]
impl CompletionModel for CannedModel {
    fn name(&self) -> &str {
        "Canned"
    }

    fn model_id(&self) -> &str {
        "canned-sample"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        Ok(self.reply.clone())
    }
}
