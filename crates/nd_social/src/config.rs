use std::env;
use std::fmt;

pub const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/v18.0";
pub const LINKEDIN_API_URL: &str = "https://api.linkedin.com/v2";

/// A credential that never shows up in logs or `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookConfig {
    pub access_token: Secret,
    pub page_id: String,
    pub graph_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstagramConfig {
    pub access_token: Secret,
    pub account_id: String,
    pub graph_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInConfig {
    pub access_token: Secret,
    pub org_id: String,
    pub api_url: String,
}

/// Read so that a configured account is reported, never used to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterConfig {
    pub api_key: Secret,
    pub api_secret: Secret,
    pub access_token: Secret,
    pub access_secret: Secret,
}

/// Credentials of every platform that has them. A platform whose variables
/// are not all set stays `None` and is skipped by the publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialConfig {
    pub facebook: Option<FacebookConfig>,
    pub instagram: Option<InstagramConfig>,
    pub linkedin: Option<LinkedInConfig>,
    pub twitter: Option<TwitterConfig>,
}

impl SocialConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let graph_url = get("FACEBOOK_GRAPH_URL").unwrap_or_else(|| FACEBOOK_GRAPH_URL.to_string());
        let linkedin_url = get("LINKEDIN_API_URL").unwrap_or_else(|| LINKEDIN_API_URL.to_string());

        let facebook = match (get("FACEBOOK_ACCESS_TOKEN"), get("FACEBOOK_PAGE_ID")) {
            (Some(token), Some(page_id)) => Some(FacebookConfig {
                access_token: Secret::new(token),
                page_id,
                graph_url: graph_url.clone(),
            }),
            _ => None,
        };

        let instagram = match (get("INSTAGRAM_ACCESS_TOKEN"), get("INSTAGRAM_ACCOUNT_ID")) {
            (Some(token), Some(account_id)) => Some(InstagramConfig {
                access_token: Secret::new(token),
                account_id,
                graph_url,
            }),
            _ => None,
        };

        let linkedin = match (get("LINKEDIN_ACCESS_TOKEN"), get("LINKEDIN_ORG_ID")) {
            (Some(token), Some(org_id)) => Some(LinkedInConfig {
                access_token: Secret::new(token),
                org_id,
                api_url: linkedin_url,
            }),
            _ => None,
        };

        let twitter = match (
            get("TWITTER_API_KEY"),
            get("TWITTER_API_SECRET"),
            get("TWITTER_ACCESS_TOKEN"),
            get("TWITTER_ACCESS_SECRET"),
        ) {
            (Some(api_key), Some(api_secret), Some(access_token), Some(access_secret)) => {
                Some(TwitterConfig {
                    api_key: Secret::new(api_key),
                    api_secret: Secret::new(api_secret),
                    access_token: Secret::new(access_token),
                    access_secret: Secret::new(access_secret),
                })
            }
            _ => None,
        };

        Self {
            facebook,
            instagram,
            linkedin,
            twitter,
        }
    }

    pub fn configured_platforms(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.facebook.is_some() {
            names.push("facebook");
        }
        if self.instagram.is_some() {
            names.push("instagram");
        }
        if self.linkedin.is_some() {
            names.push("linkedin");
        }
        if self.twitter.is_some() {
            names.push("twitter");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> SocialConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SocialConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let config = config(&[]);
        assert_eq!(config, SocialConfig::default());
        assert!(config.configured_platforms().is_empty());
    }

    #[test]
    fn test_platform_needs_every_variable() {
        let config = config(&[
            ("FACEBOOK_ACCESS_TOKEN", "fb-token"),
            ("FACEBOOK_PAGE_ID", "123"),
            ("INSTAGRAM_ACCESS_TOKEN", "ig-token"),
            ("LINKEDIN_ACCESS_TOKEN", "li-token"),
            ("LINKEDIN_ORG_ID", "  "),
            ("TWITTER_API_KEY", "k"),
            ("TWITTER_API_SECRET", "s"),
            ("TWITTER_ACCESS_TOKEN", "t"),
        ]);
        assert_eq!(config.configured_platforms(), vec!["facebook"]);
        let facebook = config.facebook.unwrap();
        assert_eq!(facebook.page_id, "123");
        assert_eq!(facebook.access_token.expose(), "fb-token");
        assert_eq!(facebook.graph_url, FACEBOOK_GRAPH_URL);
    }

    #[test]
    fn test_base_url_overrides() {
        let config = config(&[
            ("INSTAGRAM_ACCESS_TOKEN", "ig-token"),
            ("INSTAGRAM_ACCOUNT_ID", "17841"),
            ("FACEBOOK_GRAPH_URL", "http://127.0.0.1:9000"),
            ("LINKEDIN_ACCESS_TOKEN", "li-token"),
            ("LINKEDIN_ORG_ID", "42"),
            ("LINKEDIN_API_URL", "http://127.0.0.1:9001"),
        ]);
        assert_eq!(config.instagram.unwrap().graph_url, "http://127.0.0.1:9000");
        assert_eq!(config.linkedin.unwrap().api_url, "http://127.0.0.1:9001");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let config = config(&[("FACEBOOK_ACCESS_TOKEN", "fb-secret"), ("FACEBOOK_PAGE_ID", "1")]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("fb-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
