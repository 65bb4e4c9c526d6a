use std::time::Duration;

use crate::retention::{RetentionPolicy, Whitelist};
use crate::twitter::{Credentials, DEFAULT_API_BASE_URL};

/// Listen port when `FUNCTIONS_CUSTOMHANDLER_PORT` is not set
pub const DEFAULT_PORT: u16 = 8080;

/// Process configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub credentials: Credentials,

    /// Minimum age before a tweet may be deleted (`MAX_TWEET_AGE`)
    pub max_tweet_age: Duration,

    /// Window in which a reply keeps its parent (`TWEET_INTERACTION_TIMEOUT`)
    pub interaction_timeout: Duration,

    pub whitelist: Whitelist,

    pub port: u16,

    pub api_base_url: String,
}

/// Loggable view of the configuration, without secrets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub credentials_configured: bool,
    pub max_tweet_age_secs: u64,
    pub interaction_timeout_secs: u64,
    pub whitelist_count: usize,
    pub port: u16,
    pub api_base_url: String,
}

impl Config {
    pub fn new(
        credentials: Credentials,
        max_tweet_age: Duration,
        interaction_timeout: Duration,
    ) -> Self {
        Self {
            credentials,
            max_tweet_age,
            interaction_timeout,
            whitelist: Whitelist::default(),
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Thresholds of a purge pass
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.max_tweet_age, self.interaction_timeout)
    }

    pub fn get_safe_summary(&self) -> ConfigSummary {
        let c = &self.credentials;
        ConfigSummary {
            credentials_configured: ![
                &c.consumer_key,
                &c.consumer_secret,
                &c.access_token,
                &c.access_token_secret,
            ]
            .iter()
            .any(|v| v.is_empty()),
            max_tweet_age_secs: self.max_tweet_age.as_secs(),
            interaction_timeout_secs: self.interaction_timeout.as_secs(),
            whitelist_count: self.whitelist.len(),
            port: self.port,
            api_base_url: self.api_base_url.clone(),
        }
    }
}
