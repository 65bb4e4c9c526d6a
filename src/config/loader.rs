use crate::config::duration::parse_duration;
use crate::config::schema::{Config, DEFAULT_PORT};
use crate::retention::Whitelist;
use crate::twitter::{Credentials, DEFAULT_API_BASE_URL};
use thiserror::Error;

pub const CONSUMER_KEY: &str = "CONSUMER_KEY";
pub const CONSUMER_SECRET: &str = "CONSUMER_SECRET";
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
pub const MAX_TWEET_AGE: &str = "MAX_TWEET_AGE";
pub const TWEET_INTERACTION_TIMEOUT: &str = "TWEET_INTERACTION_TIMEOUT";
pub const WHITELIST: &str = "WHITELIST";
pub const PORT: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";
pub const API_BASE_URL: &str = "TWITTER_API_BASE_URL";

/// Prefix accepted in front of the four credential variables
const CREDENTIAL_ALIAS_PREFIX: &str = "TWITTER_";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(String),

    #[error("Invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Loads the configuration from the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Loads the configuration through `lookup`, which maps a variable name to its value.
///
/// Empty values are treated as unset.
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    tracing::debug!("Loading configuration from environment");

    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let credentials = Credentials::new(
        required_credential(&get, CONSUMER_KEY)?,
        required_credential(&get, CONSUMER_SECRET)?,
        required_credential(&get, ACCESS_TOKEN)?,
        required_credential(&get, ACCESS_TOKEN_SECRET)?,
    );

    let max_tweet_age = parse_duration_var(&get, MAX_TWEET_AGE)?;
    let interaction_timeout = parse_duration_var(&get, TWEET_INTERACTION_TIMEOUT)?;

    let whitelist = get(WHITELIST)
        .map(|value| Whitelist::parse(&value))
        .unwrap_or_default();

    let port = match get(PORT) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue {
                name: PORT.to_string(),
                message: format!("{:?} is not a port number: {}", value, e),
            })?,
        None => DEFAULT_PORT,
    };

    let api_base_url = get(API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let config = Config {
        credentials,
        max_tweet_age,
        interaction_timeout,
        whitelist,
        port,
        api_base_url,
    };

    let summary = config.get_safe_summary();
    tracing::debug!(
        credentials_configured = summary.credentials_configured,
        max_tweet_age_secs = summary.max_tweet_age_secs,
        interaction_timeout_secs = summary.interaction_timeout_secs,
        whitelist_count = summary.whitelist_count,
        port = summary.port,
        api_base_url = %summary.api_base_url,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn required<G>(get: &G, name: &str) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    get(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

/// Credentials may also be given with a `TWITTER_` prefix
fn required_credential<G>(get: &G, name: &str) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    required(get, name).or_else(|err| {
        get(&format!("{}{}", CREDENTIAL_ALIAS_PREFIX, name)).ok_or(err)
    })
}

fn parse_duration_var<G>(get: &G, name: &str) -> Result<std::time::Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value = required(get, name)?;
    parse_duration(&value).map_err(|e| ConfigError::InvalidValue {
        name: name.to_string(),
        message: e.to_string(),
    })
}
