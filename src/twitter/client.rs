//! reqwest implementation of [`TwitterClient`] against the Twitter v1.1 REST API
//!
//! Every request is signed with OAuth 1.0a. There is no retry or backoff: a
//! failed call is reported to the caller, which decides how to degrade.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::twitter::oauth::Credentials;
use crate::twitter::{SearchResponse, Tweet, TwitterClient, TwitterError, User};

/// Root of the v1.1 REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Per-request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Twitter API client signing requests with the account's credentials
#[derive(Debug, Clone)]
pub struct ApiClient {
    credentials: Credentials,
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Creates a client for `base_url` (without trailing slash)
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TwitterError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<T, TwitterError> {
        let url = format!("{}/{}", self.base_url, path);
        let authorization = self
            .credentials
            .authorization_header(method.as_str(), &url, &params)?;

        debug!(method = %method, url = %url, "Sending Twitter API request");

        let response = self
            .client
            .request(method, &url)
            .query(&params)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Request failed");
                TwitterError::from(e)
            })?;

        let status = response.status();
        debug!(status = %status, "Received response");

        match status {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let error_text = response.text().await.unwrap_or_default();
                Err(TwitterError::auth(format!(
                    "Authentication failed ({}): {}",
                    status, error_text
                )))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let error_text = response.text().await.unwrap_or_default();
                Err(TwitterError::rate_limit(error_text))
            }
            status if status.is_client_error() => {
                let error_text = response.text().await.unwrap_or_default();
                Err(TwitterError::invalid_request(format!(
                    "Client error ({}): {}",
                    status, error_text
                )))
            }
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                Err(TwitterError::api(status.as_u16(), error_text))
            }
        }
    }
}

#[async_trait::async_trait]
impl TwitterClient for ApiClient {
    async fn get_self(&self) -> Result<User, TwitterError> {
        self.request(Method::GET, "account/verify_credentials.json", Vec::new())
            .await
    }

    async fn get_user_timeline(
        &self,
        count: u32,
        include_rts: bool,
    ) -> Result<Vec<Tweet>, TwitterError> {
        self.request(
            Method::GET,
            "statuses/user_timeline.json",
            vec![
                ("count", count.to_string()),
                ("include_rts", include_rts.to_string()),
            ],
        )
        .await
    }

    async fn search(
        &self,
        query: &str,
        count: u32,
        since_id: i64,
    ) -> Result<SearchResponse, TwitterError> {
        self.request(
            Method::GET,
            "search/tweets.json",
            vec![
                ("q", query.to_string()),
                ("count", count.to_string()),
                ("since_id", since_id.to_string()),
            ],
        )
        .await
    }

    async fn delete_tweet(&self, id: i64, trim_user: bool) -> Result<Tweet, TwitterError> {
        self.request(
            Method::POST,
            &format!("statuses/destroy/{}.json", id),
            vec![("trim_user", trim_user.to_string())],
        )
        .await
    }
}
