//! Twitter platform module for ephemeral
//!
//! This module defines the capability trait the retention pass consumes and the
//! subset of the Twitter v1.1 data model it needs.
//!
//! # Architecture
//!
//! - `TwitterClient` trait is the seam between the purge logic and the network
//! - `ApiClient` is the reqwest implementation, signing requests with OAuth 1.0a
//! - `MockTwitterClient` (tests only) serves fixtures and records deletions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod client;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod oauth;

pub use client::{ApiClient, DEFAULT_API_BASE_URL};
pub use error::TwitterError;
pub use oauth::Credentials;

/// Format of `created_at` in Twitter v1.1 payloads, e.g. `Wed Oct 10 20:19:24 +0000 2018`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A single status on a timeline or in search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tweet {
    /// Status id
    pub id: i64,
    /// Creation time as sent by the API
    pub created_at: String,
    /// Status body
    #[serde(default, alias = "full_text")]
    pub text: String,
    /// Id of the status this one replies to
    #[serde(default)]
    pub in_reply_to_status_id: Option<i64>,
}

impl Tweet {
    /// Creates a status with no reply target
    pub fn new(id: i64, created_at: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            created_at: created_at.into(),
            text: text.into(),
            in_reply_to_status_id: None,
        }
    }

    /// Marks this status as a reply to `status_id`
    pub fn in_reply_to(mut self, status_id: i64) -> Self {
        self.in_reply_to_status_id = Some(status_id);
        self
    }

    /// Parses `created_at` into a UTC instant
    pub fn created_at_time(&self) -> Result<DateTime<Utc>, TwitterError> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| TwitterError::timestamp(&self.created_at, e.to_string()))
    }

    /// Returns true if this status replies to `status_id`
    pub fn is_reply_to(&self, status_id: i64) -> bool {
        self.in_reply_to_status_id == Some(status_id)
    }
}

/// Formats an instant the way the API does in `created_at`
pub fn format_created_at(time: DateTime<Utc>) -> String {
    time.format(CREATED_AT_FORMAT).to_string()
}

/// The authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Account id
    pub id: i64,
    /// Handle without the leading `@`
    pub screen_name: String,
}

/// Body of `search/tweets.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// Matching statuses
    #[serde(default)]
    pub statuses: Vec<Tweet>,
}

/// Capability interface onto the platform.
///
/// All implementations must be Send + Sync so the HTTP handlers can hold them
/// across await points.
#[async_trait::async_trait]
pub trait TwitterClient: Send + Sync {
    /// Resolves the authenticated account
    async fn get_self(&self) -> Result<User, TwitterError>;

    /// Fetches the newest `count` statuses of the account's own timeline
    async fn get_user_timeline(
        &self,
        count: u32,
        include_rts: bool,
    ) -> Result<Vec<Tweet>, TwitterError>;

    /// Runs a search query, restricted to statuses newer than `since_id`
    async fn search(
        &self,
        query: &str,
        count: u32,
        since_id: i64,
    ) -> Result<SearchResponse, TwitterError>;

    /// Deletes a status, returning the deleted status
    async fn delete_tweet(&self, id: i64, trim_user: bool) -> Result<Tweet, TwitterError>;
}
