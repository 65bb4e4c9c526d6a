//! Mock Twitter client for testing
//!
//! Serves a configured timeline, identity and search results, can be told to
//! fail any call, and records every deletion for verification.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::twitter::{SearchResponse, Tweet, TwitterClient, TwitterError, User};

/// Mock client for testing
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockTwitterClient::new();
/// mock.set_timeline(vec![Tweet::new(1, "Wed Oct 10 20:19:24 +0000 2018", "old")]);
/// evaluate_and_purge(&mock, &policy, &Whitelist::default()).await;
/// assert_eq!(mock.deleted_ids(), vec![1]);
/// ```
pub struct MockTwitterClient {
    user: Arc<Mutex<User>>,
    timeline: Arc<Mutex<Vec<Tweet>>>,
    search_results: Arc<Mutex<Vec<Tweet>>>,
    timeline_error: Arc<Mutex<Option<TwitterError>>>,
    self_error: Arc<Mutex<Option<TwitterError>>>,
    search_error: Arc<Mutex<Option<TwitterError>>>,
    /// Ids whose deletion fails
    failing_deletes: Arc<Mutex<HashSet<i64>>>,
    deleted: Arc<Mutex<Vec<(i64, bool)>>>,
    /// (query, count, since_id) of every search
    searches: Arc<Mutex<Vec<(String, u32, i64)>>>,
    /// (count, include_rts) of every timeline fetch
    timeline_requests: Arc<Mutex<Vec<(u32, bool)>>>,
}

impl MockTwitterClient {
    /// Creates a mock for `@me` with an empty timeline
    pub fn new() -> Self {
        Self {
            user: Arc::new(Mutex::new(User {
                id: 42,
                screen_name: "me".to_string(),
            })),
            timeline: Arc::new(Mutex::new(Vec::new())),
            search_results: Arc::new(Mutex::new(Vec::new())),
            timeline_error: Arc::new(Mutex::new(None)),
            self_error: Arc::new(Mutex::new(None)),
            search_error: Arc::new(Mutex::new(None)),
            failing_deletes: Arc::new(Mutex::new(HashSet::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            searches: Arc::new(Mutex::new(Vec::new())),
            timeline_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_screen_name(&self, screen_name: impl Into<String>) {
        self.user.lock().unwrap().screen_name = screen_name.into();
    }

    pub fn set_timeline(&self, tweets: Vec<Tweet>) {
        *self.timeline.lock().unwrap() = tweets;
    }

    /// Sets the statuses every search returns (before client-side filtering)
    pub fn set_search_results(&self, tweets: Vec<Tweet>) {
        *self.search_results.lock().unwrap() = tweets;
    }

    pub fn fail_timeline(&self, error: TwitterError) {
        *self.timeline_error.lock().unwrap() = Some(error);
    }

    pub fn fail_get_self(&self, error: TwitterError) {
        *self.self_error.lock().unwrap() = Some(error);
    }

    pub fn fail_search(&self, error: TwitterError) {
        *self.search_error.lock().unwrap() = Some(error);
    }

    pub fn fail_delete(&self, id: i64) {
        self.failing_deletes.lock().unwrap().insert(id);
    }

    /// Ids passed to delete_tweet, in call order, including failed attempts
    pub fn deleted_ids(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }

    /// (id, trim_user) of every delete call
    pub fn delete_calls(&self) -> Vec<(i64, bool)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<(String, u32, i64)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn timeline_requests(&self) -> Vec<(u32, bool)> {
        self.timeline_requests.lock().unwrap().clone()
    }
}

impl Default for MockTwitterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TwitterClient for MockTwitterClient {
    async fn get_self(&self) -> Result<User, TwitterError> {
        if let Some(err) = self.self_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.user.lock().unwrap().clone())
    }

    async fn get_user_timeline(
        &self,
        count: u32,
        include_rts: bool,
    ) -> Result<Vec<Tweet>, TwitterError> {
        self.timeline_requests
            .lock()
            .unwrap()
            .push((count, include_rts));

        if let Some(err) = self.timeline_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.timeline.lock().unwrap().clone())
    }

    async fn search(
        &self,
        query: &str,
        count: u32,
        since_id: i64,
    ) -> Result<SearchResponse, TwitterError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), count, since_id));

        if let Some(err) = self.search_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(SearchResponse {
            statuses: self.search_results.lock().unwrap().clone(),
        })
    }

    async fn delete_tweet(&self, id: i64, trim_user: bool) -> Result<Tweet, TwitterError> {
        self.deleted.lock().unwrap().push((id, trim_user));

        if self.failing_deletes.lock().unwrap().contains(&id) {
            return Err(TwitterError::invalid_request(format!(
                "No status found with that ID: {}",
                id
            )));
        }

        let timeline = self.timeline.lock().unwrap();
        timeline
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TwitterError::invalid_request("No status found with that ID."))
    }
}
