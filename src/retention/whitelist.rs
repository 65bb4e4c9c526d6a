//! Whitelist of status ids that are never deleted

use std::collections::HashSet;

/// Separator used by the `WHITELIST` environment variable
pub const WHITELIST_SEPARATOR: char = ':';

/// Set of protected status ids, stored as decimal strings.
///
/// Membership is an exact string match against the decimal form of the id, so
/// an entry like `"0123"` never matches status 123.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    ids: HashSet<String>,
}

impl Whitelist {
    /// Create a whitelist from already split entries.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: HashSet<String> = ids.into_iter().map(Into::into).collect();

        if ids.is_empty() {
            tracing::debug!("Whitelist empty, every old tweet is eligible for deletion");
        } else {
            tracing::info!("Whitelist initialized with {} protected tweet(s)", ids.len());
        }

        Self { ids }
    }

    /// Parse a colon-separated list such as `"123:456"`.
    ///
    /// Segments are kept verbatim; empty ones are dropped, so `""`, `":"` and
    /// `"1::2"` are all accepted.
    pub fn parse(value: &str) -> Self {
        Self::new(
            value
                .split(WHITELIST_SEPARATOR)
                .filter(|s| !s.is_empty()),
        )
    }

    /// Check if a status id is protected.
    pub fn is_whitelisted(&self, id: i64) -> bool {
        let tweet_id = id.to_string();
        if self.ids.contains(&tweet_id) {
            tracing::info!(tweet_id = %tweet_id, "Tweet is whitelisted");
            return true;
        }
        false
    }

    /// Get the number of protected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if whitelist is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
