//! Retention pass: decides which timeline tweets to delete
//!
//! A tweet is deleted when it is older than the tweet age limit, is not
//! whitelisted, and has no reply newer than the interaction age limit.
//!
//! Lookups that fail degrade to the outcome that keeps the pass moving: a
//! failed timeline fetch yields an empty timeline, and a failed identity or
//! search lookup counts as "no ongoing interaction". The latter fails open,
//! which means it permits deletion.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error, info, warn};

use crate::twitter::{Tweet, TwitterClient};

pub mod whitelist;

pub use whitelist::Whitelist;

/// Number of statuses requested from the timeline and from each reply search
pub const FETCH_COUNT: u32 = 200;

/// The two thresholds of a purge pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Minimum age before a tweet may be deleted
    pub tweet_age_limit: Duration,
    /// A reply younger than this keeps its parent alive
    pub interaction_age_limit: Duration,
}

impl RetentionPolicy {
    pub fn new(tweet_age_limit: Duration, interaction_age_limit: Duration) -> Self {
        Self {
            tweet_age_limit,
            interaction_age_limit,
        }
    }
}

/// Outcome counters of one purge pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Tweets returned by the timeline fetch
    pub examined: usize,
    /// Ids successfully deleted, in timeline order
    pub deleted: Vec<i64>,
    /// Old enough but whitelisted
    pub whitelisted: usize,
    /// Old enough but with a recent reply
    pub interacting: usize,
    /// Younger than the tweet age limit
    pub too_recent: usize,
    /// Skipped because `created_at` did not parse
    pub unparsable: usize,
    /// Delete requests that failed
    pub failed: usize,
}

/// Runs one purge pass against `client`.
pub async fn evaluate_and_purge(
    client: &dyn TwitterClient,
    policy: &RetentionPolicy,
    whitelist: &Whitelist,
) -> PurgeReport {
    evaluate_and_purge_at(client, policy, whitelist, Utc::now()).await
}

/// Runs one purge pass, measuring ages against `now`.
pub async fn evaluate_and_purge_at(
    client: &dyn TwitterClient,
    policy: &RetentionPolicy,
    whitelist: &Whitelist,
    now: DateTime<Utc>,
) -> PurgeReport {
    info!("Start deleting tweets");

    let tweet_age_limit = to_time_delta(policy.tweet_age_limit);
    let timeline = get_timeline(client).await;

    let mut report = PurgeReport {
        examined: timeline.len(),
        ..PurgeReport::default()
    };
    let mut seen: HashSet<i64> = HashSet::with_capacity(timeline.len());

    for tweet in &timeline {
        if !seen.insert(tweet.id) {
            debug!(tweet_id = tweet.id, "Tweet already handled in this pass");
            continue;
        }

        let created = match tweet.created_at_time() {
            Ok(created) => created,
            Err(e) => {
                warn!(tweet_id = tweet.id, error = %e, "Could not parse time, skipping tweet");
                report.unparsable += 1;
                continue;
            }
        };

        if now.signed_duration_since(created) <= tweet_age_limit {
            report.too_recent += 1;
            continue;
        }

        if whitelist.is_whitelisted(tweet.id) {
            report.whitelisted += 1;
            continue;
        }

        if has_ongoing_interactions(client, tweet.id, policy.interaction_age_limit, now).await {
            report.interacting += 1;
            continue;
        }

        match client.delete_tweet(tweet.id, true).await {
            Ok(_) => {
                info!(tweet_id = tweet.id, created_at = %created, "Deleted tweet");
                debug!(tweet_id = tweet.id, text = %tweet.text, "Deleted tweet text");
                report.deleted.push(tweet.id);
            }
            Err(e) => {
                warn!(tweet_id = tweet.id, error = %e, "Failed to delete tweet");
                report.failed += 1;
            }
        }
    }

    info!(
        examined = report.examined,
        deleted = report.deleted.len(),
        whitelisted = report.whitelisted,
        interacting = report.interacting,
        too_recent = report.too_recent,
        unparsable = report.unparsable,
        failed = report.failed,
        "No more tweets to delete"
    );

    report
}

/// Fetches the account's timeline, falling back to an empty one on error.
pub async fn get_timeline(client: &dyn TwitterClient) -> Vec<Tweet> {
    match client.get_user_timeline(FETCH_COUNT, true).await {
        Ok(timeline) => timeline,
        Err(e) if e.is_auth_error() => {
            error!(error = %e, "Could not get timeline, check the account credentials");
            Vec::new()
        }
        Err(e) if e.is_rate_limit() => {
            warn!(error = %e, "Could not get timeline, rate limited until the next trigger");
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Could not get timeline");
            Vec::new()
        }
    }
}

/// Returns the replies addressed to the account that answer `tweet_id`.
///
/// The search is scoped to `to:<handle>` newer than `tweet_id`, and the result
/// is filtered again on `in_reply_to_status_id`. Any lookup failure yields no
/// replies.
pub async fn get_replies_for_tweet(client: &dyn TwitterClient, tweet_id: i64) -> Vec<Tweet> {
    let me = match client.get_self().await {
        Ok(me) => me,
        Err(e) => {
            warn!(tweet_id, error = %e, "Could not resolve own account, assuming no replies");
            return Vec::new();
        }
    };

    let query = format!("to:{}", me.screen_name);
    let response = match client.search(&query, FETCH_COUNT, tweet_id).await {
        Ok(response) => response,
        Err(e) => {
            warn!(tweet_id, error = %e, "Reply search failed, assuming no replies");
            return Vec::new();
        }
    };

    response
        .statuses
        .into_iter()
        .filter(|status| status.is_reply_to(tweet_id))
        .collect()
}

/// Returns true if `tweet_id` has a reply younger than `interaction_age_limit`.
pub async fn has_ongoing_interactions(
    client: &dyn TwitterClient,
    tweet_id: i64,
    interaction_age_limit: Duration,
    now: DateTime<Utc>,
) -> bool {
    let limit = to_time_delta(interaction_age_limit);

    for reply in get_replies_for_tweet(client, tweet_id).await {
        let created = match reply.created_at_time() {
            Ok(created) => created,
            Err(e) => {
                warn!(reply_id = reply.id, error = %e, "Could not parse time");
                continue;
            }
        };

        if now.signed_duration_since(created) < limit {
            info!(tweet_id, reply_id = reply.id, "Tweet has ongoing interactions");
            return true;
        }
    }

    false
}

fn to_time_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
