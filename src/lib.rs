//! ephemeral: deletes old tweets from an account's timeline on demand
//!
//! A purge pass fetches the newest 200 tweets and deletes each one that is older
//! than the configured age limit, is not whitelisted, and has no recent reply.
//! The pass is triggered over HTTP (`gateway`) or from the command line (`cli`).

pub mod cli;
pub mod config;
pub mod gateway;
pub mod retention;
pub mod twitter;
