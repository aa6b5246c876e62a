mod client;
mod http;

#[cfg(test)]
pub mod fake;

pub use client::{TrackerClient, COMMENT_LIMIT};
pub use http::HttpTracker;
