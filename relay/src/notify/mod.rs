//! Outbound delivery of rendered messages.
//!
//! Handlers only see the [`Notifier`] trait; [`SlackNotifier`] is the
//! production implementation.

pub mod slack;

use async_trait::async_trait;
use thiserror::Error;

pub use slack::SlackNotifier;

/// Why a message did not reach the channel.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification request timed out")]
    Timeout,

    #[error("messaging API rejected the message: {error}")]
    Api { error: String },
}

/// Capability to post a text message to a channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError>;
}
