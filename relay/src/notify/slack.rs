//! Slack Web API notifier.
//!
//! Slack answers `chat.postMessage` with HTTP 200 even when the call fails;
//! the outcome is in the `ok` / `error` fields of the JSON body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{NotifyError, Notifier};

/// Posts messages through `chat.postMessage` with a bot token.
#[derive(Clone)]
pub struct SlackNotifier {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackNotifier {
    /// Create a notifier against the given API base URL.
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        info!(channel = channel, text_length = text.len(), "slack_post_starting");

        let response = self
            .client
            .post(self.api_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&PostMessage { channel, text })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body: PostMessageResponse = response.json().await.map_err(classify)?;

        if !body.ok {
            let api_error = body.error.unwrap_or_else(|| format!("http_{}", status));
            error!(channel = channel, status_code = status, error = %api_error, "slack_post_rejected");
            return Err(NotifyError::Api { error: api_error });
        }

        info!(channel = channel, status_code = status, "slack_post_complete");

        Ok(())
    }
}

fn classify(e: reqwest::Error) -> NotifyError {
    if e.is_timeout() {
        NotifyError::Timeout
    } else {
        NotifyError::Http(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let notifier = SlackNotifier::new(
            "https://slack.com/api/".to_string(),
            "xoxb-test".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            notifier.api_url("chat.postMessage"),
            "https://slack.com/api/chat.postMessage"
        );
    }

    #[test]
    fn test_post_message_serialization() {
        let json = serde_json::to_string(&PostMessage {
            channel: "C123",
            text: "*Конф*",
        })
        .unwrap();

        assert_eq!(json, r#"{"channel":"C123","text":"*Конф*"}"#);
    }

    #[test]
    fn test_response_parsing() {
        let ok: PostMessageResponse = serde_json::from_str(r#"{"ok":true,"ts":"1.2"}"#).unwrap();
        assert!(ok.ok);
        assert!(ok.error.is_none());

        let failed: PostMessageResponse =
            serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#).unwrap();
        assert!(!failed.ok);
        assert_eq!(failed.error.as_deref(), Some("channel_not_found"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let notifier = SlackNotifier::new(
            "http://127.0.0.1:9".to_string(),
            "xoxb-test".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();

        let result = notifier.send("C123", "hello").await;

        assert!(matches!(
            result,
            Err(NotifyError::Http(_)) | Err(NotifyError::Timeout)
        ));
    }
}
