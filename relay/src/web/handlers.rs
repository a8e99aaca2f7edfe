//! Webhook endpoint handlers.
//!
//! Both endpoints share one pipeline and differ only in the [`EventKind`]
//! used to parse the body. The body is taken as raw bytes so the signature is
//! computed over exactly what is parsed.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::notify::Notifier;
use crate::process::{process_event, EventKind, ProcessOutcome};
use crate::web::error::WebhookError;
use crate::web::signature::{verify_hub_signature, SIGNATURE_HEADER};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Timepad Webhooks
// =============================================================================

/// Ticket webhook endpoint.
pub async fn ticket_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookError> {
    handle_webhook(&state, EventKind::Ticket, &headers, &body).await
}

/// Order webhook endpoint.
pub async fn order_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookError> {
    handle_webhook(&state, EventKind::Order, &headers, &body).await
}

/// Run one webhook through verification, processing and delivery.
///
/// Once the signature checks out the caller always gets `200 OK` unless the
/// body is malformed; delivery failures are logged and dropped.
async fn handle_webhook(
    state: &AppState,
    kind: EventKind,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(StatusCode, &'static str), WebhookError> {
    debug!(
        kind = %kind,
        headers = ?headers,
        body = %String::from_utf8_lossy(body),
        "webhook_request"
    );

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    info!(
        kind = %kind,
        body_length = body.len(),
        has_signature = signature.is_some(),
        "webhook_received"
    );

    if !verify_hub_signature(&state.config.signature_secret, body, signature) {
        warn!(kind = %kind, "webhook_signature_invalid");
        return Err(WebhookError::Unauthorized);
    }

    let outcome = process_event(kind, body).map_err(|e| {
        error!(kind = %kind, error = %e, "webhook_payload_malformed");
        WebhookError::from(e)
    })?;

    let message = match outcome {
        ProcessOutcome::Forward(message) => message,
        ProcessOutcome::Filtered { status } => {
            info!(kind = %kind, status = %status, "webhook_skipped");
            return Ok((StatusCode::OK, "OK"));
        }
    };

    let channel = &state.config.slack_channel_id;
    if let Err(e) = state.notifier.send(channel, &message.into_text()).await {
        error!(kind = %kind, channel = %channel, error = %e, "webhook_notify_failed");
    } else {
        info!(kind = %kind, channel = %channel, "webhook_notified");
    }

    Ok((StatusCode::OK, "OK"))
}
