//! Web server module for handling inbound webhooks.
//!
//! Every webhook request goes through the same steps:
//! - Verify `X-Hub-Signature` against the raw body
//! - Parse, filter and render the event
//! - Hand the text to the notifier, ignoring delivery failures
//! - Return `200 OK`

pub mod error;
pub mod handlers;
pub mod signature;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::{MessageResponse, WebhookError};
pub use handlers::{health, order_webhook, ticket_webhook, AppState, HealthResponse};
pub use signature::{expected_signature, verify_hub_signature, SIGNATURE_HEADER};

/// Build the application router. Webhook paths come from configuration.
pub fn router(state: AppState) -> Router {
    let ticket_path = state.config.ticket_webhook_path.clone();
    let order_path = state.config.order_webhook_path.clone();

    Router::new()
        .route("/health", get(health))
        .route(&ticket_path, post(ticket_webhook))
        .route(&order_path, post(order_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
