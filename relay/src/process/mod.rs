//! Webhook payload processing module.
//!
//! Turns an authenticated raw body into either a message for the channel or
//! a deliberate skip.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body → parse (typed) → status filter → render → RenderedMessage
//! ```

pub mod message;
pub mod order;
pub mod status;
pub mod ticket;

use std::fmt;

use thiserror::Error;
use tracing::info;

pub use message::RenderedMessage;
pub use order::{process_order, render_order};
pub use status::is_allowed;
pub use ticket::{process_ticket, render_ticket};

/// Which endpoint a webhook arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Ticket,
    Order,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Ticket => "ticket",
            EventKind::Order => "order",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with an authenticated event.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Paid: send this message.
    Forward(RenderedMessage),
    /// Any other status: acknowledge and do nothing.
    Filtered { status: String },
}

/// Payload shape errors. These mean the upstream schema changed under us.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("malformed payload: order has no tickets")]
    NoTickets,

    #[error("malformed payload: order total is out of range")]
    AmountOverflow,
}

/// Process an authenticated webhook body for the given endpoint.
pub fn process_event(kind: EventKind, body: &[u8]) -> Result<ProcessOutcome, ProcessError> {
    info!(kind = %kind, body_length = body.len(), "webhook_process_start");

    let outcome = match kind {
        EventKind::Ticket => process_ticket(body)?,
        EventKind::Order => process_order(body)?,
    };

    info!(
        kind = %kind,
        forwarded = matches!(outcome, ProcessOutcome::Forward(_)),
        "webhook_process_complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_event_routes_by_kind() {
        let ticket = r#"{
            "name": "A", "surname": "B", "email": "a@b.c",
            "status": "Оплачен", "status_raw": "paid",
            "price_nominal": 500, "event_name": "Конф"
        }"#
        .as_bytes();

        assert!(matches!(
            process_event(EventKind::Ticket, ticket).unwrap(),
            ProcessOutcome::Forward(_)
        ));

        // A ticket body is not an order
        assert!(matches!(
            process_event(EventKind::Order, ticket).unwrap_err(),
            ProcessError::Malformed(_)
        ));
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Ticket.to_string(), "ticket");
        assert_eq!(EventKind::Order.to_string(), "order");
    }
}
