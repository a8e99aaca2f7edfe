//! Ticket webhook processing.
//!
//! Ticket webhooks use the legacy flat payload. `status_raw` decides whether
//! the ticket is forwarded, `status` is what the channel sees.

use tracing::info;

use crate::event::TicketEvent;

use super::message::{RenderedMessage, RUBLE};
use super::status::is_allowed;
use super::{ProcessError, ProcessOutcome};

/// Parse a ticket body and render it if the ticket is paid.
pub fn process_ticket(body: &[u8]) -> Result<ProcessOutcome, ProcessError> {
    let event: TicketEvent = serde_json::from_slice(body)?;

    info!(
        event_name = %event.event_name,
        status_raw = %event.status_raw,
        "ticket_process_start"
    );

    if !is_allowed(&event.status_raw) {
        info!(status_raw = %event.status_raw, "ticket_status_filtered");
        return Ok(ProcessOutcome::Filtered {
            status: event.status_raw,
        });
    }

    let message = render_ticket(&event);

    info!(lines = message.lines().len(), "ticket_process_complete");

    Ok(ProcessOutcome::Forward(message))
}

/// Render a ticket as: header, price, attendee, status.
pub fn render_ticket(event: &TicketEvent) -> RenderedMessage {
    let mut message = RenderedMessage::new();
    message.push(format!("*{}*", event.event_name));
    message.push(format!(":moneybag: {}{}", event.price_nominal, RUBLE));
    message.push(format!(
        ":bust_in_silhouette: {} {} ({})",
        event.name, event.surname, event.email
    ));
    message.push(format!("Статус: {}", event.status));
    message
}
