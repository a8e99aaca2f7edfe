//! Order webhook processing.
//!
//! Orders carry nested payment, ticket and attribution data. `status.name`
//! decides whether the order is forwarded, `status.title` is displayed.

use tracing::info;

use crate::event::{OrderEvent, OrderPayment};

use super::message::{RenderedMessage, RUBLE};
use super::status::is_allowed;
use super::{ProcessError, ProcessOutcome};

/// Parse an order body and render it if the order is paid.
pub fn process_order(body: &[u8]) -> Result<ProcessOutcome, ProcessError> {
    let order: OrderEvent = serde_json::from_slice(body)?;

    info!(
        event_name = %order.event.name,
        status = %order.status.name,
        tickets = order.tickets.len(),
        has_promocodes = order.promocodes().is_some(),
        has_referer = order.referer.is_some(),
        "order_process_start"
    );

    if !is_allowed(&order.status.name) {
        info!(status = %order.status.name, "order_status_filtered");
        return Ok(ProcessOutcome::Filtered {
            status: order.status.name,
        });
    }

    let message = render_order(&order)?;

    info!(lines = message.lines().len(), "order_process_complete");

    Ok(ProcessOutcome::Forward(message))
}

/// Render an order as: header, attendee, price, status, promo codes, attribution.
///
/// Only the first ticket's answers are shown, however many tickets the order has.
pub fn render_order(order: &OrderEvent) -> Result<RenderedMessage, ProcessError> {
    let answers = order.first_answers().ok_or(ProcessError::NoTickets)?;

    let mut message = RenderedMessage::new();
    message.push(format!("*{}*", order.event.name));
    message.push(format!(
        ":bust_in_silhouette: {} {} ({})",
        answers.name, answers.surname, answers.mail
    ));
    message.push(format!(":moneybag: {}", format_price(&order.payment)?));
    message.push(format!("Статус: {}", order.status.title));

    if let Some(codes) = order.promocodes() {
        message.push(format!("Промокоды: {}", codes.join(", ")));
    }

    if let Some(referer) = &order.referer {
        message.push(format!("_utm_campaign: {}_", referer.campaign));
        message.push(format!("_utm_medium: {}_", referer.medium));
        message.push(format!("_utm_source: {}_", referer.source));
    }

    Ok(message)
}

/// `900₽`, or `900₽ (1000₽ - 100₽)` when a discount was applied.
pub fn format_price(payment: &OrderPayment) -> Result<String, ProcessError> {
    if payment.discount.is_zero() {
        return Ok(format!("{}{}", payment.amount, RUBLE));
    }

    let full = payment
        .amount
        .checked_add(payment.discount)
        .ok_or(ProcessError::AmountOverflow)?;

    Ok(format!(
        "{amount}{r} ({full}{r} - {discount}{r})",
        amount = payment.amount,
        full = full,
        discount = payment.discount,
        r = RUBLE,
    ))
}
