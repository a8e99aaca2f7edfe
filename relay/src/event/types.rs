//! Payload types for the two Timepad webhook families.
//!
//! Required fields are plain types so a missing or mistyped key fails
//! deserialization; optional sections are `Option` and tolerate `null`.

use serde::Deserialize;

use super::amount::Amount;

// =============================================================================
// Ticket Webhook (legacy flat shape)
// =============================================================================

/// A single ticket's payment status change.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketEvent {
    /// Attendee first name
    pub name: String,
    /// Attendee last name
    pub surname: String,
    /// Attendee email
    pub email: String,
    /// Human-readable status label (e.g. "Оплачен")
    pub status: String,
    /// Machine status code (e.g. "paid")
    pub status_raw: String,
    /// Nominal ticket price in rubles
    pub price_nominal: Amount,
    /// Event title
    pub event_name: String,
}

// =============================================================================
// Order Webhook (nested shape)
// =============================================================================

/// A whole order, possibly covering several tickets.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEvent {
    pub event: OrderEventInfo,
    pub payment: OrderPayment,
    pub tickets: Vec<OrderTicket>,
    pub status: OrderStatus,
    /// Applied promo codes; absent, `null` and `[]` are all "none"
    #[serde(default)]
    pub promocodes: Option<Vec<String>>,
    /// Marketing attribution, present only for tracked purchases
    #[serde(default)]
    pub referer: Option<OrderReferer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEventInfo {
    pub name: String,
}

/// Payment totals. `amount` is what was charged, after `discount`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPayment {
    pub amount: Amount,
    pub discount: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderTicket {
    pub answers: TicketAnswers,
}

/// Registration form answers attached to a ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketAnswers {
    pub name: String,
    pub surname: String,
    pub mail: String,
}

/// Order status: `name` is the machine code, `title` the display label.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatus {
    pub name: String,
    pub title: String,
}

/// UTM-style attribution triple.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReferer {
    pub campaign: String,
    pub medium: String,
    pub source: String,
}

impl OrderEvent {
    /// Answers of the first ticket; the only identity an order is shown with.
    pub fn first_answers(&self) -> Option<&TicketAnswers> {
        self.tickets.first().map(|t| &t.answers)
    }

    /// Promo codes, treating an empty list the same as a missing one.
    pub fn promocodes(&self) -> Option<&[String]> {
        self.promocodes.as_deref().filter(|codes| !codes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_event_parses_legacy_shape() {
        let body = json!({
            "id": 77,
            "name": "Ivan",
            "surname": "Petrov",
            "email": "ivan@example.com",
            "status": "Оплачен",
            "status_raw": "paid",
            "price_nominal": "1500.00",
            "event_name": "Rust Meetup"
        });

        let event: TicketEvent = serde_json::from_value(body).unwrap();

        assert_eq!(event.status_raw, "paid");
        assert_eq!(event.price_nominal, Amount::from_rubles(1500));
    }

    #[test]
    fn test_ticket_event_missing_field_fails() {
        let body = json!({
            "name": "Ivan",
            "surname": "Petrov",
            "status": "Оплачен",
            "status_raw": "paid",
            "price_nominal": 1500,
            "event_name": "Rust Meetup"
        });

        let err = serde_json::from_value::<TicketEvent>(body).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_order_event_optional_sections() {
        let body = json!({
            "event": {"id": 1, "name": "Conf"},
            "payment": {"amount": 900, "discount": 0},
            "tickets": [{"answers": {"name": "A", "surname": "B", "mail": "a@b.c"}}],
            "status": {"name": "paid", "title": "оплачен"},
            "promocodes": null,
            "referer": null
        });

        let order: OrderEvent = serde_json::from_value(body).unwrap();

        assert!(order.promocodes().is_none());
        assert!(order.referer.is_none());
        assert_eq!(order.first_answers().unwrap().mail, "a@b.c");
    }

    #[test]
    fn test_order_event_empty_promocodes_is_none() {
        let body = json!({
            "event": {"name": "Conf"},
            "payment": {"amount": 900, "discount": 0},
            "tickets": [{"answers": {"name": "A", "surname": "B", "mail": "a@b.c"}}],
            "status": {"name": "paid", "title": "оплачен"},
            "promocodes": []
        });

        let order: OrderEvent = serde_json::from_value(body).unwrap();

        assert!(order.promocodes().is_none());
    }

    #[test]
    fn test_order_event_missing_nested_key_fails() {
        let body = json!({
            "event": {"name": "Conf"},
            "payment": {"amount": 900},
            "tickets": [{"answers": {"name": "A", "surname": "B", "mail": "a@b.c"}}],
            "status": {"name": "paid", "title": "оплачен"}
        });

        let err = serde_json::from_value::<OrderEvent>(body).unwrap_err();
        assert!(err.to_string().contains("discount"));
    }
}
