//! Typed Timepad webhook payloads.
//!
//! Two payload families arrive on separate endpoints:
//! - ticket webhooks: a flat legacy record per ticket
//! - order webhooks: a nested record per order with payment and attribution data

pub mod amount;
pub mod types;

pub use amount::Amount;
pub use types::{
    OrderEvent, OrderEventInfo, OrderPayment, OrderReferer, OrderStatus, OrderTicket,
    TicketAnswers, TicketEvent,
};
