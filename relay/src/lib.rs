//! Timepad → Slack webhook relay.
//!
//! Receives signed ticket and order webhooks from Timepad, keeps the paid
//! ones, and posts a short summary of each to a Slack channel.
//!
//! ## Architecture
//!
//! ```text
//! Timepad → web (verify signature) → process (parse, filter, render) → notify → Slack
//! ```

pub mod config;
pub mod event;
pub mod logging;
pub mod notify;
pub mod process;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use event::{Amount, OrderEvent, TicketEvent};
pub use notify::{Notifier, NotifyError, SlackNotifier};
pub use process::{process_event, EventKind, ProcessError, ProcessOutcome, RenderedMessage};
pub use web::{router, AppState, WebhookError};
