//! Status filter shared by both webhook families.

/// Status codes that mean the money has arrived.
///
/// `paid_ur` is the legal-entity (invoice) variant of `paid`.
pub const ALLOWED_STATUSES: [&str; 2] = ["paid", "paid_ur"];

/// Whether an event with this machine status code should be forwarded.
pub fn is_allowed(status: &str) -> bool {
    ALLOWED_STATUSES.contains(&status)
}
