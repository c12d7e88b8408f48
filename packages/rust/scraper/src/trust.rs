//! High-trust classification.
//!
//! A listing is high-trust iff the client's payment method is verified, the
//! hire rate meets the caller-supplied threshold, and a budget is displayed.
//! An absent field never passes — absence means "does not meet the bar",
//! not "unknown".

/// Classify a listing. Pure function of its inputs; `threshold` is 0–100.
pub fn is_high_trust(
    payment_verified: bool,
    hire_rate_percent: Option<u8>,
    budget: Option<&str>,
    threshold: u8,
) -> bool {
    payment_verified
        && hire_rate_percent.is_some_and(|rate| rate >= threshold)
        && budget.is_some()
}
