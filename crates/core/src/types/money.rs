//! Money formatting and discount arithmetic.
//!
//! Prices in the catalog are stored as plain decimal amounts in USD; the
//! helpers here keep formatting and the discount rule in one place.

use rust_decimal::Decimal;

/// Format a decimal amount as a USD display string (e.g. `$1,299.00` without
/// the thousands separator: `$1299.00`).
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Apply a percentage discount to a price.
///
/// `discount_pct` is a whole-number percentage (e.g. `30` for 30% off).
/// Values outside 0..=100 are clamped. The result is rounded to cents.
#[must_use]
pub fn apply_discount(price: Decimal, discount_pct: i64) -> Decimal {
    let pct = discount_pct.clamp(0, 100);
    let factor = Decimal::from(100 - pct) / Decimal::from(100);
    (price * factor).round_dp(2)
}
