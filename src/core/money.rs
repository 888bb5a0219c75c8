//! Currency arithmetic rules for fiscal amounts.
//!
//! All amounts are BRL and computed with `rust_decimal` — internal
//! accumulation is never rounded. Rounding to the 2-decimal display
//! scale happens only at the output boundary, using half-up rounding
//! as fiscal documents require (not banker's rounding).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by every currency field on the wire
pub const DISPLAY_SCALE: u32 = 2;

/// Round a currency amount for presentation or storage.
///
/// Half-up: 0.005 rounds to 0.01, -0.005 rounds to -0.01. The result
/// always carries exactly two decimal places so serialized amounts
/// read "70.00" rather than "70".
pub fn round_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Apply a percentage rate to a base amount: `base * rate / 100`.
pub fn apply_rate(base: Decimal, rate_pct: Decimal) -> Decimal {
    base * rate_pct / Decimal::ONE_HUNDRED
}
