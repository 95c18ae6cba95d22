//! Price and capacity text parsing.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a price in dollars into integer cents.
///
/// Half-cents round away from zero. Returns `None` for text that is not a
/// plain decimal number, and for amounts that round to zero cents or less.
#[must_use]
pub fn parse_price_cents(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let dollars = Decimal::from_str(trimmed).ok()?;
    let cents = dollars
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()?;
    (cents > 0).then_some(cents)
}

/// Renders cents back into the text a user would type, e.g. `2000 -> "20"`,
/// `1250 -> "12.5"`.
#[must_use]
pub fn cents_to_price_text(cents: i64) -> String {
    Decimal::new(cents, 2).normalize().to_string()
}

/// Parses a capacity. `None` for anything that is not a whole number above zero.
#[must_use]
pub fn parse_capacity(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
