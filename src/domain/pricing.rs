//! Nightly pricing
//!
//! Pure: the caller resolves the effective nightly rate from the room
//! (category base plus adjustment) before quoting.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, DomainResult};

/// Priced stay: number of nights and rounded total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    pub total: Decimal,
}

/// Price a stay of `[check_in, check_out)` at `nightly_rate` per night.
///
/// The total is rounded to currency precision (2 decimal places,
/// half-up). A zero-or-negative night count is an invalid range.
pub fn quote(
    nightly_rate: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> DomainResult<Quote> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(DomainError::InvalidDateRange {
            check_in,
            check_out,
        });
    }

    let total = (nightly_rate * Decimal::from(nights))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(Quote { nights, total })
}

// ── Tests ──────────────────────────────────────────────────────
