// Booking Pricing
//
// A single flat nightly rate; no per-room or per-date variation.

use rust_decimal::Decimal;

/// Built-in nightly rate, 100.00.
pub const DEFAULT_NIGHTLY_RATE: Decimal = Decimal::from_parts(10000, 0, 0, false, 2);

/// `nights * nightly_rate`. Negative nights give a negative total.
pub fn compute_total(nights: i64, nightly_rate: Decimal) -> Decimal {
    Decimal::from(nights) * nightly_rate
}

/// Prices bookings at a fixed nightly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCalculator {
    nightly_rate: Decimal,
}

impl BookingCalculator {
    pub fn new(nightly_rate: Decimal) -> Self {
        Self { nightly_rate }
    }

    pub fn nightly_rate(&self) -> Decimal {
        self.nightly_rate
    }

    pub fn compute_total(&self, nights: i64) -> Decimal {
        compute_total(nights, self.nightly_rate)
    }
}

impl Default for BookingCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_NIGHTLY_RATE)
    }
}
