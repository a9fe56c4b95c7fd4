use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Record;

/// How a booking was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("cash") {
            Ok(PaymentMethod::Cash)
        } else if s.eq_ignore_ascii_case("card") {
            Ok(PaymentMethod::Card)
        } else {
            Err(UnknownPaymentMethod(s.to_string()))
        }
    }
}

/// A confirmed booking:
/// `guestId,room,nights,total,paymentMethod,date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Not checked against the guest file.
    pub guest_id: String,
    pub room: String,
    pub nights: i64,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    /// Free-form, usually DD/MM/YYYY. Empty for legacy five-field lines.
    pub date: String,
}

impl Record for BookingRecord {
    // Older lines were written without the trailing date.
    const MIN_FIELDS: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.guest_id.clone(),
            self.room.clone(),
            self.nights.to_string(),
            self.total.to_string(),
            self.payment_method.to_string(),
            self.date.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        Some(Self {
            guest_id: fields[0].to_string(),
            room: fields[1].to_string(),
            nights: fields[2].trim().parse().ok()?,
            total: Decimal::from_str(fields[3].trim()).ok()?,
            payment_method: fields[4].trim().parse().ok()?,
            date: fields.get(5).map(|d| d.to_string()).unwrap_or_default(),
        })
    }
}
