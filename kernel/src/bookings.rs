// Booking Store
//
// Append-only booking history. Bookings are never updated or removed,
// and nothing checks that the guest id exists in the guest store.

use crate::pricing::BookingCalculator;
use crate::record::{BookingRecord, PaymentMethod};
use crate::store::{FileBackend, LineBackend, RecordStore, StoreError};
use crate::validation::{parse_count, require, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw input of a confirm-booking action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRequest {
    pub guest_id: String,
    pub room: String,
    /// Unparsed; must hold an integer.
    pub nights: String,
    pub date: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug)]
pub struct BookingStore<B = FileBackend> {
    records: RecordStore<BookingRecord, B>,
    calculator: BookingCalculator,
}

impl<B: LineBackend> BookingStore<B> {
    pub fn new(records: RecordStore<BookingRecord, B>) -> Self {
        Self::with_calculator(records, BookingCalculator::default())
    }

    pub fn with_calculator(records: RecordStore<BookingRecord, B>, calculator: BookingCalculator) -> Self {
        Self { records, calculator }
    }

    pub fn records(&self) -> &RecordStore<BookingRecord, B> {
        &self.records
    }

    pub fn calculator(&self) -> &BookingCalculator {
        &self.calculator
    }

    /// Validate, price, and append a booking.
    ///
    /// Zero or negative nights are accepted and priced as such.
    pub fn confirm(&mut self, request: &BookingRequest) -> Result<BookingRecord, BookingError> {
        require("guest id", &request.guest_id)?;
        require("room", &request.room)?;
        let nights = parse_count("nights", &request.nights)?;
        require("date", &request.date)?;

        let booking = BookingRecord {
            guest_id: request.guest_id.clone(),
            room: request.room.clone(),
            nights,
            total: self.calculator.compute_total(nights),
            payment_method: request.payment_method,
            date: request.date.clone(),
        };

        self.records.append(&booking)?;
        tracing::debug!(guest_id = %booking.guest_id, room = %booking.room, nights, "booking confirmed");
        Ok(booking)
    }

    /// Lazily yield this guest's bookings, oldest first.
    pub fn find_all_by_guest<'a>(
        &'a self,
        guest_id: &'a str,
    ) -> Result<impl Iterator<Item = Result<BookingRecord, StoreError>> + 'a, StoreError> {
        let guest_id = guest_id.trim();
        let scan = self.records.scan()?;
        Ok(scan.filter(move |booking| match booking {
            Ok(booking) => booking.guest_id == guest_id,
            Err(_) => true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use rust_decimal::Decimal;

    fn store() -> BookingStore<MemoryBackend> {
        BookingStore::new(RecordStore::with_backend(MemoryBackend::new()))
    }

    fn request(guest_id: &str, room: &str, nights: &str, date: &str) -> BookingRequest {
        BookingRequest {
            guest_id: guest_id.into(),
            room: room.into(),
            nights: nights.into(),
            date: date.into(),
            payment_method: PaymentMethod::Cash,
        }
    }

    fn history(store: &BookingStore<MemoryBackend>, guest_id: &str) -> Vec<BookingRecord> {
        store
            .find_all_by_guest(guest_id)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn confirm_prices_and_persists() {
        let mut bookings = store();
        let booking = bookings
            .confirm(&request("G1", "101", "2", "01/01/2025"))
            .unwrap();

        assert_eq!(booking.total, Decimal::new(20000, 2));
        assert_eq!(booking.payment_method, PaymentMethod::Cash);
        assert_eq!(history(&bookings, "G1"), vec![booking]);
        assert_eq!(
            bookings.records().backend().lines(),
            &["G1,101,2,200.00,Cash,01/01/2025"]
        );
    }

    #[test]
    fn history_keeps_confirmation_order_and_filters_other_guests() {
        let mut bookings = store();
        let first = bookings.confirm(&request("G1", "101", "1", "01/01/2025")).unwrap();
        bookings.confirm(&request("G2", "202", "3", "02/01/2025")).unwrap();
        let second = bookings.confirm(&request("G1", "103", "4", "05/01/2025")).unwrap();

        assert_eq!(history(&bookings, "G1"), vec![first, second]);
        assert_eq!(history(&bookings, "G2").len(), 1);
        assert!(history(&bookings, "G3").is_empty());
    }

    #[test]
    fn non_numeric_nights_is_rejected() {
        let mut bookings = store();
        let err = bookings
            .confirm(&request("G1", "101", "two", "01/01/2025"))
            .unwrap_err();

        assert!(matches!(
            err,
            BookingError::Validation(ValidationError::NotANumber { field: "nights", .. })
        ));
        assert!(bookings.records().backend().lines().is_empty());
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut bookings = store();

        for (req, field) in [
            (request("", "101", "1", "d"), "guest id"),
            (request("G1", "", "1", "d"), "room"),
            (request("G1", "101", "", "d"), "nights"),
            (request("G1", "101", "1", ""), "date"),
        ] {
            let err = bookings.confirm(&req).unwrap_err();
            match err {
                BookingError::Validation(ValidationError::MissingField { field: f }) => {
                    assert_eq!(f, field)
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(bookings.records().len().unwrap(), 0);
    }

    #[test]
    fn zero_and_negative_nights_are_accepted() {
        let mut bookings = store();

        let zero = bookings.confirm(&request("G1", "101", "0", "d")).unwrap();
        let negative = bookings.confirm(&request("G1", "101", "-1", "d")).unwrap();

        assert_eq!(zero.total, Decimal::ZERO);
        assert_eq!(negative.total, Decimal::new(-100, 0));
    }

    #[test]
    fn unknown_guest_ids_are_not_checked() {
        let mut bookings = store();
        assert!(bookings.confirm(&request("ghost", "1", "1", "d")).is_ok());
    }

    #[test]
    fn custom_rate_is_applied() {
        let mut bookings = BookingStore::with_calculator(
            RecordStore::with_backend(MemoryBackend::new()),
            BookingCalculator::new(Decimal::new(15000, 2)),
        );
        let booking = bookings.confirm(&request("G1", "101", "2", "d")).unwrap();
        assert_eq!(booking.total.to_string(), "300.00");
    }

    #[test]
    fn legacy_lines_show_up_in_history() {
        let bookings = BookingStore::new(RecordStore::with_backend(MemoryBackend::with_lines([
            "G1,101,2,200.0,Card",
            "G1,oops",
            "G1,102,1,100.0,Cash,03/03/2024",
        ])));

        let found = history(&bookings, "G1");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, "");
        assert_eq!(found[1].date, "03/03/2024");
    }
}
