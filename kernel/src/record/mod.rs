// Record Encoding
//
// Fixed-shape text records stored one per line, fields joined by a
// single delimiter. No escaping is performed: a field containing the
// delimiter shifts every following field of that line.

pub mod booking;
pub mod guest;

pub use booking::{BookingRecord, PaymentMethod};
pub use guest::GuestRecord;

/// Field delimiter used on disk.
pub const DELIMITER: char = ',';

/// A value that can be stored as one delimited line.
pub trait Record: Sized {
    /// Lines with fewer fields than this are treated as malformed.
    const MIN_FIELDS: usize;

    /// Fields in on-disk order.
    fn to_fields(&self) -> Vec<String>;

    /// Build a record from split fields.
    ///
    /// Callers guarantee `fields.len() >= Self::MIN_FIELDS`.
    /// Returns `None` when a typed field does not parse.
    fn from_fields(fields: &[&str]) -> Option<Self>;
}

/// Serialize a record into a single line (without the line terminator).
pub fn encode_line<T: Record>(record: &T) -> String {
    let fields = record.to_fields();
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        line.push_str(field);
    }
    line
}

/// Split a stored line into raw fields.
///
/// Empty trailing fields are kept, so `G1,Alice,` yields three fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.split(DELIMITER).collect()
}

/// Decode one stored line.
pub fn decode_line<T: Record>(line: &str) -> Option<T> {
    let fields = split_fields(line);
    if fields.len() < T::MIN_FIELDS {
        return None;
    }
    T::from_fields(&fields)
}
