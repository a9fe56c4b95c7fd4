use serde::{Deserialize, Serialize};

use super::Record;

/// A registered guest: `id,name,contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: String,
    pub name: String,
    /// May be empty.
    pub contact: String,
}

impl GuestRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
        }
    }
}

impl Record for GuestRecord {
    const MIN_FIELDS: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.contact.clone()]
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        Some(Self::new(fields[0], fields[1], fields[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::decode_line;

    #[test]
    fn extra_fields_are_ignored() {
        let guest = decode_line::<GuestRecord>("G1,Alice,012,unexpected").unwrap();
        assert_eq!(guest, GuestRecord::new("G1", "Alice", "012"));
    }
}
