// Guest Store
//
// Keyed guest records on top of a record store. Lookup returns the
// first record for an id; delete removes every record for it.

use crate::record::GuestRecord;
use crate::store::{FileBackend, LineBackend, RecordStore, Scan, StoreError};
use crate::validation::{require, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum GuestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("guest id `{0}` already exists")]
    DuplicateId(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What `add` does when the id is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePolicy {
    /// When true, a repeated id is appended anyway and later copies are
    /// shadowed by the first one on lookup.
    pub allow_duplicate_keys: bool,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self {
            allow_duplicate_keys: true,
        }
    }
}

#[derive(Debug)]
pub struct GuestStore<B = FileBackend> {
    records: RecordStore<GuestRecord, B>,
    policy: DuplicatePolicy,
}

impl<B: LineBackend> GuestStore<B> {
    pub fn new(records: RecordStore<GuestRecord, B>) -> Self {
        Self::with_policy(records, DuplicatePolicy::default())
    }

    pub fn with_policy(records: RecordStore<GuestRecord, B>, policy: DuplicatePolicy) -> Self {
        Self { records, policy }
    }

    pub fn records(&self) -> &RecordStore<GuestRecord, B> {
        &self.records
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a guest. `id` and `name` are required; `contact` may be empty.
    pub fn add(&mut self, id: &str, name: &str, contact: &str) -> Result<GuestRecord, GuestError> {
        require("id", id)?;
        require("name", name)?;

        if !self.policy.allow_duplicate_keys && self.find_by_id(id)?.is_some() {
            return Err(GuestError::DuplicateId(id.to_string()));
        }

        let guest = GuestRecord::new(id, name, contact);
        self.records.append(&guest)?;
        tracing::debug!(id, "guest added");
        Ok(guest)
    }

    /// First stored guest whose id equals `id` after trimming.
    pub fn find_by_id(&self, id: &str) -> Result<Option<GuestRecord>, StoreError> {
        let id = id.trim();
        for guest in self.records.scan()? {
            let guest = guest?;
            if guest.id == id {
                return Ok(Some(guest));
            }
        }
        Ok(None)
    }

    /// Remove every guest with this id. Returns whether any was removed.
    ///
    /// Damaged lines whose first field is the id are removed as well, since
    /// lookup can never reach them. A blank id removes nothing.
    pub fn delete_by_id(&mut self, id: &str) -> Result<bool, StoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(false);
        }
        let removed = self
            .records
            .rewrite_excluding_raw(|guest| guest.id == id, |fields| fields[0] == id)?;
        if removed > 0 {
            tracing::info!(id, removed, "guest deleted");
        }
        Ok(removed > 0)
    }

    /// Every readable guest, oldest first, duplicates included.
    pub fn all(&self) -> Result<Scan<GuestRecord, B::Lines>, StoreError> {
        self.records.scan()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.records.len()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.records.is_empty()
    }
}
