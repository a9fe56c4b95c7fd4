// Front Desk
//
// Joins the guest and booking stores for the search action:
// guest lookup → booking history.

use std::path::Path;

use serde::Serialize;

use crate::bookings::BookingStore;
use crate::config::LedgerConfig;
use crate::guests::GuestStore;
use crate::record::{BookingRecord, GuestRecord};
use crate::store::{FileBackend, LineBackend, RecordStore, StoreError};
use crate::validation::{require, ValidationError};

/// A guest together with every booking made under their id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestHistory {
    pub guest: GuestRecord,
    /// Oldest first. Empty when the guest never booked.
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct FrontDesk<B = FileBackend> {
    guests: GuestStore<B>,
    bookings: BookingStore<B>,
}

impl FrontDesk<FileBackend> {
    /// File-backed desk. Relative paths in `config` resolve against `base_dir`.
    pub fn open(config: &LedgerConfig, base_dir: Option<&Path>) -> Self {
        let config = match base_dir {
            Some(base) => config.clone().rooted_at(base),
            None => config.clone(),
        };

        tracing::debug!(
            guests = %config.guest_file.display(),
            bookings = %config.booking_file.display(),
            "opening stores"
        );

        Self::new(
            GuestStore::with_policy(
                RecordStore::open(&config.guest_file),
                config.duplicate_policy(),
            ),
            BookingStore::with_calculator(
                RecordStore::open(&config.booking_file),
                config.calculator(),
            ),
        )
    }
}

impl<B: LineBackend> FrontDesk<B> {
    pub fn new(guests: GuestStore<B>, bookings: BookingStore<B>) -> Self {
        Self { guests, bookings }
    }

    pub fn guests(&self) -> &GuestStore<B> {
        &self.guests
    }

    pub fn guests_mut(&mut self) -> &mut GuestStore<B> {
        &mut self.guests
    }

    pub fn bookings(&self) -> &BookingStore<B> {
        &self.bookings
    }

    pub fn bookings_mut(&mut self) -> &mut BookingStore<B> {
        &mut self.bookings
    }

    /// Look up a guest and collect their bookings.
    ///
    /// Returns `None` when no guest has this id, even if bookings
    /// reference it.
    pub fn guest_history(&self, id: &str) -> Result<Option<GuestHistory>, DeskError> {
        let id = id.trim();
        require("id", id)?;

        let Some(guest) = self.guests.find_by_id(id)? else {
            return Ok(None);
        };

        let bookings = self
            .bookings
            .find_all_by_guest(id)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(GuestHistory { guest, bookings }))
    }
}
