use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use innkeep_kernel::bookings::BookingRequest;
use innkeep_kernel::desk::{FrontDesk, GuestHistory};
use innkeep_kernel::record::{BookingRecord, GuestRecord, PaymentMethod};
use innkeep_kernel::store::LineBackend;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage guests
    Guest {
        #[command(subcommand)]
        action: GuestCommand,
    },

    /// Confirm a new booking
    Book {
        guest_id: String,
        room: String,
        /// Number of nights (whole number)
        nights: String,
        /// Date of stay, DD/MM/YYYY
        date: String,
        /// cash or card
        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,
    },

    /// Show a guest and their booking history
    History { id: String },

    /// Interactive session reading commands from stdin
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum GuestCommand {
    /// Register a guest
    Add {
        id: String,
        name: String,
        #[arg(default_value = "")]
        contact: String,
    },

    /// Look up a guest by id
    Find { id: String },

    /// Delete every guest record with this id
    Delete { id: String },

    /// List all guests in file order
    List,
}

/// Result of one command, rendered as text or JSON.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    GuestAdded { guest: GuestRecord },
    GuestFound { id: String, guest: Option<GuestRecord> },
    GuestDeleted { id: String, deleted: bool },
    Guests { guests: Vec<GuestRecord> },
    BookingConfirmed { booking: BookingRecord },
    History { id: String, history: Option<GuestHistory> },
}

/// Run a single command against the desk.
///
/// `Shell` is handled by the caller.
pub fn execute<B: LineBackend>(desk: &mut FrontDesk<B>, command: Command) -> Result<Outcome> {
    let outcome = match command {
        Command::Guest { action } => match action {
            GuestCommand::Add { id, name, contact } => {
                let guest = desk.guests_mut().add(&id, &name, &contact)?;
                Outcome::GuestAdded { guest }
            }
            GuestCommand::Find { id } => {
                let guest = desk.guests().find_by_id(&id)?;
                Outcome::GuestFound { id, guest }
            }
            GuestCommand::Delete { id } => {
                let deleted = desk.guests_mut().delete_by_id(&id)?;
                Outcome::GuestDeleted { id, deleted }
            }
            GuestCommand::List => {
                let guests = desk.guests().all()?.collect::<Result<Vec<_>, _>>()?;
                Outcome::Guests { guests }
            }
        },
        Command::Book {
            guest_id,
            room,
            nights,
            date,
            payment,
        } => {
            let booking = desk.bookings_mut().confirm(&BookingRequest {
                guest_id,
                room,
                nights,
                date,
                payment_method: payment,
            })?;
            Outcome::BookingConfirmed { booking }
        }
        Command::History { id } => {
            let history = desk.guest_history(&id)?;
            Outcome::History { id, history }
        }
        Command::Shell => anyhow::bail!("shell cannot be nested"),
    };

    Ok(outcome)
}
