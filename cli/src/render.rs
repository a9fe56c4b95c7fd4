// Text rendering for command outcomes.

use innkeep_kernel::desk::GuestHistory;
use innkeep_kernel::record::{BookingRecord, GuestRecord};

use crate::commands::Outcome;

pub fn text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::GuestAdded { guest } => format!("Success: Guest {} added.", guest.name),
        Outcome::GuestFound { guest: Some(guest), .. } => guest_block(guest),
        Outcome::GuestFound { guest: None, .. } => "Guest ID not found.".to_string(),
        Outcome::GuestDeleted { id, deleted: true } => format!("Guest {id} deleted successfully."),
        Outcome::GuestDeleted { deleted: false, .. } => "Guest ID not found to delete.".to_string(),
        Outcome::Guests { guests } if guests.is_empty() => "No guests registered.".to_string(),
        Outcome::Guests { guests } => guests
            .iter()
            .map(|g| format!("{:<10} {:<24} {}", g.id, g.name, g.contact))
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::BookingConfirmed { booking } => receipt(booking),
        Outcome::History { history: Some(history), .. } => history_block(history),
        Outcome::History { history: None, .. } => "Guest ID not found.".to_string(),
    }
}

fn guest_block(guest: &GuestRecord) -> String {
    format!(
        "--- GUEST FOUND ---\nName:    {}\nContact: {}",
        guest.name, guest.contact
    )
}

fn history_block(history: &GuestHistory) -> String {
    let mut out = guest_block(&history.guest);
    out.push_str("\n\n--- BOOKING HISTORY ---");

    if history.bookings.is_empty() {
        out.push_str("\nNo previous bookings found.");
    }
    for booking in &history.bookings {
        let date = if booking.date.is_empty() {
            "N/A"
        } else {
            booking.date.as_str()
        };
        out.push_str(&format!(
            "\nDate: {} | Room: {} | {} Nights | Paid: {}",
            date, booking.room, booking.nights, booking.payment_method
        ));
    }
    out
}

fn receipt(booking: &BookingRecord) -> String {
    format!(
        "--- BOOKING CONFIRMED ---\n\
         Guest ID : {}\n\
         Date     : {}\n\
         Room No  : {}\n\
         Duration : {} Nights\n\
         Payment  : {}\n\
         TOTAL    : RM {:.2}\n\
         -------------------------",
        booking.guest_id,
        booking.date,
        booking.room,
        booking.nights,
        booking.payment_method,
        booking.total
    )
}
