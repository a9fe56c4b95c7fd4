// Innkeep Kernel
//
// Flat-file guest and booking records for a small hotel front desk.

pub mod bookings;
pub mod config;
pub mod desk;
pub mod guests;
pub mod pricing;
pub mod record;
pub mod store;
pub mod validation;
