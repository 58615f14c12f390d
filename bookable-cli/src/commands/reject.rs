//! Reject command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use bookable::engine::reject_booking;
use bookable::ids::{BookingId, UserId};
use clap::Args;

/// Reject a pending booking.
#[derive(Args)]
pub struct RejectCommand {
    /// The booking to reject
    #[arg(value_name = "BOOKING_ID")]
    booking: i64,

    /// The deciding host's user id
    #[arg(long, value_name = "USER_ID")]
    host: i64,
}

impl RejectCommand {
    /// Execute the reject command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let booking = reject_booking(
            &mut db,
            BookingId::new(self.booking),
            UserId::new(self.host),
        )?;
        println!("Booking {} is now {}", self.booking, booking.status());
        Ok(())
    }
}
