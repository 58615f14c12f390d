//! Book command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use bookable::engine::{create_booking, BookingRequest};
use bookable::ids::{SlotId, UserId};
use chrono::Utc;
use clap::Args;

/// Book seats on a slot.
#[derive(Args)]
pub struct BookCommand {
    /// The slot to book
    #[arg(long, value_name = "SLOT_ID")]
    slot: i64,

    /// The guest making the booking
    #[arg(long, value_name = "USER_ID")]
    user: i64,

    /// Party size
    #[arg(long, value_name = "GUESTS", default_value = "1")]
    guests: u32,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let booking = create_booking(
            &mut db,
            &BookingRequest {
                slot_id: SlotId::new(self.slot),
                user_id: UserId::new(self.user),
                guests: self.guests,
            },
            Utc::now(),
        )?;

        // id is always present after a successful insert
        let id = booking
            .id()
            .ok_or_else(|| CliError::SemanticFailure("booking has no id".to_string()))?;
        println!(
            "Created booking {id}: {} guest(s), total {}, status {}",
            booking.guests(),
            booking.total_price(),
            booking.status()
        );
        Ok(())
    }
}
