//! Add-slot command implementation.
//!
//! A slot is either private (one party, flat price) or group (per-guest
//! price up to a capacity); exactly one of the two pricing flags must be
//! given.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_amount, parse_date, parse_time, GlobalOptions,
};
use bookable::ids::ListingId;
use bookable::{NewSlot, PriceRule};
use clap::Args;

/// Add a bookable slot to a listing.
#[derive(Args)]
pub struct AddSlotCommand {
    /// The listing to extend
    #[arg(long, value_name = "LISTING_ID")]
    listing: i64,

    /// Slot date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: String,

    /// Start of the window (HH:MM)
    #[arg(long, value_name = "TIME")]
    start: String,

    /// End of the window (HH:MM, exclusive)
    #[arg(long, value_name = "TIME")]
    end: String,

    /// Flat price for a private slot (conflicts with --per-guest)
    #[arg(long, value_name = "AMOUNT", conflicts_with_all = ["per_guest", "capacity"])]
    price: Option<String>,

    /// Per-guest price for a group slot (requires --capacity)
    #[arg(long, value_name = "AMOUNT", requires = "capacity")]
    per_guest: Option<String>,

    /// Maximum guests for a group slot
    #[arg(long, value_name = "GUESTS", requires = "per_guest")]
    capacity: Option<u32>,
}

impl AddSlotCommand {
    /// Execute the add-slot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let price_rule = match (&self.price, &self.per_guest, self.capacity) {
            (Some(price), None, None) => PriceRule::private(parse_amount(price)?)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            (None, Some(per_guest), Some(capacity)) => {
                PriceRule::group(parse_amount(per_guest)?, capacity)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?
            }
            _ => {
                return Err(CliError::InvalidArguments(
                    "give either --price (private) or --per-guest with --capacity (group)"
                        .to_string(),
                ))
            }
        };

        let slot = NewSlot::new(
            parse_date(&self.date)?,
            parse_time(&self.start)?,
            parse_time(&self.end)?,
            price_rule,
        )
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let id = db.insert_slot(ListingId::new(self.listing), &slot)?;
        println!("Created slot {id}");
        Ok(())
    }
}
