//! Add-listing command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use bookable::ids::UserId;
use clap::Args;

/// Create a listing owned by a host.
#[derive(Args)]
pub struct AddListingCommand {
    /// The owning host's user id
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// Listing title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Require host approval for every booking
    #[arg(long)]
    moderated: bool,
}

impl AddListingCommand {
    /// Execute the add-listing command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = db.insert_listing(UserId::new(self.host), &self.title, self.moderated)?;
        println!("Created listing {id}");
        if self.moderated {
            println!("  - Bookings will await host approval");
        }
        Ok(())
    }
}
