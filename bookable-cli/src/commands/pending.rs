//! Pending command implementation.

use crate::commands::bookings::{print_bookings, OutputFormat};
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use bookable::engine::list_pending_bookings_for_host;
use bookable::ids::UserId;
use clap::Args;

/// List pending bookings awaiting a host's decision.
#[derive(Args)]
pub struct PendingCommand {
    /// The host whose pending bookings to list
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "BOOKABLE_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

impl PendingCommand {
    /// Execute the pending command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let pending = list_pending_bookings_for_host(&db, UserId::new(self.host))?;
        print_bookings(&pending, self.format)
    }
}
