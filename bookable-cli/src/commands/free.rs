//! Free command implementation.
//!
//! Checks whether a host's calendar is free over a window. Exits 0 when
//! the window is free and 1 when something occupies it, so the command
//! can be used in shell conditionals.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_instant, GlobalOptions};
use bookable::engine::is_time_slot_free;
use bookable::ids::UserId;
use clap::Args;

/// Check whether a host's time window is free.
#[derive(Args)]
pub struct FreeCommand {
    /// The host whose calendar to check
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// Window start instant (RFC 3339)
    #[arg(long, value_name = "INSTANT")]
    start: String,

    /// Window end instant (RFC 3339, exclusive)
    #[arg(long, value_name = "INSTANT")]
    end: String,
}

impl FreeCommand {
    /// Execute the free command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let free = is_time_slot_free(
            db.connection(),
            UserId::new(self.host),
            parse_instant(&self.start)?,
            parse_instant(&self.end)?,
        )?;

        if free {
            println!("free");
            Ok(())
        } else {
            Err(CliError::SemanticFailure("busy".to_string()))
        }
    }
}
