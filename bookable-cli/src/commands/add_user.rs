//! Add-user command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;

/// Register a user.
#[derive(Args)]
pub struct AddUserCommand {
    /// Display name of the user
    #[arg(value_name = "NAME")]
    name: String,
}

impl AddUserCommand {
    /// Execute the add-user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let id = db.insert_user(&self.name)?;
        println!("Created user {id}");
        Ok(())
    }
}
