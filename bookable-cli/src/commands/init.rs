//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the bookable data directory and database.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use bookable::database::default_data_dir;
use bookable::{Database, DatabaseConfig};
use clap::Parser;
use std::path::PathBuf;

/// Initialize the bookable data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the bookable data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Overwrite an existing database
    #[arg(long)]
    overwrite: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: this command ignores --disable-autoinit (initializing is the
    /// whole point). The --data-dir flag here means "where to create",
    /// not "where to find".
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > default
        let data_dir = match self.data_dir.or_else(|| global.data_dir.clone()) {
            Some(dir) => dir,
            None => default_data_dir().map_err(|e| CliError::Config(e.to_string()))?,
        };

        let db_path = data_dir.join("bookable.db");
        let existed = db_path.exists();
        if existed {
            if !self.overwrite {
                return Err(CliError::InvalidArguments(format!(
                    "database already exists (use --overwrite to replace): {}",
                    db_path.display()
                )));
            }
            std::fs::remove_file(&db_path)?;
            // WAL sidecar files would resurrect the old contents
            let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
            let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
        }

        // Opening with auto-create builds the directory and the schema
        Database::open(DatabaseConfig::new(&db_path))?;

        println!("Initialized bookable in: {}", data_dir.display());
        if existed {
            println!("  - Recreated database");
        } else {
            println!("  - Created database");
        }

        Ok(())
    }
}
