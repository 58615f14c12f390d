//! Main entry point for the bookable CLI.
//!
//! This is the command-line interface for the bookable reservation engine.
//! It provides commands for managing listings, bookings, and host schedules:
//! - `book`: Book seats on a slot
//! - `approve` / `reject`: Decide a pending booking
//! - `bookings` / `pending`: List bookings
//! - `schedule`: Manage a host's personal calendar
//! - `free`: Check whether a time window is free

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = bookable::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddUser(cmd) => cmd.execute(&global),
        cli::Command::AddListing(cmd) => cmd.execute(&global),
        cli::Command::AddSlot(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Approve(cmd) => cmd.execute(&global),
        cli::Command::Reject(cmd) => cmd.execute(&global),
        cli::Command::Bookings(cmd) => cmd.execute(&global),
        cli::Command::Pending(cmd) => cmd.execute(&global),
        cli::Command::Schedule(cmd) => cmd.execute(&global),
        cli::Command::Free(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
