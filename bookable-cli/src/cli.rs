//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddListingCommand, AddSlotCommand, AddUserCommand, ApproveCommand, BookCommand,
    BookingsCommand, FreeCommand, InitCommand, PendingCommand, RejectCommand, ScheduleCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing marketplace bookings and host schedules.
#[derive(Parser)]
#[command(name = "bookable")]
#[command(version, about = "Manage marketplace bookings and host schedules", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "BOOKABLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "BOOKABLE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "BOOKABLE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the bookable data directory and database
    Init(InitCommand),

    /// Register a user
    AddUser(AddUserCommand),

    /// Create a listing owned by a host
    AddListing(AddListingCommand),

    /// Add a bookable slot to a listing
    AddSlot(AddSlotCommand),

    /// Book seats on a slot
    Book(BookCommand),

    /// Approve a pending booking
    Approve(ApproveCommand),

    /// Reject a pending booking
    Reject(RejectCommand),

    /// List a user's bookings
    Bookings(BookingsCommand),

    /// List pending bookings awaiting a host's decision
    Pending(PendingCommand),

    /// Manage a host's personal schedule
    Schedule(ScheduleCommand),

    /// Check whether a host's time window is free
    Free(FreeCommand),
}
