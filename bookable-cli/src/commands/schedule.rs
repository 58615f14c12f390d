//! Schedule command implementation.
//!
//! This module implements the `schedule` command group for managing a
//! host's personal calendar: adding, moving, removing, and listing
//! entries. All instants are given in RFC 3339 form.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, parse_instant, GlobalOptions,
};
use bookable::engine::{create_entry, delete_entry, update_entry};
use bookable::ids::{EntryId, UserId};
use bookable::Database;
use chrono::Utc;
use clap::{Args, Subcommand};
use std::io::Write;

/// Manage a host's personal schedule.
#[derive(Args)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    action: ScheduleAction,
}

/// Schedule subcommands.
#[derive(Subcommand)]
enum ScheduleAction {
    /// Add an entry to the calendar
    Add(AddEntryArgs),

    /// Move or retitle an existing entry
    Update(UpdateEntryArgs),

    /// Remove an entry
    Remove(RemoveEntryArgs),

    /// List entries within a time range
    List(ListEntriesArgs),
}

#[derive(Args)]
struct AddEntryArgs {
    /// The owning host's user id
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// Entry title
    #[arg(long, value_name = "TITLE")]
    title: String,

    /// Optional free-form description
    #[arg(long, value_name = "TEXT")]
    description: Option<String>,

    /// Start instant (RFC 3339)
    #[arg(long, value_name = "INSTANT")]
    start: String,

    /// End instant (RFC 3339, exclusive)
    #[arg(long, value_name = "INSTANT")]
    end: String,
}

#[derive(Args)]
struct UpdateEntryArgs {
    /// The entry to update
    #[arg(value_name = "ENTRY_ID")]
    entry: i64,

    /// The owning host's user id
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// New entry title
    #[arg(long, value_name = "TITLE")]
    title: String,

    /// Optional free-form description
    #[arg(long, value_name = "TEXT")]
    description: Option<String>,

    /// New start instant (RFC 3339)
    #[arg(long, value_name = "INSTANT")]
    start: String,

    /// New end instant (RFC 3339, exclusive)
    #[arg(long, value_name = "INSTANT")]
    end: String,
}

#[derive(Args)]
struct RemoveEntryArgs {
    /// The entry to remove
    #[arg(value_name = "ENTRY_ID")]
    entry: i64,

    /// The owning host's user id
    #[arg(long, value_name = "USER_ID")]
    host: i64,
}

#[derive(Args)]
struct ListEntriesArgs {
    /// The host whose calendar to list
    #[arg(long, value_name = "USER_ID")]
    host: i64,

    /// Range start instant (RFC 3339)
    #[arg(long, value_name = "INSTANT")]
    from: String,

    /// Range end instant (RFC 3339, exclusive)
    #[arg(long, value_name = "INSTANT")]
    to: String,
}

impl ScheduleCommand {
    /// Execute the schedule command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        match self.action {
            ScheduleAction::Add(args) => {
                let mut db = open_database(global, &config)?;
                let entry = create_entry(
                    &mut db,
                    UserId::new(args.host),
                    &args.title,
                    args.description,
                    parse_instant(&args.start)?,
                    parse_instant(&args.end)?,
                    Utc::now(),
                )?;
                // id is always present after a successful insert
                match entry.id() {
                    Some(id) => println!("Created schedule entry {id}"),
                    None => println!("Created schedule entry"),
                }
            }
            ScheduleAction::Update(args) => {
                let mut db = open_database(global, &config)?;
                update_entry(
                    &mut db,
                    UserId::new(args.host),
                    EntryId::new(args.entry),
                    &args.title,
                    args.description,
                    parse_instant(&args.start)?,
                    parse_instant(&args.end)?,
                    Utc::now(),
                )?;
                println!("Updated schedule entry {}", args.entry);
            }
            ScheduleAction::Remove(args) => {
                let mut db = open_database(global, &config)?;
                delete_entry(&mut db, UserId::new(args.host), EntryId::new(args.entry))?;
                println!("Removed schedule entry {}", args.entry);
            }
            ScheduleAction::List(args) => {
                let db = open_database(global, &config)?;
                let entries = Database::list_entries_by_host_and_range(
                    db.connection(),
                    UserId::new(args.host),
                    parse_instant(&args.from)?,
                    parse_instant(&args.to)?,
                )?;

                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "ID\tTITLE\tSTART\tEND")?;
                for entry in &entries {
                    writeln!(
                        handle,
                        "{}\t{}\t{}\t{}",
                        entry
                            .id()
                            .map_or_else(|| "-".to_string(), |id| id.to_string()),
                        entry.title(),
                        format_timestamp(entry.start_time()),
                        format_timestamp(entry.end_time()),
                    )?;
                }
            }
        }

        Ok(())
    }
}
