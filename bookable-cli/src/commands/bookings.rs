//! Bookings command implementation.
//!
//! This module implements the `bookings` command, which displays a user's
//! bookings in various formats (table, JSON, CSV, TSV). The formatting
//! helpers are shared with the `pending` command.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use bookable::engine::list_bookings_for_user;
use bookable::ids::UserId;
use bookable::Booking;
use clap::{Args, ValueEnum};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "slot", "guests", "total_price", "status", "created_at"];

/// List a user's bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// The user whose bookings to list
    #[arg(long, value_name = "USER_ID")]
    user: i64,

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

/// Output format for booking listings.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let bookings = list_bookings_for_user(&db, UserId::new(self.user))?;
        print_bookings(&bookings, self.format)
    }
}

/// Format and print bookings to stdout in the requested format.
pub fn print_bookings(bookings: &[Booking], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => format_as_table(bookings),
        OutputFormat::Json => format_as_json(bookings),
        OutputFormat::Csv => format_as_delimited(bookings, b','),
        OutputFormat::Tsv => format_as_delimited(bookings, b'\t'),
    }
}

fn booking_id_str(booking: &Booking) -> String {
    booking
        .id()
        .map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Format bookings as a human-readable table.
fn format_as_table(bookings: &[Booking]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for booking in bookings {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            booking_id_str(booking),
            booking.slot_id(),
            booking.guests(),
            booking.total_price(),
            booking.status(),
            format_timestamp(booking.created_at()),
        )?;
    }

    Ok(())
}

/// Format bookings as JSON.
fn format_as_json(bookings: &[Booking]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = bookings
        .iter()
        .map(|b| {
            serde_json::json!({
                "id": b.id().map(|id| id.value()),
                "slot": b.slot_id().value(),
                "user": b.user_id().value(),
                "guests": b.guests(),
                "total_price": b.total_price().to_string(),
                "status": b.status().to_string(),
                "created_at": format_timestamp(b.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format bookings as delimited output (CSV or TSV).
fn format_as_delimited(bookings: &[Booking], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for booking in bookings {
        writer
            .write_record(&[
                booking_id_str(booking),
                booking.slot_id().to_string(),
                booking.guests().to_string(),
                booking.total_price().to_string(),
                booking.status().to_string(),
                format_timestamp(booking.created_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
