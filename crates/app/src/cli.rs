//! Command-line arguments

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use rendyws_core::models::hhmm;
use rendyws_core::{BookingId, BookingStatus, RoomId, RoomType};

#[derive(Parser, Debug)]
#[command(name = "rendyws", about = "RendyWS co-working room booking", version)]
pub struct Cli {
    /// Configuration file (falls back to RENDYWS_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configured location
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    Login {
        email: String,
        password: String,
    },
    /// Sign out of the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Create a member account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },
    /// Browse the room catalog
    Rooms {
        /// Minimum price per hour in rupiah
        #[arg(long)]
        min_price: Option<u64>,
        /// Maximum price per hour in rupiah
        #[arg(long)]
        max_price: Option<u64>,
        /// Minimum number of seats
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long = "type", value_enum)]
        room_type: Option<RoomKind>,
        /// Part of the location, e.g. "Floor 2"
        #[arg(long)]
        location: Option<String>,
    },
    /// Show one room, optionally with a price estimate
    Room {
        id: RoomId,
        /// Start time (HH:MM) for the estimate
        #[arg(long, value_parser = parse_time, requires = "end")]
        start: Option<NaiveTime>,
        /// End time (HH:MM) for the estimate
        #[arg(long, value_parser = parse_time, requires = "start")]
        end: Option<NaiveTime>,
    },
    /// Request a room booking
    Book {
        #[arg(long)]
        room: RoomId,
        /// Booking date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// End time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },
    /// List your bookings, newest first
    Bookings {
        /// Only bookings with this status
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },
    /// Statistics and recent bookings
    Dashboard,
    /// All bookings awaiting a decision first (admin)
    Review,
    /// Approve a pending booking (admin)
    Approve { id: BookingId },
    /// Reject a pending booking (admin)
    Reject { id: BookingId },
    /// Delete a booking
    Cancel { id: BookingId },
    /// Show the cached booking statistics
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    MeetingRoom,
    PrivateOffice,
    HotDesk,
}

impl From<RoomKind> for RoomType {
    fn from(kind: RoomKind) -> Self {
        match kind {
            RoomKind::MeetingRoom => RoomType::MeetingRoom,
            RoomKind::PrivateOffice => RoomType::PrivateOffice,
            RoomKind::HotDesk => RoomType::HotDesk,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusFilter> for BookingStatus {
    fn from(status: StatusFilter) -> Self {
        match status {
            StatusFilter::Pending => BookingStatus::Pending,
            StatusFilter::Approved => BookingStatus::Approved,
            StatusFilter::Rejected => BookingStatus::Rejected,
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    hhmm::parse(s).map_err(|_| format!("expected HH:MM, got {:?}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("expected YYYY-MM-DD, got {:?}", s))
}
