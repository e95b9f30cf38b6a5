//! Booking model

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Room, RoomId, Session, UserId};

/// Booking identifier: creation time in milliseconds since the Unix epoch
pub type BookingId = i64;

/// Approval status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "rejected" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }

    /// Approved and rejected are final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }

    /// Only pending bookings can be decided, and only into a terminal state
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        *self == BookingStatus::Pending && next.is_terminal()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation of one room for one time window on one day.
///
/// Room and user details are denormalized into the record when it is
/// created, so later catalog or account changes do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "booking_ID")]
    pub id: BookingId,
    #[serde(rename = "room_ID")]
    pub room_id: RoomId,
    pub room_name: String,
    #[serde(default)]
    pub room_location: String,
    #[serde(default)]
    pub room_capacity: u32,
    #[serde(default)]
    pub room_image: String,
    #[serde(rename = "user_ID")]
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub booking_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Build a pending booking for `room` on behalf of `session`
    pub fn new(
        id: BookingId,
        room: &Room,
        session: &Session,
        request: &BookingRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room_id: room.id,
            room_name: room.name.clone(),
            room_location: room.location.clone(),
            room_capacity: room.capacity,
            room_image: room.image_url.clone(),
            user_id: session.user_id,
            user_name: session.name.clone(),
            user_email: session.email.clone(),
            booking_date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            status: BookingStatus::Pending,
            created_at,
        }
    }

    /// True when created in the same calendar month and year as `now`
    pub fn created_in_month_of(&self, now: DateTime<Utc>) -> bool {
        same_month(self.created_at, now)
    }

    /// Rejected bookings no longer hold their slot
    pub fn holds_slot(&self) -> bool {
        self.status != BookingStatus::Rejected
    }

    /// Same room, same day, and the half-open time windows intersect
    pub fn overlaps(&self, room_id: RoomId, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.room_id == room_id
            && self.booking_date == date
            && self.start_time < end
            && start < self.end_time
    }
}

/// Form input for a new booking
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Overrides the creation timestamp (imports, backfills)
    pub created_at: Option<DateTime<Utc>>,
}

impl BookingRequest {
    pub fn new(room_id: RoomId, date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            room_id,
            date,
            start_time,
            end_time,
            created_at: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Calendar month comparison used by the statistics counters
pub fn same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.month0() == b.month0() && a.year() == b.year()
}

/// Serde adapter for `HH:MM` time-of-day strings
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    /// Accepts `HH:MM`, and `HH:MM:SS` as some browsers submit it
    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s, FORMAT).or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
    }
}
