//! Room model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Numeric room identifier, as stored in `room_ID` fields
pub type RoomId = u32;

/// Kind of rentable space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    MeetingRoom,
    PrivateOffice,
    HotDesk,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::MeetingRoom => "meeting_room",
            RoomType::PrivateOffice => "private_office",
            RoomType::HotDesk => "hot_desk",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::MeetingRoom => "Meeting Room",
            RoomType::PrivateOffice => "Private Office",
            RoomType::HotDesk => "Hot Desk",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "meeting_room" => Some(RoomType::MeetingRoom),
            "private_office" => Some(RoomType::PrivateOffice),
            "hot_desk" => Some(RoomType::HotDesk),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A rentable room from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "room_ID")]
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub location: String,
    /// Price in rupiah
    pub price_per_hour: u64,
    pub room_type: RoomType,
    pub description: String,
    pub image_url: String,
    pub facilities: Vec<String>,
}

impl Room {
    /// Price for a start/end window, billed per started hour.
    ///
    /// Returns 0 when `end` is not after `start`.
    pub fn estimate_cost(&self, start: NaiveTime, end: NaiveTime) -> u64 {
        let minutes = (end - start).num_minutes();
        if minutes <= 0 {
            return 0;
        }
        let hours = (minutes as u64).div_ceil(60);
        hours * self.price_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            id: 1,
            name: "Executive Meeting Room A".to_string(),
            capacity: 8,
            location: "Floor 2, Jakarta".to_string(),
            price_per_hour: 150_000,
            room_type: RoomType::MeetingRoom,
            description: String::new(),
            image_url: String::new(),
            facilities: vec![],
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_estimate_cost_whole_hours() {
        assert_eq!(room().estimate_cost(t(9, 0), t(11, 0)), 300_000);
    }

    #[test]
    fn test_estimate_cost_rounds_up() {
        assert_eq!(room().estimate_cost(t(9, 0), t(10, 15)), 300_000);
    }

    #[test]
    fn test_estimate_cost_empty_window() {
        assert_eq!(room().estimate_cost(t(10, 0), t(9, 0)), 0);
        assert_eq!(room().estimate_cost(t(10, 0), t(10, 0)), 0);
    }

    #[test]
    fn test_room_type_round_trip_names() {
        for kind in [RoomType::MeetingRoom, RoomType::PrivateOffice, RoomType::HotDesk] {
            assert_eq!(RoomType::parse(kind.as_str()), Some(kind));
        }
    }
}
