//! Static room catalog and search filters

use crate::models::{Room, RoomId, RoomType};

/// Upper bound of the price slider on the rooms page
pub const DEFAULT_MAX_PRICE: u64 = 500_000;

/// Criteria for narrowing the room list. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFilter {
    pub min_price: u64,
    pub max_price: u64,
    pub min_capacity: Option<u32>,
    pub room_type: Option<RoomType>,
    /// Substring of the room location, case-sensitive
    pub location: Option<String>,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self {
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            min_capacity: None,
            room_type: None,
            location: None,
        }
    }
}

impl RoomFilter {
    pub fn matches(&self, room: &Room) -> bool {
        let price = room.price_per_hour >= self.min_price && room.price_per_hour <= self.max_price;
        let capacity = self.min_capacity.map_or(true, |min| room.capacity >= min);
        let kind = self.room_type.map_or(true, |t| room.room_type == t);
        let location = self
            .location
            .as_deref()
            .map_or(true, |loc| room.location.contains(loc));

        price && capacity && kind && location
    }
}

/// In-memory set of rentable rooms
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// The six rooms offered at the Jakarta location
    pub fn builtin() -> Self {
        Self::new(vec![
            room(
                1,
                "Executive Meeting Room A",
                8,
                "Floor 2, Jakarta",
                150_000,
                RoomType::MeetingRoom,
                "Spacious meeting room with city view",
                "https://images.unsplash.com/photo-1497366216548-37526070297c?w=800&h=600&fit=crop",
                &["Projector", "Whiteboard", "WiFi", "AC", "Coffee"],
            ),
            room(
                2,
                "Private Office Suite",
                4,
                "Floor 3, Jakarta",
                300_000,
                RoomType::PrivateOffice,
                "Luxury private office with premium amenities",
                "https://images.unsplash.com/photo-1497366811353-6870744d04b2?w=800&h=600&fit=crop",
                &["Desk", "Chair", "Storage", "WiFi", "Printer"],
            ),
            room(
                3,
                "Hot Desk Area",
                1,
                "Floor 1, Jakarta",
                75_000,
                RoomType::HotDesk,
                "Flexible workspace in vibrant community",
                "https://images.unsplash.com/photo-1497366754035-f200968a6e72?w=800&h=600&fit=crop",
                &["WiFi", "Coffee", "Lounge", "Community"],
            ),
            room(
                4,
                "Conference Room B",
                12,
                "Floor 2, Jakarta",
                200_000,
                RoomType::MeetingRoom,
                "Large conference room for team meetings",
                "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=800&h=600&fit=crop",
                &["Projector", "Sound System", "WiFi", "AC", "Catering"],
            ),
            room(
                5,
                "Creative Studio",
                6,
                "Floor 4, Jakarta",
                180_000,
                RoomType::PrivateOffice,
                "Inspiring space for creative work",
                "https://images.unsplash.com/photo-1524758631624-e2822e304c36?w=800&h=600&fit=crop",
                &["Natural Light", "Whiteboard", "WiFi", "Plants", "Art Supplies"],
            ),
            room(
                6,
                "Quiet Zone Desk",
                1,
                "Floor 1, Jakarta",
                50_000,
                RoomType::HotDesk,
                "Perfect for focused individual work",
                "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop",
                &["WiFi", "Quiet Zone", "Power Outlet", "Ergonomic Chair"],
            ),
        ])
    }

    pub fn all(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms matching `filter`, in catalog order
    pub fn search(&self, filter: &RoomFilter) -> Vec<&Room> {
        self.rooms.iter().filter(|r| filter.matches(r)).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn room(
    id: RoomId,
    name: &str,
    capacity: u32,
    location: &str,
    price_per_hour: u64,
    room_type: RoomType,
    description: &str,
    image_url: &str,
    facilities: &[&str],
) -> Room {
    Room {
        id,
        name: name.to_string(),
        capacity,
        location: location.to_string(),
        price_per_hour,
        room_type,
        description: description.to_string(),
        image_url: image_url.to_string(),
        facilities: facilities.iter().map(|f| f.to_string()).collect(),
    }
}
