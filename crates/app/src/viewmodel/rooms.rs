//! Room catalog view model

use chrono::NaiveTime;
use rendyws_core::{Error, Result, Room, RoomFilter, RoomId};

use super::{format_rupiah, format_time};
use crate::state::AppState;

fn room_line(room: &Room) -> String {
    format!(
        "{:>2}. {} ({}) - {} seats, {} - {}/hour",
        room.id,
        room.name,
        room.room_type,
        room.capacity,
        room.location,
        format_rupiah(room.price_per_hour)
    )
}

pub fn list(state: &AppState, filter: &RoomFilter) -> String {
    let rooms = state.catalog.search(filter);
    if rooms.is_empty() {
        return "No rooms match these filters".to_string();
    }

    let count = rooms.len();
    let mut lines: Vec<String> = rooms.into_iter().map(room_line).collect();
    lines.push(format!("{} room(s) found", count));
    lines.join("\n")
}

/// Room details, plus a price for `window` when given
pub fn show(state: &AppState, id: RoomId, window: Option<(NaiveTime, NaiveTime)>) -> Result<String> {
    let room = state
        .catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Room {}", id)))?;

    let mut out = vec![
        room_line(room),
        room.description.clone(),
        format!("Facilities: {}", room.facilities.join(", ")),
    ];

    if let Some((start, end)) = window {
        if end <= start {
            return Err(Error::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        out.push(format!(
            "Estimate {} - {}: {}",
            format_time(start),
            format_time(end),
            format_rupiah(room.estimate_cost(start, end))
        ));
    }

    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::demo_state;
    use rendyws_core::RoomType;

    #[test]
    fn test_list_all_rooms() {
        let state = demo_state();
        let out = list(&state, &RoomFilter::default());
        assert!(out.ends_with("6 room(s) found"));
        assert!(out.contains("Executive Meeting Room A (Meeting Room) - 8 seats, Floor 2, Jakarta - Rp 150.000/hour"));
    }

    #[test]
    fn test_list_filtered() {
        let state = demo_state();
        let filter = RoomFilter {
            room_type: Some(RoomType::HotDesk),
            max_price: 60_000,
            ..RoomFilter::default()
        };
        let out = list(&state, &filter);
        assert!(out.contains("Quiet Zone Desk"));
        assert!(!out.contains("Hot Desk Area"));

        let none = RoomFilter {
            min_capacity: Some(100),
            ..RoomFilter::default()
        };
        assert_eq!(list(&state, &none), "No rooms match these filters");
    }

    #[test]
    fn test_show_with_estimate() {
        let state = demo_state();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(10, 30, 0).unwrap();

        let out = show(&state, 4, Some((start, end))).unwrap();
        assert!(out.contains("Facilities: Projector, Sound System, WiFi, AC, Catering"));
        assert!(out.contains("Estimate 9:00 AM - 10:30 AM: Rp 400.000"));
    }

    #[test]
    fn test_show_unknown_room() {
        let state = demo_state();
        assert!(matches!(show(&state, 42, None), Err(Error::NotFound(_))));
    }
}
