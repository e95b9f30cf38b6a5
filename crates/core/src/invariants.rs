//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{Booking, BookingStatus, Session, UserStats};

/// Validate that a booking record is internally consistent
pub fn assert_booking_invariants(booking: &Booking) {
    debug_assert!(
        booking.id > 0,
        "Booking has non-positive id {}",
        booking.id
    );

    debug_assert!(
        booking.end_time > booking.start_time,
        "Booking {} ends at {} before it starts at {}",
        booking.id,
        booking.end_time,
        booking.start_time
    );

    debug_assert!(
        !booking.room_name.trim().is_empty(),
        "Booking {} has empty room name",
        booking.id
    );
}

/// Validate a status change before it is applied
pub fn assert_valid_transition(from: BookingStatus, to: BookingStatus) {
    debug_assert!(
        from.can_transition_to(to),
        "Booking status cannot move from {} to {}",
        from,
        to
    );
}

/// Validate that a stored session identifies someone
pub fn assert_session_invariants(session: &Session) {
    debug_assert!(
        !session.email.trim().is_empty(),
        "Session for user {} has empty email",
        session.user_id
    );
}

/// Validate that the monthly counter is a subset of the total.
///
/// Only meaningful for ledgers written exclusively through this crate;
/// records imported from other writers may already disagree.
pub fn assert_stats_invariants(stats: &UserStats, bookings: &[Booking]) {
    debug_assert!(
        stats.this_month_bookings <= bookings.len() as u64,
        "Monthly count {} exceeds the {} stored bookings",
        stats.this_month_bookings,
        bookings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn make_booking() -> Booking {
        Booking {
            id: 1_718_000_000_000,
            room_id: 1,
            room_name: "Executive Meeting Room A".to_string(),
            room_location: "Floor 2, Jakarta".to_string(),
            room_capacity: 8,
            room_image: String::new(),
            user_id: 1,
            user_name: "RendyReza".to_string(),
            user_email: "rendyreza@rendyws.com".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_booking() {
        assert_booking_invariants(&make_booking());
    }

    #[test]
    #[should_panic(expected = "before it starts")]
    fn test_backwards_booking() {
        let mut booking = make_booking();
        booking.end_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_booking_invariants(&booking);
    }

    #[test]
    fn test_valid_transition() {
        assert_valid_transition(BookingStatus::Pending, BookingStatus::Approved);
        assert_valid_transition(BookingStatus::Pending, BookingStatus::Rejected);
    }

    #[test]
    #[should_panic(expected = "cannot move from approved to rejected")]
    fn test_terminal_transition() {
        assert_valid_transition(BookingStatus::Approved, BookingStatus::Rejected);
    }

    #[test]
    fn test_valid_session() {
        assert_session_invariants(&Session {
            user_id: 1,
            name: "R".to_string(),
            email: "r@r.com".to_string(),
            role: UserRole::User,
            is_logged_in: true,
        });
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_monthly_count_exceeds_bookings() {
        let stats = UserStats {
            total_bookings: 3,
            this_month_bookings: 3,
            ..Default::default()
        };
        assert_stats_invariants(&stats, &[make_booking()]);
    }
}
