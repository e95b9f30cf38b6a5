//! Staff review view model

use rendyws_core::{BookingId, BookingStatus, Result};

use super::booking_line;
use crate::state::AppState;

/// Every booking, pending first, with who made it
pub fn review(state: &AppState) -> Result<String> {
    let session = state.session()?;
    let queue = state.ledger().review_queue(&session)?;
    if queue.is_empty() {
        return Ok("No bookings to review".to_string());
    }

    let pending = queue
        .iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .count();

    let mut out: Vec<String> = queue
        .iter()
        .map(|b| format!("{} | {} <{}>", booking_line(b), b.user_name, b.user_email))
        .collect();
    out.push(format!("{} pending of {}", pending, queue.len()));
    Ok(out.join("\n"))
}

/// Approve or reject a pending booking
pub fn decide(state: &AppState, id: BookingId, status: BookingStatus) -> Result<String> {
    let session = state.session()?;
    Ok(match state.ledger().update_status(&session, id, status)? {
        Some(booking) => format!("Booking #{} {}", booking.id, booking.status),
        None => format!("No booking #{}", id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use chrono::{Duration, NaiveTime, Utc};
    use rendyws_core::{BookingOrder, BookingRequest, Error};

    fn seed_member_booking(state: &AppState) -> BookingId {
        sign_in(state, MEMBER_EMAIL, MEMBER_PASSWORD);
        let request = BookingRequest::new(
            5,
            Utc::now().date_naive() + Duration::days(2),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        );
        let session = state.session().unwrap();
        state.ledger().create(&session, &request).unwrap().id
    }

    #[test]
    fn test_member_cannot_review() {
        let state = demo_state();
        let id = seed_member_booking(&state);

        assert!(matches!(review(&state), Err(Error::PermissionDenied(_))));
        assert!(matches!(
            decide(&state, id, BookingStatus::Approved),
            Err(Error::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_admin_approves() {
        let state = demo_state();
        let id = seed_member_booking(&state);
        sign_in(&state, ADMIN_EMAIL, ADMIN_PASSWORD);

        let out = review(&state).unwrap();
        assert!(out.contains("Creative Studio"));
        assert!(out.contains("RendyReza <rendyreza@rendyws.com>"));
        assert!(out.ends_with("1 pending of 1"));

        assert_eq!(
            decide(&state, id, BookingStatus::Approved).unwrap(),
            format!("Booking #{} approved", id)
        );
        assert!(review(&state).unwrap().ends_with("0 pending of 1"));

        let stored = state.ledger().list(BookingOrder::Insertion).unwrap();
        assert_eq!(stored[0].status, BookingStatus::Approved);
    }

    #[test]
    fn test_decisions_are_final() {
        let state = demo_state();
        let id = seed_member_booking(&state);
        sign_in(&state, ADMIN_EMAIL, ADMIN_PASSWORD);

        decide(&state, id, BookingStatus::Rejected).unwrap();
        assert!(matches!(
            decide(&state, id, BookingStatus::Approved),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_unknown_booking() {
        let state = demo_state();
        sign_in(&state, ADMIN_EMAIL, ADMIN_PASSWORD);
        assert_eq!(
            decide(&state, 7, BookingStatus::Approved).unwrap(),
            "No booking #7"
        );
        assert_eq!(review(&state).unwrap(), "No bookings to review");
    }
}
