//! Booking view model

use rendyws_core::{BookingId, BookingOrder, BookingRequest, BookingStatus, Result, UserStats};

use super::{booking_line, format_date, format_rupiah, format_time};
use crate::state::AppState;

pub fn book(state: &AppState, request: &BookingRequest) -> Result<String> {
    let session = state.session()?;
    let booking = state.ledger().create(&session, request)?;

    let estimate = state
        .catalog
        .get(booking.room_id)
        .map(|room| room.estimate_cost(booking.start_time, booking.end_time))
        .unwrap_or_default();

    Ok(format!(
        "Booking #{} requested: {} on {}, {} - {} ({}). Status: {}",
        booking.id,
        booking.room_name,
        format_date(booking.booking_date),
        format_time(booking.start_time),
        format_time(booking.end_time),
        format_rupiah(estimate),
        booking.status
    ))
}

/// The session holder's bookings, newest first
pub fn list(state: &AppState, status: Option<BookingStatus>) -> Result<String> {
    let session = state.session()?;
    let bookings: Vec<_> = state
        .ledger()
        .list_for_user(session.user_id, BookingOrder::NewestFirst)?
        .into_iter()
        .filter(|b| status.map_or(true, |s| b.status == s))
        .collect();

    if bookings.is_empty() {
        return Ok("No bookings yet".to_string());
    }
    Ok(bookings.iter().map(booking_line).collect::<Vec<_>>().join("\n"))
}

fn stats_lines(stats: &UserStats) -> Vec<String> {
    vec![
        format!("Total Bookings: {}", stats.total_bookings),
        format!("This Month: {}", stats.this_month_bookings),
    ]
}

pub fn dashboard(state: &AppState) -> Result<String> {
    let session = state.session()?;
    let dashboard = state.ledger().dashboard(&session)?;

    let mut out = vec![format!("Welcome back, {}", session.name)];
    out.extend(stats_lines(&dashboard.stats));
    out.push(format!("Pending: {}", dashboard.pending_count()));
    out.push(String::new());
    out.push("Recent Bookings".to_string());

    if dashboard.recent().is_empty() {
        out.push("No bookings yet. Start by booking your first workspace!".to_string());
    } else {
        out.extend(dashboard.recent().iter().map(booking_line));
    }
    Ok(out.join("\n"))
}

pub fn cancel(state: &AppState, id: BookingId) -> Result<String> {
    let session = state.session()?;
    Ok(match state.ledger().delete(&session, id)? {
        Some(booking) => format!("Booking #{} for {} deleted", booking.id, booking.room_name),
        None => format!("No booking #{}", id),
    })
}

/// Cached statistics, rolled over to the current month first
pub fn stats(state: &AppState) -> Result<String> {
    state.session()?;
    let stats = state.ledger().refresh_monthly_stats()?;
    Ok(stats_lines(&stats).join("\n"))
}
