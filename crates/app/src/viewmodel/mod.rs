//! View models for the command-line front end
//!
//! Each command handler takes the [`AppState`](crate::state::AppState) and its
//! arguments and returns the text to print, so the rendering can be tested
//! without a terminal.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod rooms;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rendyws_core::Booking;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// `9:05 AM`, `12:00 PM`, `12:30 AM`
pub fn format_time(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        time.minute(),
        if pm { "PM" } else { "AM" }
    )
}

/// Short Indonesian date, e.g. `20 Jun 2024`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Rupiah with dot thousands separators, e.g. `Rp 150.000`
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {}", grouped)
}

/// One line per booking: id, status, room, and when
pub(crate) fn booking_line(booking: &Booking) -> String {
    format!(
        "#{} [{}] {} | {} {} - {}",
        booking.id,
        booking.status,
        booking.room_name,
        format_date(booking.booking_date),
        format_time(booking.start_time),
        format_time(booking.end_time)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(format_time(t(0, 30)), "12:30 AM");
        assert_eq!(format_time(t(9, 5)), "9:05 AM");
        assert_eq!(format_time(t(12, 0)), "12:00 PM");
        assert_eq!(format_time(t(17, 45)), "5:45 PM");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 8, 3).unwrap()),
            "3 Agu 2024"
        );
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(50_000), "Rp 50.000");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
    }
}
