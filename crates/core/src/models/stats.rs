//! Cached usage statistics

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{same_month, Booking};

/// Aggregate counters stored under `<app>_user_stats`.
///
/// `current_month` is zero-based (January = 0). Records missing the
/// month/year stamp are treated as stale and recounted on the next refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub this_month_bookings: u64,
    /// Carried for compatibility; nothing accumulates into it
    #[serde(default)]
    pub total_spent: u64,
    #[serde(default)]
    pub current_month: Option<u32>,
    #[serde(default)]
    pub current_year: Option<i32>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Whether the month/year stamp matches `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.current_month == Some(now.month0()) && self.current_year == Some(now.year())
    }

    /// Recount the monthly counter from `bookings` if the stamp is stale.
    ///
    /// Returns true when a recount happened. `total_bookings` is untouched.
    pub fn roll_over(&mut self, bookings: &[Booking], now: DateTime<Utc>) -> bool {
        if self.is_current(now) {
            return false;
        }
        self.this_month_bookings = bookings
            .iter()
            .filter(|b| b.created_in_month_of(now))
            .count() as u64;
        self.stamp(now);
        true
    }

    /// Account for a newly created booking
    pub fn record_created(&mut self, created_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.total_bookings += 1;
        if same_month(created_at, now) {
            self.this_month_bookings += 1;
        }
        self.stamp(now);
    }

    /// Account for a deleted booking; both counters floor at zero
    pub fn record_deleted(&mut self, created_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.total_bookings = self.total_bookings.saturating_sub(1);
        if same_month(created_at, now) {
            self.this_month_bookings = self.this_month_bookings.saturating_sub(1);
        }
        self.last_updated = Some(now);
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        self.current_month = Some(now.month0());
        self.current_year = Some(now.year());
        self.last_updated = Some(now);
    }
}
