//! Booking ledger
//!
//! Owns every read and write of the booking list and the cached statistics.
//! Each mutation loads the list, applies the change, and commits the list and
//! the statistics together.
//!
//! Statistics follow calendar months in UTC. A stale month stamp is rolled
//! over (monthly counter recounted from the list) before any increment or
//! decrement is applied.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::catalog::RoomCatalog;
use crate::config::{LedgerConfig, OverlapPolicy};
use crate::error::{Error, Result};
use crate::invariants;
use crate::models::{Booking, BookingId, BookingRequest, BookingStatus, Session, UserId, UserStats};
use crate::permissions::{LedgerAction, PermissionMatrix};
use crate::storage::LedgerRepository;

/// Ordering for booking queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingOrder {
    /// As stored (oldest write first)
    #[default]
    Insertion,
    /// Most recently created first
    NewestFirst,
    /// Pending bookings ahead of decided ones; stored order within each group
    PendingFirst,
}

impl BookingOrder {
    /// Sort in place; both sorts are stable
    pub fn apply(self, bookings: &mut [Booking]) {
        match self {
            BookingOrder::Insertion => {}
            BookingOrder::NewestFirst => {
                bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            BookingOrder::PendingFirst => {
                bookings.sort_by_key(|b| b.status != BookingStatus::Pending);
            }
        }
    }
}

/// A member's dashboard: refreshed stats plus own bookings, newest first
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: UserStats,
    pub bookings: Vec<Booking>,
    recent_limit: usize,
}

impl Dashboard {
    /// The head of the history shown on the overview
    pub fn recent(&self) -> &[Booking] {
        &self.bookings[..self.bookings.len().min(self.recent_limit)]
    }

    pub fn pending_count(&self) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count()
    }
}

/// Booking ledger over a storage backend
pub struct Ledger<'a, R: LedgerRepository + ?Sized> {
    repo: &'a R,
    catalog: &'a RoomCatalog,
    config: LedgerConfig,
}

impl<'a, R: LedgerRepository + ?Sized> Ledger<'a, R> {
    pub fn new(repo: &'a R, catalog: &'a RoomCatalog, config: LedgerConfig) -> Self {
        Self {
            repo,
            catalog,
            config,
        }
    }

    /// Every booking in the requested order
    pub fn list(&self, order: BookingOrder) -> Result<Vec<Booking>> {
        let mut bookings = self.repo.load_bookings()?;
        order.apply(&mut bookings);
        Ok(bookings)
    }

    /// Bookings owned by `user_id` in the requested order
    pub fn list_for_user(&self, user_id: UserId, order: BookingOrder) -> Result<Vec<Booking>> {
        let mut bookings = self.repo.load_bookings()?;
        bookings.retain(|b| b.user_id == user_id);
        order.apply(&mut bookings);
        Ok(bookings)
    }

    /// Look up one booking
    pub fn get(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .repo
            .load_bookings()?
            .into_iter()
            .find(|b| b.id == booking_id))
    }

    /// Stored statistics, as last written
    pub fn stats(&self) -> Result<UserStats> {
        self.repo.load_stats()
    }

    pub fn create(&self, session: &Session, request: &BookingRequest) -> Result<Booking> {
        self.create_at(session, request, Utc::now())
    }

    /// Append a pending booking and count it in the statistics.
    ///
    /// A stale month stamp is recounted first, so `this_month_bookings` moves
    /// by exactly one only when the stats were already current.
    #[instrument(skip(self, session, request), fields(user_id = session.user_id, room_id = request.room_id))]
    pub fn create_at(
        &self,
        session: &Session,
        request: &BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<Booking> {
        PermissionMatrix::ensure(session, LedgerAction::CreateBooking)?;

        let room = self
            .catalog
            .get(request.room_id)
            .ok_or_else(|| Error::NotFound(format!("Room {}", request.room_id)))?;

        validate_request(request, now)?;

        let mut bookings = self.repo.load_bookings()?;
        if self.config.overlap_policy == OverlapPolicy::Reject {
            check_overlap(&bookings, request)?;
        }

        let mut stats = self.repo.load_stats()?;
        stats.roll_over(&bookings, now);

        let id = next_booking_id(&bookings, now);
        let created_at = request.created_at.unwrap_or(now);
        let booking = Booking::new(id, room, session, request, created_at);
        invariants::assert_booking_invariants(&booking);

        bookings.push(booking.clone());
        stats.record_created(created_at, now);
        self.repo.commit(&bookings, &stats)?;

        info!(
            booking_id = booking.id,
            total = stats.total_bookings,
            this_month = stats.this_month_bookings,
            "Booking created"
        );
        Ok(booking)
    }

    /// Decide a pending booking. Unknown IDs are a no-op.
    #[instrument(skip(self, session), fields(actor = session.user_id))]
    pub fn update_status(
        &self,
        session: &Session,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        PermissionMatrix::ensure(session, LedgerAction::ReviewBooking)?;

        let mut bookings = self.repo.load_bookings()?;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) else {
            debug!("No booking with that ID, nothing to update");
            return Ok(None);
        };

        if !booking.status.can_transition_to(status) {
            return Err(Error::InvalidOperation(format!(
                "Booking {} is {} and cannot become {}",
                booking_id, booking.status, status
            )));
        }
        invariants::assert_valid_transition(booking.status, status);

        booking.status = status;
        let updated = booking.clone();

        let stats = self.repo.load_stats()?;
        self.repo.commit(&bookings, &stats)?;

        info!(booking_id, status = status.as_str(), "Booking reviewed");
        Ok(Some(updated))
    }

    pub fn delete(&self, session: &Session, booking_id: BookingId) -> Result<Option<Booking>> {
        self.delete_at(session, booking_id, Utc::now())
    }

    /// Remove a booking and uncount it. Unknown IDs are a no-op.
    ///
    /// As with creation, a stale month stamp is recounted before the
    /// decrement.
    #[instrument(skip(self, session), fields(actor = session.user_id))]
    pub fn delete_at(
        &self,
        session: &Session,
        booking_id: BookingId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let mut bookings = self.repo.load_bookings()?;
        let Some(index) = bookings.iter().position(|b| b.id == booking_id) else {
            debug!("No booking with that ID, nothing to delete");
            return Ok(None);
        };

        if !PermissionMatrix::can_delete(session, &bookings[index]) {
            return Err(Error::PermissionDenied(format!(
                "Booking {} belongs to another member",
                booking_id
            )));
        }

        let mut stats = self.repo.load_stats()?;
        stats.roll_over(&bookings, now);

        let removed = bookings.remove(index);
        stats.record_deleted(removed.created_at, now);
        self.repo.commit(&bookings, &stats)?;

        info!(
            booking_id,
            total = stats.total_bookings,
            this_month = stats.this_month_bookings,
            "Booking deleted"
        );
        Ok(Some(removed))
    }

    pub fn refresh_monthly_stats(&self) -> Result<UserStats> {
        self.refresh_monthly_stats_at(Utc::now())
    }

    /// Recount this month's bookings if the stored month/year is stale
    #[instrument(skip(self))]
    pub fn refresh_monthly_stats_at(&self, now: DateTime<Utc>) -> Result<UserStats> {
        let mut stats = self.repo.load_stats()?;
        if !stats.is_current(now) {
            let bookings = self.repo.load_bookings()?;
            stats.roll_over(&bookings, now);
            invariants::assert_stats_invariants(&stats, &bookings);
            self.repo.save_stats(&stats)?;
            info!(this_month = stats.this_month_bookings, "Monthly statistics recounted");
        }
        Ok(stats)
    }

    pub fn dashboard(&self, session: &Session) -> Result<Dashboard> {
        self.dashboard_at(session, Utc::now())
    }

    /// Statistics and the session holder's bookings, newest first
    pub fn dashboard_at(&self, session: &Session, now: DateTime<Utc>) -> Result<Dashboard> {
        PermissionMatrix::ensure(session, LedgerAction::ViewOwnBookings)?;
        let stats = self.refresh_monthly_stats_at(now)?;
        let bookings = self.list_for_user(session.user_id, BookingOrder::NewestFirst)?;
        Ok(Dashboard {
            stats,
            bookings,
            recent_limit: self.config.recent_limit,
        })
    }

    /// All bookings for staff review, pending first
    pub fn review_queue(&self, session: &Session) -> Result<Vec<Booking>> {
        PermissionMatrix::ensure(session, LedgerAction::ViewAllBookings)?;
        self.list(BookingOrder::PendingFirst)
    }
}

/// Millisecond timestamp, bumped past any ID already in the list
fn next_booking_id(bookings: &[Booking], now: DateTime<Utc>) -> BookingId {
    let mut id = now.timestamp_millis();
    while bookings.iter().any(|b| b.id == id) {
        id += 1;
    }
    id
}

fn validate_request(request: &BookingRequest, now: DateTime<Utc>) -> Result<()> {
    if request.end_time <= request.start_time {
        return Err(Error::Validation(
            "End time must be after start time".to_string(),
        ));
    }
    if request.date < now.date_naive() {
        return Err(Error::Validation(
            "Booking date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

fn check_overlap(bookings: &[Booking], request: &BookingRequest) -> Result<()> {
    let clash = bookings.iter().find(|b| {
        b.holds_slot()
            && b.overlaps(
                request.room_id,
                request.date,
                request.start_time,
                request.end_time,
            )
    });

    match clash {
        Some(existing) => Err(Error::Conflict(format!(
            "{} is already booked on {} from {} to {}",
            existing.room_name,
            existing.booking_date,
            existing.start_time.format("%H:%M"),
            existing.end_time.format("%H:%M")
        ))),
        None => Ok(()),
    }
}
