//! Permission system for ledger operations

use crate::error::{Error, Result};
use crate::models::{Booking, Session, UserRole};

/// Actions that can be performed against the booking ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    // Member actions
    CreateBooking,
    ViewOwnBookings,
    DeleteOwnBooking,

    // Staff actions
    ViewAllBookings,
    ReviewBooking,
    DeleteAnyBooking,
}

impl LedgerAction {
    fn describe(&self) -> &'static str {
        match self {
            LedgerAction::CreateBooking => "create bookings",
            LedgerAction::ViewOwnBookings => "view own bookings",
            LedgerAction::DeleteOwnBooking => "cancel own bookings",
            LedgerAction::ViewAllBookings => "view all bookings",
            LedgerAction::ReviewBooking => "approve or reject bookings",
            LedgerAction::DeleteAnyBooking => "cancel other members' bookings",
        }
    }
}

/// Permission matrix for account roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a role has permission to perform an action
    pub fn can_perform(role: UserRole, action: LedgerAction) -> bool {
        match action {
            LedgerAction::CreateBooking
            | LedgerAction::ViewOwnBookings
            | LedgerAction::DeleteOwnBooking => true,

            LedgerAction::ViewAllBookings
            | LedgerAction::ReviewBooking
            | LedgerAction::DeleteAnyBooking => role == UserRole::Admin,
        }
    }

    /// Fail with `PermissionDenied` unless the session may perform `action`
    pub fn ensure(session: &Session, action: LedgerAction) -> Result<()> {
        if Self::can_perform(session.role, action) {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "{} cannot {}",
                session.role.display_name(),
                action.describe()
            )))
        }
    }

    /// Owners may cancel their own bookings; staff may cancel any
    pub fn can_delete(session: &Session, booking: &Booking) -> bool {
        if booking.user_id == session.user_id {
            Self::can_perform(session.role, LedgerAction::DeleteOwnBooking)
        } else {
            Self::can_perform(session.role, LedgerAction::DeleteAnyBooking)
        }
    }
}
