//! Domain error taxonomy
//!
//! Every rejected operation maps to exactly one of these variants; the
//! embedding request layer translates them to its own status codes.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::reservation::ReservationStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid date range: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("room {room_id} is unavailable for {check_in}..{check_out}")]
    RoomUnavailable {
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("occupant count {requested} exceeds room capacity {max_occupancy}")]
    OccupancyExceeded { requested: i32, max_occupancy: i32 },

    #[error("illegal reservation transition: {from} -> {to}")]
    IllegalTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("check-in not allowed before {check_in} (today is {today})")]
    PrematureCheckIn { check_in: NaiveDate, today: NaiveDate },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl DomainError {
    /// Whether the caller may retry the operation unchanged and expect
    /// it to succeed (lock contention, a conflicting writer won the race).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::ConcurrentModification(_) | DomainError::RoomUnavailable { .. }
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── Tests ──────────────────────────────────────────────────────
