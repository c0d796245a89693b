//! Reservation repository interface
//!
//! The conflict probe and all writes take the open [`DatabaseTransaction`]
//! so the check and the insert/update share one isolation scope; running
//! them on separate connections would reopen the check-then-act race.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseTransaction;

use super::model::Reservation;
use crate::domain::DomainResult;
use crate::shared::types::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation
    async fn insert(&self, txn: &DatabaseTransaction, reservation: Reservation)
        -> DomainResult<()>;

    /// Persist changed fields of an existing reservation
    async fn update(&self, txn: &DatabaseTransaction, reservation: Reservation)
        -> DomainResult<()>;

    /// Find a reservation by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Find a reservation by ID inside an open booking transaction
    async fn find_by_id_for_update(
        &self,
        txn: &DatabaseTransaction,
        id: &str,
    ) -> DomainResult<Option<Reservation>>;

    /// Whether any room-blocking reservation on `room_id` overlaps
    /// `[check_in, check_out)`, excluding `exclude_id` when given (used
    /// when re-checking a reservation against itself on modify).
    async fn has_conflict(
        &self,
        txn: &DatabaseTransaction,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<&str>,
    ) -> DomainResult<bool>;

    /// All reservations for a room, newest first
    async fn find_for_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>>;

    /// A guest's reservations, paginated, newest first
    async fn find_for_guest(
        &self,
        guest_id: &str,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>>;

    /// Confirmed reservations whose check-in date has passed without a
    /// check-in (no-show candidates)
    async fn find_overdue(&self, today: NaiveDate) -> DomainResult<Vec<Reservation>>;
}
