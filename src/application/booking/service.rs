//! Booking service
//!
//! Composition root for the reservation engine. Every public operation
//! runs as one atomic unit: acquire the room lock, open a transaction,
//! validate, write, synchronize room occupancy, commit. An error on any
//! step drops the transaction before commit, so no partial state is ever
//! observable; the room lock closes the check-then-act window between
//! the availability probe and the insert.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::domain::reservation::state_machine::{self, TransitionContext};
use crate::domain::reservation::{PaymentStatus, Reservation, ReservationStatus};
use crate::domain::room::Room;
use crate::domain::{pricing, DomainError, DomainResult, RepositoryProvider};
use crate::notifications::{BookingEvent, EventBus};

use super::requests::{self, Actor, CreateReservationRequest, ReservationUpdate};
use super::room_locks::{RoomLockRegistry, DEFAULT_LOCK_TIMEOUT};
use super::room_status::{self, RoomEvent};

pub struct BookingService {
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
    locks: RoomLockRegistry,
    events: EventBus,
}

impl BookingService {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        events: EventBus,
    ) -> Self {
        Self::with_lock_timeout(db, repos, events, DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        events: EventBus,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            db,
            repos,
            locks: RoomLockRegistry::new(lock_timeout),
            events,
        }
    }

    /// Book a stay. Returns the persisted reservation in `Confirmed`
    /// status.
    pub async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> DomainResult<Reservation> {
        requests::check(&request)?;
        ensure_date_order(request.check_in_date, request.check_out_date)?;

        self.repos
            .guests()
            .find_by_id(&request.guest_id)
            .await?
            .ok_or_else(|| not_found("Guest", request.guest_id.clone()))?;

        let _room_guard = self.locks.acquire(request.room_id).await?;
        let txn = self.db.begin().await?;

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, request.room_id)
            .await?
            .ok_or_else(|| not_found("Room", request.room_id.to_string()))?;

        if !room.is_bookable() {
            return Err(DomainError::Validation(format!(
                "room {} is deactivated",
                room.room_number
            )));
        }

        let conflict = self
            .repos
            .reservations()
            .has_conflict(
                &txn,
                room.id,
                request.check_in_date,
                request.check_out_date,
                None,
            )
            .await?;
        if conflict {
            return Err(DomainError::RoomUnavailable {
                room_id: room.id,
                check_in: request.check_in_date,
                check_out: request.check_out_date,
            });
        }

        if request.occupant_count > room.max_occupancy {
            return Err(DomainError::OccupancyExceeded {
                requested: request.occupant_count,
                max_occupancy: room.max_occupancy,
            });
        }

        let quote = pricing::quote(
            room.nightly_rate(),
            request.check_in_date,
            request.check_out_date,
        )?;

        let reservation = Reservation::new(
            room.id,
            request.guest_id,
            request.check_in_date,
            request.check_out_date,
            request.occupant_count,
            quote.nights,
            room.nightly_rate(),
            quote.total,
            request.special_requests,
        );

        self.repos
            .reservations()
            .insert(&txn, reservation.clone())
            .await?;

        self.sync_room(&txn, &room, &reservation, RoomEvent::Created)
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            nights = reservation.nights,
            total = %reservation.total_amount,
            "Reservation created"
        );

        self.events.publish(BookingEvent::ReservationCreated {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
            guest_id: reservation.guest_id.clone(),
            check_in_date: reservation.check_in_date,
            check_out_date: reservation.check_out_date,
            total_amount: reservation.total_amount.to_string(),
        });

        Ok(reservation)
    }

    /// Change dates, occupant count or special requests of a live
    /// reservation. Date changes re-run the conflict check (excluding
    /// this reservation) and re-price the stay at the room's current
    /// rate.
    pub async fn modify_reservation(
        &self,
        reservation_id: &str,
        update: ReservationUpdate,
        actor: &Actor,
    ) -> DomainResult<Reservation> {
        requests::check(&update)?;

        let current = self.load(reservation_id).await?;
        if !actor.may_manage(&current.guest_id) {
            return Err(DomainError::Forbidden(format!(
                "reservation {} belongs to another guest",
                reservation_id
            )));
        }
        if update.is_empty() {
            return Ok(current);
        }

        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        state_machine::ensure_modifiable(&reservation.status)?;

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, reservation.room_id)
            .await?
            .ok_or_else(|| not_found("Room", reservation.room_id.to_string()))?;

        if update.changes_dates() {
            let check_in = update.check_in_date.unwrap_or(reservation.check_in_date);
            let check_out = update.check_out_date.unwrap_or(reservation.check_out_date);
            ensure_date_order(check_in, check_out)?;

            let conflict = self
                .repos
                .reservations()
                .has_conflict(&txn, room.id, check_in, check_out, Some(&reservation.id))
                .await?;
            if conflict {
                return Err(DomainError::RoomUnavailable {
                    room_id: room.id,
                    check_in,
                    check_out,
                });
            }

            let quote = pricing::quote(room.nightly_rate(), check_in, check_out)?;
            reservation.check_in_date = check_in;
            reservation.check_out_date = check_out;
            reservation.nights = quote.nights;
            reservation.nightly_rate = room.nightly_rate();
            reservation.total_amount = quote.total;
        }

        if let Some(count) = update.occupant_count {
            if count > room.max_occupancy {
                return Err(DomainError::OccupancyExceeded {
                    requested: count,
                    max_occupancy: room.max_occupancy,
                });
            }
            reservation.occupant_count = count;
        }

        if let Some(requests) = update.special_requests {
            reservation.special_requests = Some(requests);
        }

        reservation.updated_at = Utc::now();
        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            total = %reservation.total_amount,
            "Reservation modified"
        );

        self.events.publish(BookingEvent::ReservationModified {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
            check_in_date: reservation.check_in_date,
            check_out_date: reservation.check_out_date,
            total_amount: reservation.total_amount.to_string(),
        });

        Ok(reservation)
    }

    /// Cancel a reservation from `Confirmed` or `CheckedIn` (the latter
    /// is the administrative override). The room is released when this
    /// stay was the occupant; money already taken flips the payment
    /// status to `RefundDue`.
    pub async fn cancel_reservation(
        &self,
        reservation_id: &str,
        reason: impl Into<String>,
        actor: &Actor,
    ) -> DomainResult<Reservation> {
        let current = self.load(reservation_id).await?;
        if !actor.may_manage(&current.guest_id) {
            return Err(DomainError::Forbidden(format!(
                "reservation {} belongs to another guest",
                reservation_id
            )));
        }

        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        let ctx = transition_ctx(&reservation);
        reservation.status = state_machine::transition(
            reservation.status.clone(),
            ReservationStatus::Cancelled,
            &ctx,
        )?;
        reservation.cancellation_reason = Some(reason.into());
        if matches!(
            reservation.payment_status,
            PaymentStatus::Paid | PaymentStatus::PartiallyPaid
        ) {
            reservation.payment_status = PaymentStatus::RefundDue;
        }
        reservation.updated_at = Utc::now();

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, reservation.room_id)
            .await?
            .ok_or_else(|| not_found("Room", reservation.room_id.to_string()))?;
        self.sync_room(&txn, &room, &reservation, RoomEvent::Cancelled)
            .await?;

        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            "Reservation cancelled"
        );

        self.events.publish(BookingEvent::ReservationCancelled {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
            reason: reservation.cancellation_reason.clone().unwrap_or_default(),
        });

        Ok(reservation)
    }

    /// Check the guest in. Rejected before the stay's check-in date.
    pub async fn check_in(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let current = self.load(reservation_id).await?;
        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        let ctx = transition_ctx(&reservation);
        reservation.status = state_machine::transition(
            reservation.status.clone(),
            ReservationStatus::CheckedIn,
            &ctx,
        )?;
        reservation.actual_check_in = Some(Utc::now());
        reservation.updated_at = Utc::now();

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, reservation.room_id)
            .await?
            .ok_or_else(|| not_found("Room", reservation.room_id.to_string()))?;
        self.sync_room(&txn, &room, &reservation, RoomEvent::CheckedIn)
            .await?;

        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            "Guest checked in"
        );

        self.events.publish(BookingEvent::GuestCheckedIn {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
        });

        Ok(reservation)
    }

    /// Check the guest out and release the room.
    pub async fn check_out(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let current = self.load(reservation_id).await?;
        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        let ctx = transition_ctx(&reservation);
        reservation.status = state_machine::transition(
            reservation.status.clone(),
            ReservationStatus::CheckedOut,
            &ctx,
        )?;
        reservation.actual_check_out = Some(Utc::now());
        reservation.updated_at = Utc::now();

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, reservation.room_id)
            .await?
            .ok_or_else(|| not_found("Room", reservation.room_id.to_string()))?;
        self.sync_room(&txn, &room, &reservation, RoomEvent::CheckedOut)
            .await?;

        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            "Guest checked out"
        );

        self.events.publish(BookingEvent::GuestCheckedOut {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
        });

        Ok(reservation)
    }

    /// Mark a confirmed reservation whose guest never arrived. Driven by
    /// the no-show sweeper or called directly by staff; the room is
    /// released the same way a cancellation releases it.
    pub async fn mark_no_show(&self, reservation_id: &str) -> DomainResult<Reservation> {
        let current = self.load(reservation_id).await?;
        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        let ctx = transition_ctx(&reservation);
        reservation.status = state_machine::transition(
            reservation.status.clone(),
            ReservationStatus::NoShow,
            &ctx,
        )?;
        reservation.updated_at = Utc::now();

        let room = self
            .repos
            .rooms()
            .find_by_id_for_update(&txn, reservation.room_id)
            .await?
            .ok_or_else(|| not_found("Room", reservation.room_id.to_string()))?;
        self.sync_room(&txn, &room, &reservation, RoomEvent::Cancelled)
            .await?;

        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            room_id = reservation.room_id,
            "Reservation marked no-show"
        );

        self.events.publish(BookingEvent::ReservationNoShow {
            reservation_id: reservation.id.clone(),
            room_id: reservation.room_id,
        });

        Ok(reservation)
    }

    /// Payment bookkeeping from the payment collaborator. Allowed in any
    /// reservation status, including terminal ones.
    pub async fn update_payment_status(
        &self,
        reservation_id: &str,
        status: PaymentStatus,
    ) -> DomainResult<Reservation> {
        let current = self.load(reservation_id).await?;
        let _room_guard = self.locks.acquire(current.room_id).await?;
        let txn = self.db.begin().await?;

        let mut reservation = self.reload(&txn, reservation_id).await?;
        reservation.payment_status = status;
        reservation.updated_at = Utc::now();

        self.repos
            .reservations()
            .update(&txn, reservation.clone())
            .await?;

        txn.commit().await?;

        info!(
            reservation_id = %reservation.id,
            payment_status = %reservation.payment_status,
            "Payment status updated"
        );

        Ok(reservation)
    }

    /// Fetch a reservation (read-only).
    pub async fn get_reservation(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.load(reservation_id).await
    }

    // ── Internals ──────────────────────────────────────────────

    async fn load(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| not_found("Reservation", reservation_id.to_string()))
    }

    async fn reload(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        reservation_id: &str,
    ) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id_for_update(txn, reservation_id)
            .await?
            .ok_or_else(|| not_found("Reservation", reservation_id.to_string()))
    }

    async fn sync_room(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        room: &Room,
        reservation: &Reservation,
        event: RoomEvent,
    ) -> DomainResult<()> {
        let today = Utc::now().date_naive();
        if let Some(next) = room_status::derive(&room.status, reservation, event, today) {
            self.repos.rooms().update_status(txn, room.id, next).await?;
        }
        Ok(())
    }
}

fn ensure_date_order(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<()> {
    if check_in >= check_out {
        return Err(DomainError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(())
}

fn transition_ctx(reservation: &Reservation) -> TransitionContext {
    TransitionContext {
        today: Utc::now().date_naive(),
        check_in_date: reservation.check_in_date,
    }
}

fn not_found(entity: &'static str, value: String) -> DomainError {
    DomainError::NotFound {
        entity,
        field: "id",
        value,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration as ChronoDuration;
    use rust_decimal::Decimal;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use crate::domain::room::RoomStatus;
    use crate::domain::Guest;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::notifications::create_event_bus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn test_service() -> (BookingService, Arc<dyn RepositoryProvider>, String) {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let room = Room::new(101, "101", "Standard", dec("100.00"), 2);
        repos.rooms().save(room).await.unwrap();

        let guest = Guest::new("Ada Lovelace", "ada@example.com");
        let guest_id = guest.id.clone();
        repos.guests().save(guest).await.unwrap();

        let service = BookingService::new(db, repos.clone(), create_event_bus());
        (service, repos, guest_id)
    }

    fn booking(
        guest_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> CreateReservationRequest {
        CreateReservationRequest {
            guest_id: guest_id.into(),
            room_id: 101,
            check_in_date: check_in,
            check_out_date: check_out,
            occupant_count: 2,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn four_night_stay_is_priced_and_confirmed() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        assert_eq!(r.nights, 4);
        assert_eq!(r.total_amount, dec("400.00"));
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(r.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let (service, _, guest_id) = test_service().await;

        service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        let err = service
            .create_reservation(booking(&guest_id, date(2024, 3, 3), date(2024, 3, 6)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));
    }

    #[tokio::test]
    async fn back_to_back_stays_are_allowed() {
        let (service, _, guest_id) = test_service().await;

        service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        // starts exactly when the prior stay ends - half-open intervals
        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 5), date(2024, 3, 8)))
            .await
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn cancelled_dates_can_be_rebooked() {
        let (service, repos, guest_id) = test_service().await;
        let today = Utc::now().date_naive();
        let check_out = today + ChronoDuration::days(4);

        let r = service
            .create_reservation(booking(&guest_id, today, check_out))
            .await
            .unwrap();

        // booking starting today marks the room occupied
        let room = repos.rooms().find_by_id(101).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Occupied);

        service
            .cancel_reservation(&r.id, "change of plans", &Actor::Staff)
            .await
            .unwrap();

        let room = repos.rooms().find_by_id(101).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);

        // the freed dates can be booked again
        let again = service
            .create_reservation(booking(&guest_id, today, check_out))
            .await
            .unwrap();
        assert_eq!(again.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn check_out_without_check_in_is_illegal() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        let err = service.check_out(&r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn concurrent_bookings_cannot_both_win() {
        let (service, _, guest_id) = test_service().await;
        let service = Arc::new(service);

        let a = {
            let service = service.clone();
            let req = booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5));
            tokio::spawn(async move { service.create_reservation(req).await })
        };
        let b = {
            let service = service.clone();
            let req = booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5));
            tokio::spawn(async move { service.create_reservation(req).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let err = if a.is_err() {
            a.unwrap_err()
        } else {
            b.unwrap_err()
        };
        assert!(err.is_retryable(), "loser must get a retryable error: {err}");
    }

    #[tokio::test]
    async fn failed_booking_leaves_no_trace() {
        let (service, repos, guest_id) = test_service().await;
        let today = Utc::now().date_naive();

        // conflict check passes, capacity check fails (room sleeps 2)
        let mut req = booking(&guest_id, today, today + ChronoDuration::days(2));
        req.occupant_count = 5;
        let err = service.create_reservation(req).await.unwrap_err();
        assert!(matches!(err, DomainError::OccupancyExceeded { .. }));

        let reservations = repos.reservations().find_for_room(101).await.unwrap();
        assert!(reservations.is_empty());

        let room = repos.rooms().find_by_id(101).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn modify_does_not_conflict_with_itself() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        // shift by one day; overlaps the old interval, which is excluded
        let update = ReservationUpdate {
            check_in_date: Some(date(2024, 3, 2)),
            check_out_date: Some(date(2024, 3, 6)),
            ..Default::default()
        };
        let modified = service
            .modify_reservation(&r.id, update, &Actor::Staff)
            .await
            .unwrap();

        assert_eq!(modified.check_in_date, date(2024, 3, 2));
        assert_eq!(modified.nights, 4);
        assert_eq!(modified.total_amount, dec("400.00"));
    }

    #[tokio::test]
    async fn modify_into_another_stay_is_rejected() {
        let (service, _, guest_id) = test_service().await;

        service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();
        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 5), date(2024, 3, 8)))
            .await
            .unwrap();

        let update = ReservationUpdate {
            check_in_date: Some(date(2024, 3, 4)),
            ..Default::default()
        };
        let err = service
            .modify_reservation(&r.id, update, &Actor::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));
    }

    #[tokio::test]
    async fn modify_reprices_the_stay() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        let update = ReservationUpdate {
            check_out_date: Some(date(2024, 3, 8)),
            ..Default::default()
        };
        let modified = service
            .modify_reservation(&r.id, update, &Actor::Staff)
            .await
            .unwrap();

        assert_eq!(modified.nights, 7);
        assert_eq!(modified.total_amount, dec("700.00"));
    }

    #[tokio::test]
    async fn terminal_reservation_is_immutable() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();
        service
            .cancel_reservation(&r.id, "guest request", &Actor::Staff)
            .await
            .unwrap();

        let update = ReservationUpdate {
            occupant_count: Some(1),
            ..Default::default()
        };
        let err = service
            .modify_reservation(&r.id, update, &Actor::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn empty_update_returns_reservation_unchanged() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();
        let same = service
            .modify_reservation(&r.id, ReservationUpdate::default(), &Actor::Staff)
            .await
            .unwrap();
        assert_eq!(same.total_amount, r.total_amount);
        assert_eq!(same.check_in_date, r.check_in_date);
    }

    #[tokio::test]
    async fn premature_check_in_is_rejected() {
        let (service, _, guest_id) = test_service().await;
        let tomorrow = Utc::now().date_naive() + ChronoDuration::days(1);

        let r = service
            .create_reservation(booking(&guest_id, tomorrow, tomorrow + ChronoDuration::days(3)))
            .await
            .unwrap();

        let err = service.check_in(&r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::PrematureCheckIn { .. }));
    }

    #[tokio::test]
    async fn check_in_and_out_drive_room_occupancy() {
        let (service, repos, guest_id) = test_service().await;
        let today = Utc::now().date_naive();

        let r = service
            .create_reservation(booking(&guest_id, today, today + ChronoDuration::days(2)))
            .await
            .unwrap();

        let r = service.check_in(&r.id).await.unwrap();
        assert_eq!(r.status, ReservationStatus::CheckedIn);
        assert!(r.actual_check_in.is_some());
        let room = repos.rooms().find_by_id(101).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Occupied);

        let r = service.check_out(&r.id).await.unwrap();
        assert_eq!(r.status, ReservationStatus::CheckedOut);
        assert!(r.actual_check_out.is_some());
        let room = repos.rooms().find_by_id(101).await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn cancelling_a_paid_stay_flags_a_refund() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();
        service
            .update_payment_status(&r.id, PaymentStatus::Paid)
            .await
            .unwrap();

        let cancelled = service
            .cancel_reservation(&r.id, "illness", &Actor::Staff)
            .await
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::RefundDue);
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("illness"));
    }

    #[tokio::test]
    async fn guest_cannot_cancel_someone_elses_stay() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        let intruder = Actor::Guest {
            guest_id: "someone-else".into(),
        };
        let err = service
            .cancel_reservation(&r.id, "not mine", &intruder)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn payment_bookkeeping_survives_cancellation() {
        let (service, _, guest_id) = test_service().await;

        let r = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();
        service
            .cancel_reservation(&r.id, "guest request", &Actor::Staff)
            .await
            .unwrap();

        // terminal status, payment field still writable
        let updated = service
            .update_payment_status(&r.id, PaymentStatus::RefundDue)
            .await
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::RefundDue);
        assert_eq!(updated.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn overdue_confirmed_stay_can_be_marked_no_show() {
        let (service, _, guest_id) = test_service().await;
        let yesterday = Utc::now().date_naive() - ChronoDuration::days(1);

        let r = service
            .create_reservation(booking(&guest_id, yesterday, yesterday + ChronoDuration::days(3)))
            .await
            .unwrap();

        let r = service.mark_no_show(&r.id).await.unwrap();
        assert_eq!(r.status, ReservationStatus::NoShow);

        // terminal: nothing else may happen to it
        let err = service.check_in(&r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn unknown_guest_and_room_are_not_found() {
        let (service, _, guest_id) = test_service().await;

        let mut req = booking("no-such-guest", date(2024, 3, 1), date(2024, 3, 5));
        req.room_id = 101;
        let err = service.create_reservation(req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Guest", .. }));

        let mut req = booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5));
        req.room_id = 999;
        let err = service.create_reservation(req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
    }

    #[tokio::test]
    async fn reversed_dates_are_rejected_before_any_write() {
        let (service, repos, guest_id) = test_service().await;

        let err = service
            .create_reservation(booking(&guest_id, date(2024, 3, 5), date(2024, 3, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange { .. }));

        let reservations = repos.reservations().find_for_room(101).await.unwrap();
        assert!(reservations.is_empty());
    }

    #[tokio::test]
    async fn deactivated_room_refuses_bookings() {
        let (service, repos, guest_id) = test_service().await;
        repos.rooms().deactivate(101).await.unwrap();

        let err = service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_publishes_an_event() {
        let (service, _, guest_id) = test_service().await;
        let mut subscriber = service.events.subscribe();

        service
            .create_reservation(booking(&guest_id, date(2024, 3, 1), date(2024, 3, 5)))
            .await
            .unwrap();

        let message = subscriber.recv().await.unwrap();
        assert_eq!(message.event.event_type(), "reservation_created");
    }
}
