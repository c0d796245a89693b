//! SeaORM implementation of ReservationRepository
//!
//! The overlap probe runs on the caller's open transaction handle, never
//! on the pool, so it shares the isolation scope of the write that
//! follows it.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::reservation::{
    PaymentStatus, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;
use crate::shared::types::{PaginatedResult, PaginationParams};

use super::{from_minor_units, to_minor_units};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        room_id: m.room_id,
        guest_id: m.guest_id,
        check_in_date: m.check_in_date,
        check_out_date: m.check_out_date,
        occupant_count: m.occupant_count,
        nights: m.nights,
        nightly_rate: from_minor_units(m.nightly_rate_minor),
        total_amount: from_minor_units(m.total_amount_minor),
        status: ReservationStatus::from_str(&m.status),
        payment_status: PaymentStatus::from_str(&m.payment_status),
        special_requests: m.special_requests,
        cancellation_reason: m.cancellation_reason,
        actual_check_in: m.actual_check_in,
        actual_check_out: m.actual_check_out,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &Reservation) -> DomainResult<reservation::ActiveModel> {
    Ok(reservation::ActiveModel {
        id: Set(r.id.clone()),
        room_id: Set(r.room_id),
        guest_id: Set(r.guest_id.clone()),
        check_in_date: Set(r.check_in_date),
        check_out_date: Set(r.check_out_date),
        occupant_count: Set(r.occupant_count),
        nights: Set(r.nights),
        nightly_rate_minor: Set(to_minor_units(r.nightly_rate)?),
        total_amount_minor: Set(to_minor_units(r.total_amount)?),
        status: Set(r.status.as_str().to_string()),
        payment_status: Set(r.payment_status.as_str().to_string()),
        special_requests: Set(r.special_requests.clone()),
        cancellation_reason: Set(r.cancellation_reason.clone()),
        actual_check_in: Set(r.actual_check_in),
        actual_check_out: Set(r.actual_check_out),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    })
}

/// Statuses that hold the room against other bookings
const BLOCKING_STATUSES: [&str; 2] = ["Confirmed", "CheckedIn"];

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        reservation: Reservation,
    ) -> DomainResult<()> {
        debug!("Inserting reservation: {}", reservation.id);

        let model = domain_to_active(&reservation)?;
        model.insert(txn).await?;
        Ok(())
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        reservation: Reservation,
    ) -> DomainResult<()> {
        debug!("Updating reservation: {}", reservation.id);

        let existing = reservation::Entity::find_by_id(&reservation.id)
            .one(txn)
            .await?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id.clone(),
            });
        }

        let model = domain_to_active(&reservation)?;
        model.update(txn).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_update(
        &self,
        txn: &DatabaseTransaction,
        id: &str,
    ) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id).one(txn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn has_conflict(
        &self,
        txn: &DatabaseTransaction,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<&str>,
    ) -> DomainResult<bool> {
        // half-open overlap: existing.check_in < check_out
        //                AND existing.check_out > check_in
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .filter(reservation::Column::Status.is_in(BLOCKING_STATUSES))
            .filter(reservation::Column::CheckInDate.lt(check_out))
            .filter(reservation::Column::CheckOutDate.gt(check_in));

        if let Some(id) = exclude_id {
            query = query.filter(reservation::Column::Id.ne(id));
        }

        let conflicting = query.count(txn).await?;
        Ok(conflicting > 0)
    }

    async fn find_for_room(&self, room_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .order_by_desc(reservation::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_guest(
        &self,
        guest_id: &str,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let page = pagination.page.max(1);
        let limit = pagination.limit.max(1);

        let paginator = reservation::Entity::find()
            .filter(reservation::Column::GuestId.eq(guest_id))
            .order_by_desc(reservation::Column::CreatedAt)
            .paginate(&self.db, limit as u64);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page((page - 1) as u64).await?;
        let items = models.into_iter().map(model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn find_overdue(&self, today: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()))
            .filter(reservation::Column::CheckInDate.lt(today))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────
