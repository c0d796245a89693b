//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::room::{Room, RoomRepository, RoomStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

use super::{from_minor_units, to_minor_units};

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        room_number: m.room_number,
        category: m.category,
        base_rate: from_minor_units(m.base_rate_minor),
        rate_adjustment: from_minor_units(m.rate_adjustment_minor),
        max_occupancy: m.max_occupancy,
        status: RoomStatus::from_str(&m.status),
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &Room) -> DomainResult<room::ActiveModel> {
    Ok(room::ActiveModel {
        id: Set(r.id),
        room_number: Set(r.room_number.clone()),
        category: Set(r.category.clone()),
        base_rate_minor: Set(to_minor_units(r.base_rate)?),
        rate_adjustment_minor: Set(to_minor_units(r.rate_adjustment)?),
        max_occupancy: Set(r.max_occupancy),
        status: Set(r.status.as_str().to_string()),
        is_active: Set(r.is_active),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    })
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn save(&self, room: Room) -> DomainResult<Room> {
        debug!("Saving room: {}", room.room_number);

        let model = domain_to_active(&room)?;
        model.insert(&self.db).await?;
        Ok(room)
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        debug!("Updating room: {}", room.id);

        let existing = room::Entity::find_by_id(room.id).one(&self.db).await?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: room.id.to_string(),
            });
        }

        let mut model = domain_to_active(&room)?;
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_id_for_update(
        &self,
        txn: &DatabaseTransaction,
        id: i32,
    ) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id).one(txn).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::RoomNumber)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        id: i32,
        status: RoomStatus,
    ) -> DomainResult<()> {
        debug!("Room {} status -> {}", id, status);

        let existing = room::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            })?;

        let mut active: room::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_status(&self, id: i32, status: RoomStatus) -> DomainResult<()> {
        let existing = room::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            })?;

        let mut active: room::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn deactivate(&self, id: i32) -> DomainResult<()> {
        let existing = room::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            })?;

        let mut active: room::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn test_repo() -> SeaOrmRoomRepository {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRoomRepository::new(db)
    }

    #[tokio::test]
    async fn save_and_find_roundtrips_rates() {
        let repo = test_repo().await;
        let mut room = Room::new(101, "101", "Deluxe", dec("129.99"), 3);
        room.rate_adjustment = dec("-5.49");
        repo.save(room).await.unwrap();

        let found = repo.find_by_id(101).await.unwrap().unwrap();
        assert_eq!(found.base_rate, dec("129.99"));
        assert_eq!(found.rate_adjustment, dec("-5.49"));
        assert_eq!(found.nightly_rate(), dec("124.50"));
        assert_eq!(found.max_occupancy, 3);
    }

    #[tokio::test]
    async fn find_by_number() {
        let repo = test_repo().await;
        repo.save(Room::new(101, "101", "Standard", dec("100.00"), 2))
            .await
            .unwrap();

        let found = repo.find_by_number("101").await.unwrap().unwrap();
        assert_eq!(found.id, 101);
        assert!(repo.find_by_number("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deactivate_keeps_the_row() {
        let repo = test_repo().await;
        repo.save(Room::new(101, "101", "Standard", dec("100.00"), 2))
            .await
            .unwrap();

        repo.deactivate(101).await.unwrap();
        let found = repo.find_by_id(101).await.unwrap().unwrap();
        assert!(!found.is_active);
    }

    #[tokio::test]
    async fn set_status_for_housekeeping() {
        let repo = test_repo().await;
        repo.save(Room::new(101, "101", "Standard", dec("100.00"), 2))
            .await
            .unwrap();

        repo.set_status(101, RoomStatus::Cleaning).await.unwrap();
        let found = repo.find_by_id(101).await.unwrap().unwrap();
        assert_eq!(found.status, RoomStatus::Cleaning);
    }

    #[tokio::test]
    async fn update_missing_room_is_not_found() {
        let repo = test_repo().await;
        let err = repo
            .update(Room::new(999, "999", "Standard", dec("100.00"), 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
