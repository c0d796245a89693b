//! Room repository interface
//!
//! Methods taking a [`DatabaseTransaction`] participate in an orchestrated
//! booking transaction; the rest operate on the shared pool.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use super::model::{Room, RoomStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a new room (administrative)
    async fn save(&self, room: Room) -> DomainResult<Room>;

    /// Update a room's administrative fields (rates, capacity, category)
    async fn update(&self, room: Room) -> DomainResult<()>;

    /// Find a room by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Find a room by ID inside an open booking transaction
    async fn find_by_id_for_update(
        &self,
        txn: &DatabaseTransaction,
        id: i32,
    ) -> DomainResult<Option<Room>>;

    /// Find a room by its human-facing number
    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>>;

    /// List all rooms
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Set the occupancy status inside an open booking transaction
    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        id: i32,
        status: RoomStatus,
    ) -> DomainResult<()>;

    /// Set the occupancy status directly (housekeeping / maintenance)
    async fn set_status(&self, id: i32, status: RoomStatus) -> DomainResult<()>;

    /// Soft-deactivate a room; history is kept, new bookings are refused
    async fn deactivate(&self, id: i32) -> DomainResult<()>;
}
