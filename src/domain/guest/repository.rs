//! Guest repository interface

use async_trait::async_trait;

use super::model::Guest;
use crate::domain::DomainResult;

#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Register a new guest
    async fn save(&self, guest: Guest) -> DomainResult<()>;

    /// Find a guest by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Guest>>;

    /// Find a guest by email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Guest>>;
}
