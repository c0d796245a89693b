//! SeaORM implementation of GuestRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::guest::{Guest, GuestRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::guest;

pub struct SeaOrmGuestRepository {
    db: DatabaseConnection,
}

impl SeaOrmGuestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: guest::Model) -> Guest {
    Guest {
        id: m.id,
        full_name: m.full_name,
        email: m.email,
        phone: m.phone,
        created_at: m.created_at,
    }
}

#[async_trait]
impl GuestRepository for SeaOrmGuestRepository {
    async fn save(&self, g: Guest) -> DomainResult<()> {
        debug!("Saving guest: {}", g.id);

        let model = guest::ActiveModel {
            id: Set(g.id),
            full_name: Set(g.full_name),
            email: Set(g.email),
            phone: Set(g.phone),
            created_at: Set(g.created_at),
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Guest>> {
        let model = guest::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Guest>> {
        let model = guest::Entity::find()
            .filter(guest::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }
}

// ── Tests ──────────────────────────────────────────────────────
