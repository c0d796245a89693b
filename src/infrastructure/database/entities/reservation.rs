//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub room_id: i32,

    pub guest_id: String,

    /// First occupied night; the stay is `[check_in_date, check_out_date)`
    pub check_in_date: Date,

    pub check_out_date: Date,

    pub occupant_count: i32,

    pub nights: i64,

    /// Nightly rate snapshot in minor currency units (cents)
    pub nightly_rate_minor: i64,

    /// Stay total in minor currency units
    pub total_amount_minor: i64,

    /// Reservation status: Confirmed, CheckedIn, CheckedOut, Cancelled, NoShow
    pub status: String,

    /// Payment status: Pending, Paid, PartiallyPaid, RefundDue
    pub payment_status: String,

    #[sea_orm(nullable)]
    pub special_requests: Option<String>,

    #[sea_orm(nullable)]
    pub cancellation_reason: Option<String>,

    #[sea_orm(nullable)]
    pub actual_check_in: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub actual_check_out: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,

    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
