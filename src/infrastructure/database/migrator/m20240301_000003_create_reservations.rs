//! Create reservations table
//!
//! Reservation rows are never deleted; cancellation is a terminal status.
//! The composite (room, dates) index backs the overlap probe that guards
//! the no-double-booking invariant.

use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_rooms::Rooms;
use super::m20240301_000002_create_guests::Guests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::RoomId).integer().not_null())
                    .col(ColumnDef::new(Reservations::GuestId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::CheckInDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::CheckOutDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::OccupantCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Reservations::Nights).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::NightlyRateMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::TotalAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Confirmed"),
                    )
                    .col(
                        ColumnDef::new(Reservations::PaymentStatus)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Reservations::SpecialRequests).string())
                    .col(ColumnDef::new(Reservations::CancellationReason).string())
                    .col(ColumnDef::new(Reservations::ActualCheckIn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Reservations::ActualCheckOut).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_room")
                            .from(Reservations::Table, Reservations::RoomId)
                            .to(Rooms::Table, Rooms::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_guest")
                            .from(Reservations::Table, Reservations::GuestId)
                            .to(Guests::Table, Guests::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_room_dates")
                    .table(Reservations::Table)
                    .col(Reservations::RoomId)
                    .col(Reservations::CheckInDate)
                    .col(Reservations::CheckOutDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_guest")
                    .table(Reservations::Table)
                    .col(Reservations::GuestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    RoomId,
    GuestId,
    CheckInDate,
    CheckOutDate,
    OccupantCount,
    Nights,
    NightlyRateMinor,
    TotalAmountMinor,
    Status,
    PaymentStatus,
    SpecialRequests,
    CancellationReason,
    ActualCheckIn,
    ActualCheckOut,
    CreatedAt,
    UpdatedAt,
}
