pub mod guest_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;

pub use guest_repository::SeaOrmGuestRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use room_repository::SeaOrmRoomRepository;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// Money is stored as integer minor currency units (cents).
pub(crate) fn to_minor_units(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("amount {} out of range", amount)))
}

pub(crate) fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

// ── Tests ──────────────────────────────────────────────────────
