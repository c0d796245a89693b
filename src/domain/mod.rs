pub mod error;
pub mod guest;
pub mod pricing;
pub mod repositories;
pub mod reservation;
pub mod room;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use guest::{Guest, GuestRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{
    PaymentStatus, Reservation, ReservationRepository, ReservationStatus,
};
pub use room::{Room, RoomRepository, RoomStatus};
