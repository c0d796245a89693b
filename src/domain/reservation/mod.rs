pub mod model;
pub mod repository;
pub mod state_machine;

pub use model::{overlaps, PaymentStatus, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
pub use state_machine::{transition, TransitionContext};
