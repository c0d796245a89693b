pub mod booking;

pub use booking::{Actor, BookingService, CreateReservationRequest, ReservationUpdate};
