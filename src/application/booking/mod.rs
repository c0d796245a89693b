pub mod no_show;
pub mod requests;
pub mod room_locks;
pub mod room_status;
pub mod service;

pub use no_show::start_no_show_sweeper;
pub use requests::{Actor, CreateReservationRequest, ReservationUpdate};
pub use room_locks::RoomLockRegistry;
pub use room_status::RoomEvent;
pub use service::BookingService;
