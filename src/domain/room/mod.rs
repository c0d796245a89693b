pub mod model;
pub mod repository;

pub use model::{Room, RoomStatus};
pub use repository::RoomRepository;
