pub mod guest;
pub mod reservation;
pub mod room;
