//! Repository provider
//!
//! One object giving the application layer access to every aggregate's
//! repository without knowing the backing store.

use crate::domain::guest::GuestRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::room::RoomRepository;

pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;

    fn guests(&self) -> &dyn GuestRepository;

    fn reservations(&self) -> &dyn ReservationRepository;
}
