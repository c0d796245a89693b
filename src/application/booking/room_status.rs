//! Room occupancy synchronization
//!
//! Derives the room status that follows from a reservation lifecycle
//! event. Pure derivation; the booking service applies the result inside
//! its transaction. Keyed to the triggering reservation's dates so a
//! cancellation of a future stay never clobbers an occupancy owed to a
//! different, current stay.

use chrono::NaiveDate;

use crate::domain::reservation::Reservation;
use crate::domain::room::RoomStatus;

/// Reservation lifecycle events the room reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    Created,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

/// Next room status implied by `event`, or `None` when the room should
/// be left untouched.
pub fn derive(
    current: &RoomStatus,
    reservation: &Reservation,
    event: RoomEvent,
    today: NaiveDate,
) -> Option<RoomStatus> {
    match event {
        // A booking starting today occupies the room at once; a future
        // booking does not.
        RoomEvent::Created => {
            if reservation.check_in_date == today {
                Some(RoomStatus::Occupied)
            } else {
                None
            }
        }
        RoomEvent::CheckedIn => Some(RoomStatus::Occupied),
        // Housekeeping turnover is an external workflow; the room goes
        // straight back to Available here.
        RoomEvent::CheckedOut => Some(RoomStatus::Available),
        // Release only if this reservation is the plausible occupant:
        // the stay covers today, or the guest is physically in-house.
        RoomEvent::Cancelled => {
            let was_occupant = reservation.occupies(today) || reservation.is_in_house();
            if *current == RoomStatus::Occupied && was_occupant {
                Some(RoomStatus::Available)
            } else {
                None
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation::new(
            101,
            "guest-1",
            check_in,
            check_out,
            2,
            (check_out - check_in).num_days(),
            Decimal::from(100),
            Decimal::from(100) * Decimal::from((check_out - check_in).num_days()),
            None,
        )
    }

    #[test]
    fn same_day_booking_occupies_immediately() {
        let today = date(2024, 3, 1);
        let r = stay(today, date(2024, 3, 5));
        assert_eq!(
            derive(&RoomStatus::Available, &r, RoomEvent::Created, today),
            Some(RoomStatus::Occupied)
        );
    }

    #[test]
    fn future_booking_leaves_room_alone() {
        let today = date(2024, 2, 1);
        let r = stay(date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(
            derive(&RoomStatus::Available, &r, RoomEvent::Created, today),
            None
        );
    }

    #[test]
    fn check_in_occupies() {
        let today = date(2024, 3, 1);
        let r = stay(today, date(2024, 3, 5));
        assert_eq!(
            derive(&RoomStatus::Available, &r, RoomEvent::CheckedIn, today),
            Some(RoomStatus::Occupied)
        );
    }

    #[test]
    fn check_out_releases() {
        let today = date(2024, 3, 5);
        let r = stay(date(2024, 3, 1), today);
        assert_eq!(
            derive(&RoomStatus::Occupied, &r, RoomEvent::CheckedOut, today),
            Some(RoomStatus::Available)
        );
    }

    #[test]
    fn cancelling_current_stay_releases_room() {
        let today = date(2024, 3, 2);
        let r = stay(date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(
            derive(&RoomStatus::Occupied, &r, RoomEvent::Cancelled, today),
            Some(RoomStatus::Available)
        );
    }

    #[test]
    fn cancelling_future_stay_keeps_other_occupancy() {
        // Room occupied by someone else; a future booking is cancelled.
        let today = date(2024, 3, 2);
        let r = stay(date(2024, 4, 1), date(2024, 4, 5));
        assert_eq!(
            derive(&RoomStatus::Occupied, &r, RoomEvent::Cancelled, today),
            None
        );
    }

    #[test]
    fn cancelling_when_room_already_free_is_a_no_op() {
        let today = date(2024, 3, 2);
        let r = stay(date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(
            derive(&RoomStatus::Available, &r, RoomEvent::Cancelled, today),
            None
        );
    }

    #[test]
    fn cancelling_in_house_overstay_releases_room() {
        // Checked in, never checked out, past the planned check-out date.
        let today = date(2024, 3, 7);
        let mut r = stay(date(2024, 3, 1), date(2024, 3, 5));
        r.actual_check_in = Some(chrono::Utc::now());
        assert_eq!(
            derive(&RoomStatus::Occupied, &r, RoomEvent::Cancelled, today),
            Some(RoomStatus::Available)
        );
    }
}
