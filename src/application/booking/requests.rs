//! Booking operation inputs
//!
//! The request layer is assumed to have authenticated the caller; shape
//! validation still happens here, before any write. Modifications go
//! through [`ReservationUpdate`], a closed set of editable fields -
//! anything not listed cannot be changed through the booking engine.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{DomainError, DomainResult};

/// Who is asking. Supplied by the identity collaborator; the engine
/// trusts it and only checks ownership on cancel/modify.
#[derive(Debug, Clone)]
pub enum Actor {
    Guest { guest_id: String },
    Staff,
}

impl Actor {
    /// Ownership check for guest-initiated edits.
    pub fn may_manage(&self, reservation_guest_id: &str) -> bool {
        match self {
            Actor::Staff => true,
            Actor::Guest { guest_id } => guest_id == reservation_guest_id,
        }
    }
}

/// Input for `create_reservation`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, message = "guest_id must not be empty"))]
    pub guest_id: String,

    pub room_id: i32,

    pub check_in_date: NaiveDate,

    pub check_out_date: NaiveDate,

    #[validate(range(min = 1, message = "occupant_count must be at least 1"))]
    pub occupant_count: i32,

    #[validate(length(max = 500, message = "special_requests is limited to 500 characters"))]
    pub special_requests: Option<String>,
}

/// Closed set of fields `modify_reservation` may change. Absent fields
/// keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReservationUpdate {
    pub check_in_date: Option<NaiveDate>,

    pub check_out_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "occupant_count must be at least 1"))]
    pub occupant_count: Option<i32>,

    #[validate(length(max = 500, message = "special_requests is limited to 500 characters"))]
    pub special_requests: Option<String>,
}

impl ReservationUpdate {
    pub fn changes_dates(&self) -> bool {
        self.check_in_date.is_some() || self.check_out_date.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.check_in_date.is_none()
            && self.check_out_date.is_none()
            && self.occupant_count.is_none()
            && self.special_requests.is_none()
    }
}

/// Run `validator` checks and map failures into the domain taxonomy.
pub fn check<T: Validate>(input: &T) -> DomainResult<()> {
    input
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_create() -> CreateReservationRequest {
        CreateReservationRequest {
            guest_id: "guest-1".into(),
            room_id: 101,
            check_in_date: date(2024, 3, 1),
            check_out_date: date(2024, 3, 5),
            occupant_count: 2,
            special_requests: None,
        }
    }

    #[test]
    fn valid_create_request_passes() {
        assert!(check(&sample_create()).is_ok());
    }

    #[test]
    fn zero_occupants_is_rejected() {
        let mut req = sample_create();
        req.occupant_count = 0;
        let err = check(&req).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_guest_id_is_rejected() {
        let mut req = sample_create();
        req.guest_id = String::new();
        assert!(check(&req).is_err());
    }

    #[test]
    fn oversized_special_requests_are_rejected() {
        let mut req = sample_create();
        req.special_requests = Some("x".repeat(501));
        assert!(check(&req).is_err());
    }

    #[test]
    fn update_with_no_fields_is_empty() {
        let update = ReservationUpdate::default();
        assert!(update.is_empty());
        assert!(!update.changes_dates());
        assert!(check(&update).is_ok());
    }

    #[test]
    fn update_with_one_date_changes_dates() {
        let update = ReservationUpdate {
            check_out_date: Some(date(2024, 3, 6)),
            ..Default::default()
        };
        assert!(update.changes_dates());
        assert!(!update.is_empty());
    }

    #[test]
    fn update_rejects_zero_occupants() {
        let update = ReservationUpdate {
            occupant_count: Some(0),
            ..Default::default()
        };
        assert!(check(&update).is_err());
    }

    #[test]
    fn staff_may_manage_any_reservation() {
        assert!(Actor::Staff.may_manage("guest-1"));
    }

    #[test]
    fn guest_may_only_manage_own_reservation() {
        let actor = Actor::Guest {
            guest_id: "guest-1".into(),
        };
        assert!(actor.may_manage("guest-1"));
        assert!(!actor.may_manage("guest-2"));
    }
}
