//! Reservation status transition rules
//!
//! Legal transitions:
//!
//! ```text
//! Confirmed ──> CheckedIn ──> CheckedOut
//!     │             │
//!     ├──> Cancelled┘
//!     └──> NoShow
//! ```
//!
//! The functions here are side-effect free; the booking service applies
//! the result inside its transaction.

use chrono::NaiveDate;

use super::model::ReservationStatus;
use crate::domain::{DomainError, DomainResult};

/// Dates the transition rules need to judge a request.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext {
    /// The property's current business date
    pub today: NaiveDate,
    /// The stay's planned check-in date
    pub check_in_date: NaiveDate,
}

/// Validate a requested status change and return the status to persist.
///
/// Check-in is date-gated: a guest cannot be checked in before the
/// stay's check-in date. Every pair not listed is illegal, including
/// any transition out of a terminal status.
pub fn transition(
    current: ReservationStatus,
    requested: ReservationStatus,
    ctx: &TransitionContext,
) -> DomainResult<ReservationStatus> {
    use ReservationStatus::*;

    match (&current, &requested) {
        (Confirmed, CheckedIn) => {
            if ctx.today < ctx.check_in_date {
                Err(DomainError::PrematureCheckIn {
                    check_in: ctx.check_in_date,
                    today: ctx.today,
                })
            } else {
                Ok(CheckedIn)
            }
        }
        (Confirmed, Cancelled) => Ok(Cancelled),
        (Confirmed, NoShow) => Ok(NoShow),
        (CheckedIn, CheckedOut) => Ok(CheckedOut),
        // administrative override; the room is released like any cancel
        (CheckedIn, Cancelled) => Ok(Cancelled),
        _ => Err(DomainError::IllegalTransition {
            from: current.clone(),
            to: requested.clone(),
        }),
    }
}

/// Guard for field edits: a terminal reservation is immutable except for
/// payment-status bookkeeping.
pub fn ensure_modifiable(status: &ReservationStatus) -> DomainResult<()> {
    if status.is_terminal() {
        return Err(DomainError::IllegalTransition {
            from: status.clone(),
            to: status.clone(),
        });
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx_on(today: NaiveDate) -> TransitionContext {
        TransitionContext {
            today,
            check_in_date: date(2024, 3, 1),
        }
    }

    #[test]
    fn check_in_on_arrival_date() {
        let ctx = ctx_on(date(2024, 3, 1));
        let next = transition(ReservationStatus::Confirmed, ReservationStatus::CheckedIn, &ctx);
        assert_eq!(next.unwrap(), ReservationStatus::CheckedIn);
    }

    #[test]
    fn late_check_in_is_allowed() {
        let ctx = ctx_on(date(2024, 3, 2));
        let next = transition(ReservationStatus::Confirmed, ReservationStatus::CheckedIn, &ctx);
        assert_eq!(next.unwrap(), ReservationStatus::CheckedIn);
    }

    #[test]
    fn premature_check_in_is_rejected() {
        let ctx = ctx_on(date(2024, 2, 28));
        let err = transition(ReservationStatus::Confirmed, ReservationStatus::CheckedIn, &ctx)
            .unwrap_err();
        assert!(matches!(err, DomainError::PrematureCheckIn { .. }));
    }

    #[test]
    fn cancel_from_confirmed_and_checked_in() {
        let ctx = ctx_on(date(2024, 3, 1));
        assert!(transition(ReservationStatus::Confirmed, ReservationStatus::Cancelled, &ctx).is_ok());
        assert!(transition(ReservationStatus::CheckedIn, ReservationStatus::Cancelled, &ctx).is_ok());
    }

    #[test]
    fn check_out_requires_checked_in() {
        let ctx = ctx_on(date(2024, 3, 5));
        assert!(transition(ReservationStatus::CheckedIn, ReservationStatus::CheckedOut, &ctx).is_ok());

        let err = transition(ReservationStatus::Confirmed, ReservationStatus::CheckedOut, &ctx)
            .unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[test]
    fn no_show_only_from_confirmed() {
        let ctx = ctx_on(date(2024, 3, 2));
        assert!(transition(ReservationStatus::Confirmed, ReservationStatus::NoShow, &ctx).is_ok());
        assert!(transition(ReservationStatus::CheckedIn, ReservationStatus::NoShow, &ctx).is_err());
    }

    #[test]
    fn terminal_statuses_admit_nothing() {
        let ctx = ctx_on(date(2024, 3, 10));
        for terminal in [
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            for requested in [
                ReservationStatus::Confirmed,
                ReservationStatus::CheckedIn,
                ReservationStatus::CheckedOut,
                ReservationStatus::Cancelled,
                ReservationStatus::NoShow,
            ] {
                let err = transition(terminal.clone(), requested, &ctx).unwrap_err();
                assert!(matches!(err, DomainError::IllegalTransition { .. }));
            }
        }
    }

    #[test]
    fn reverse_check_in_is_illegal() {
        let ctx = ctx_on(date(2024, 3, 5));
        let err = transition(ReservationStatus::CheckedOut, ReservationStatus::CheckedIn, &ctx)
            .unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[test]
    fn modifiable_guard() {
        assert!(ensure_modifiable(&ReservationStatus::Confirmed).is_ok());
        assert!(ensure_modifiable(&ReservationStatus::CheckedIn).is_ok());
        assert!(ensure_modifiable(&ReservationStatus::CheckedOut).is_err());
        assert!(ensure_modifiable(&ReservationStatus::Cancelled).is_err());
        assert!(ensure_modifiable(&ReservationStatus::NoShow).is_err());
    }
}
