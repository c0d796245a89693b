//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Reservation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Booked, stay not started
    Confirmed,
    /// Guest is in the room
    CheckedIn,
    /// Stay completed
    CheckedOut,
    /// Cancelled by guest or staff
    Cancelled,
    /// Guest never arrived
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "NoShow",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Confirmed" => Self::Confirmed,
            "CheckedIn" => Self::CheckedIn,
            "CheckedOut" => Self::CheckedOut,
            "NoShow" => Self::NoShow,
            _ => Self::Cancelled,
        }
    }

    /// Terminal statuses admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled | Self::NoShow)
    }

    /// Statuses that hold the room: only these participate in the
    /// no-overlap check.
    pub fn blocks_room(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse payment state, maintained by the payment collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    PartiallyPaid,
    RefundDue,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::PartiallyPaid => "PartiallyPaid",
            Self::RefundDue => "RefundDue",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Paid" => Self::Paid,
            "PartiallyPaid" => Self::PartiallyPaid,
            "RefundDue" => Self::RefundDue,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open interval overlap: a stay occupies `[check_in, check_out)`,
/// so back-to-back stays sharing a turnover day do not conflict.
pub fn overlaps(
    a_check_in: NaiveDate,
    a_check_out: NaiveDate,
    b_check_in: NaiveDate,
    b_check_out: NaiveDate,
) -> bool {
    a_check_in < b_check_out && b_check_in < a_check_out
}

/// One guest's stay in one room
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: String,
    /// Room being occupied
    pub room_id: i32,
    /// Guest who booked
    pub guest_id: String,
    /// First occupied night
    pub check_in_date: NaiveDate,
    /// Exclusive end of the stay; the room is free again on this date
    pub check_out_date: NaiveDate,
    /// Number of occupants
    pub occupant_count: i32,
    /// Number of nights priced
    pub nights: i64,
    /// Nightly rate snapshot taken when the stay was priced
    pub nightly_rate: Decimal,
    /// Total price for the stay
    pub total_amount: Decimal,
    /// Current status
    pub status: ReservationStatus,
    /// Coarse payment state
    pub payment_status: PaymentStatus,
    /// Free-form guest wishes
    pub special_requests: Option<String>,
    /// Reason recorded on cancellation
    pub cancellation_reason: Option<String>,
    /// When the guest actually checked in
    pub actual_check_in: Option<DateTime<Utc>>,
    /// When the guest actually checked out
    pub actual_check_out: Option<DateTime<Utc>>,
    /// When the reservation was created
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        room_id: i32,
        guest_id: impl Into<String>,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        occupant_count: i32,
        nights: i64,
        nightly_rate: Decimal,
        total_amount: Decimal,
        special_requests: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            room_id,
            guest_id: guest_id.into(),
            check_in_date,
            check_out_date,
            occupant_count,
            nights,
            nightly_rate,
            total_amount,
            status: ReservationStatus::Confirmed,
            payment_status: PaymentStatus::default(),
            special_requests,
            cancellation_reason: None,
            actual_check_in: None,
            actual_check_out: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the stay covers `date` under the half-open rule.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && date < self.check_out_date
    }

    /// Whether the guest is physically in the room (checked in, not out).
    pub fn is_in_house(&self) -> bool {
        self.actual_check_in.is_some() && self.actual_check_out.is_none()
    }

    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        self.room_id == other.room_id
            && self.status.blocks_room()
            && other.status.blocks_room()
            && overlaps(
                self.check_in_date,
                self.check_out_date,
                other.check_in_date,
                other.check_out_date,
            )
    }
}

// ── Tests ──────────────────────────────────────────────────────
