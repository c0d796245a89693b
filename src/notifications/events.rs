//! Booking lifecycle events
//!
//! Published after a booking transaction commits. Consumers (guest
//! email, front-desk UI) subscribe through the [`super::EventBus`];
//! delivery is best-effort and never affects the transaction outcome.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Event payloads for reservation lifecycle changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookingEvent {
    ReservationCreated {
        reservation_id: String,
        room_id: i32,
        guest_id: String,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_amount: String,
    },
    ReservationModified {
        reservation_id: String,
        room_id: i32,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_amount: String,
    },
    ReservationCancelled {
        reservation_id: String,
        room_id: i32,
        reason: String,
    },
    GuestCheckedIn {
        reservation_id: String,
        room_id: i32,
    },
    GuestCheckedOut {
        reservation_id: String,
        room_id: i32,
    },
    ReservationNoShow {
        reservation_id: String,
        room_id: i32,
    },
}

impl BookingEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReservationCreated { .. } => "reservation_created",
            Self::ReservationModified { .. } => "reservation_modified",
            Self::ReservationCancelled { .. } => "reservation_cancelled",
            Self::GuestCheckedIn { .. } => "guest_checked_in",
            Self::GuestCheckedOut { .. } => "guest_checked_out",
            Self::ReservationNoShow { .. } => "reservation_no_show",
        }
    }

    pub fn reservation_id(&self) -> &str {
        match self {
            Self::ReservationCreated { reservation_id, .. }
            | Self::ReservationModified { reservation_id, .. }
            | Self::ReservationCancelled { reservation_id, .. }
            | Self::GuestCheckedIn { reservation_id, .. }
            | Self::GuestCheckedOut { reservation_id, .. }
            | Self::ReservationNoShow { reservation_id, .. } => reservation_id,
        }
    }
}

/// Envelope carrying an event plus its emission time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event: BookingEvent,
    pub timestamp: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: BookingEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
