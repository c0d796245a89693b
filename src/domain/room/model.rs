//! Room domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Occupancy status of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomStatus {
    /// Ready to receive a guest
    Available,
    /// A guest is currently in the room
    Occupied,
    /// Taken out of service by maintenance
    Maintenance,
    /// Being turned over by housekeeping
    Cleaning,
}

impl Default for RoomStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
            Self::Cleaning => "Cleaning",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Occupied" => Self::Occupied,
            "Maintenance" => Self::Maintenance,
            "Cleaning" => Self::Cleaning,
            _ => Self::Available,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bookable room
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room ID
    pub id: i32,
    /// Human-facing room number, unique per property
    pub room_number: String,
    /// Category name (Standard, Deluxe, Suite, ...)
    pub category: String,
    /// Nightly base rate inherited from the category
    pub base_rate: Decimal,
    /// Per-room adjustment on top of the category rate (may be negative)
    pub rate_adjustment: Decimal,
    /// Maximum number of occupants
    pub max_occupancy: i32,
    /// Current occupancy status
    pub status: RoomStatus,
    /// Soft-deactivation flag; inactive rooms reject new bookings but
    /// keep their reservation history
    pub is_active: bool,
    /// When the room was registered
    pub created_at: DateTime<Utc>,
    /// Last modification
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        id: i32,
        room_number: impl Into<String>,
        category: impl Into<String>,
        base_rate: Decimal,
        max_occupancy: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            room_number: room_number.into(),
            category: category.into(),
            base_rate,
            rate_adjustment: Decimal::ZERO,
            max_occupancy,
            status: RoomStatus::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Effective nightly rate: category base plus per-room adjustment.
    pub fn nightly_rate(&self) -> Decimal {
        self.base_rate + self.rate_adjustment
    }

    /// Whether new reservations may be taken against this room.
    pub fn is_bookable(&self) -> bool {
        self.is_active
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────
