//! Guest domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Guest on the directory; bookings reference it, notifications read it.
#[derive(Debug, Clone)]
pub struct Guest {
    /// Unique guest ID
    pub id: String,
    /// Full display name
    pub full_name: String,
    /// Contact email, unique
    pub email: String,
    /// Optional phone number
    pub phone: Option<String>,
    /// When the guest was registered
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────
