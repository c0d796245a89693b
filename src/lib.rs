//! # Stayline Booking Engine
//!
//! Reservation booking and availability engine for a hotel property.
//! Detects date-range conflicts before committing a stay, prices nights
//! deterministically, drives the reservation state machine and keeps
//! room occupancy synchronized with reservation state - all inside one
//! atomic transaction per operation.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Booking orchestration, locking and policies
//! - **infrastructure**: Persistence (SeaORM entities, migrations, repositories)
//! - **notifications**: Best-effort booking event broadcasting
//! - **shared**: Shutdown coordination and common types
//!
//! The HTTP/auth layer is deliberately absent: an authenticated request
//! layer embeds this crate and calls [`BookingService`] directly.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, init_tracing, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export the engine entry points
pub use application::booking::{
    start_no_show_sweeper, Actor, BookingService, CreateReservationRequest, ReservationUpdate,
};
pub use domain::{DomainError, DomainResult, RepositoryProvider};

// Re-export notifications
pub use notifications::{create_event_bus, BookingEvent, EventBus};
