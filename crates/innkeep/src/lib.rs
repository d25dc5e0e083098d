//! # Innkeep
//!
//! Hotel operations tracker: rooms, guests, bookings, housekeeping,
//! linens, assets, and staff, kept in one persisted document.
//!
//! This crate ties the layers together behind a single actor:
//!
//! ```text
//! HotelHandle ──commands──→ HotelActor ──→ innkeep-rooms / innkeep-records
//!      ↑                        │
//!      └──── watch snapshot ────┴──→ innkeep-storage (persist first)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use innkeep::prelude::*;
//!
//! # async fn run() -> Result<(), HotelError> {
//! innkeep::init_tracing();
//! let config = HotelConfig::load()?;
//! let hotel = innkeep::open(&config).await?;
//!
//! let room = hotel.snapshot().room_by_number("101").map(|r| r.id.clone());
//! if let Some(room_id) = room {
//!     hotel
//!         .dispatch(RoomAction::CheckIn {
//!             room_id,
//!             guest: GuestDetails::new("Zhang San", "X123"),
//!         })
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod hotel;
pub mod sample;

pub use config::{ConfigError, HotelConfig, SampleConfig};
pub use error::HotelError;
pub use hotel::{DashboardStats, HotelHandle, spawn_hotel};

use innkeep_model::JsonCodec;
use innkeep_storage::{DocumentStore, FileStorage};
use tracing_subscriber::EnvFilter;

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::{DashboardStats, HotelConfig, HotelError, HotelHandle};
    pub use innkeep_model::{
        HotelData, Room, RoomId, RoomStatus, StaffId, StaffRole, User, UserId, UserRole,
    };
    pub use innkeep_records::{RecordOp, RecordOutcome};
    pub use innkeep_rooms::{GuestDetails, RoomAction, RoomCondition};
}

/// Opens the file-backed store described by `config` and starts the hotel.
pub async fn open(config: &HotelConfig) -> Result<HotelHandle, HotelError> {
    config.validate()?;
    let store = DocumentStore::with_codec(
        FileStorage::new(&config.storage_dir),
        JsonCodec::default(),
        config.storage_key.clone(),
    );
    tracing::info!(dir = %config.storage_dir.display(), "opening hotel store");
    spawn_hotel(store, config).await
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
