//! Room lifecycle engine for Innkeep.
//!
//! Every front-desk and housekeeping action is a pure function from the
//! current [`HotelData`](innkeep_model::HotelData) to the next one. Nothing
//! here performs I/O; the caller passes in the current time and decides
//! what to do with the returned document (persist it, publish it).
//!
//! # Key types
//!
//! - [`RoomAction`]: one variant per transition, dispatched by [`apply`]
//! - [`Transition`]: the status state machine
//! - [`RoomCondition`]: occupancy / housekeeping / out-of-service facets
//! - [`check_invariants`]: reports rooms whose records disagree
//! - [`RoomError`]: validation and conflict failures
//!
//! # State machine
//!
//! ```text
//! Available   ──CheckIn──────────────→ Occupied
//! Occupied    ──CheckOut─────────────→ Cleaning   (opens an unassigned log)
//! Available   ──AssignCleaning───────→ Cleaning
//! Maintenance ──AssignCleaning───────→ Cleaning
//! Occupied    ──AssignCleaning───────→ Occupied   (turn-down service)
//! Cleaning    ──MarkCleaned──────────→ Available
//! any         ──SetMaintenance(true)─→ Maintenance
//! any         ──SetMaintenance(false)→ Available
//! ```

mod error;
mod invariants;
mod lifecycle;
mod status;

pub use error::RoomError;
pub use invariants::{InvariantViolation, check_invariants};
pub use lifecycle::{
    GuestDetails, RoomAction, apply, assign_cleaning, check_in, check_out,
    complete_cleaning_log, mark_cleaned, set_maintenance,
};
pub use status::{Housekeeping, Occupancy, RoomCondition, RoomStats, Transition};
