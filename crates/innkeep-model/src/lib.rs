//! Data model for Innkeep.
//!
//! This crate defines everything that lives inside the persisted hotel
//! document:
//!
//! - **Identifiers** ([`RoomId`], [`BookingId`], etc.): string newtypes so a
//!   staff id can never be passed where a room id is expected.
//! - **Enumerations** ([`RoomStatus`], [`StaffRole`], [`LinenStatus`],
//!   [`UserRole`]): the closed value sets of the record fields.
//! - **Records** ([`Room`], [`Booking`], [`CleaningLog`], ...) and the
//!   top-level [`HotelData`] document that holds all of them.
//! - **Codec** ([`DocumentCodec`] trait, [`JsonCodec`]): how the document is
//!   turned into the string stored under the storage key.
//!
//! # Architecture
//!
//! ```text
//! Storage (strings by key) → Model (HotelData) → Rooms / Records (transitions)
//! ```
//!
//! The model knows nothing about transitions or persistence. It only knows
//! the shape of the data and how to serialize it.

mod codec;
mod error;
mod records;
mod types;

pub use codec::{DocumentCodec, JsonCodec};
pub use error::ModelError;
pub use records::{
    Asset, Booking, CleaningLog, Guest, HotelData, Linen, LinenCleaningLog,
    Room, Staff, User,
};
pub use types::{
    AssetId, BookingId, CleaningLogId, GuestId, LinenCleaningLogId, LinenId,
    LinenStatus, RoomId, RoomStatus, StaffId, StaffRole, UserId, UserRole,
};

/// The storage key the hotel document is written under.
pub const STORAGE_KEY: &str = "hotelAppData";
