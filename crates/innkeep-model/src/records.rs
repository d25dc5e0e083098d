//! Hotel records and the top-level [`HotelData`] document.
//!
//! Field names are serialized in camel case (`roomNumber`,
//! `currentBookingId`) to match the persisted layout. Collections that older
//! documents may lack are `#[serde(default)]`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    AssetId, BookingId, CleaningLogId, GuestId, LinenCleaningLogId, LinenId,
    LinenStatus, RoomId, RoomStatus, StaffId, StaffRole, UserId, UserRole,
};

// ---------------------------------------------------------------------------
// Rooms, guests, bookings
// ---------------------------------------------------------------------------

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub floor: u32,
    /// Unique across the hotel, e.g. `"302"`.
    pub room_number: String,
    /// How many guests the room sleeps.
    pub capacity: u32,
    pub status: RoomStatus,
    /// The open booking holding this room, if any.
    pub current_booking_id: Option<BookingId>,
    /// Every booking ever made for this room, oldest first.
    #[serde(default)]
    pub booking_history: Vec<BookingId>,
}

impl Room {
    /// Creates an available room with no booking history.
    pub fn new(room_number: impl Into<String>, floor: u32, capacity: u32) -> Self {
        Self {
            id: RoomId::generate(),
            floor,
            room_number: room_number.into(),
            capacity,
            status: RoomStatus::Available,
            current_booking_id: None,
            booking_history: Vec::new(),
        }
    }
}

/// A guest, created on check-in and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    /// Identity document number (passport, national id).
    pub id_number: String,
    #[serde(default)]
    pub phone: String,
}

/// One stay of one guest in one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub guest_id: GuestId,
    /// Older documents did not record the room on the booking; for those
    /// the room is found through `Room::booking_history`.
    #[serde(default)]
    pub room_id: Option<RoomId>,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

impl Booking {
    /// Returns `true` while the guest has not checked out.
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

// ---------------------------------------------------------------------------
// Housekeeping
// ---------------------------------------------------------------------------

/// A room cleaning task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLog {
    pub id: CleaningLogId,
    pub room_id: RoomId,
    /// `None` while unassigned, or after the assigned staff member was
    /// deleted.
    pub staff_id: Option<StaffId>,
    pub assigned_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CleaningLog {
    /// Returns `true` while the task is not finished.
    pub fn is_open(&self) -> bool {
        self.completed_date.is_none()
    }
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// A single linen item (pillowcase, sheet, towel...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linen {
    pub id: LinenId,
    pub name: String,
    pub price: f64,
    pub status: LinenStatus,
}

/// A batch of linens sent out for washing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinenCleaningLog {
    pub id: LinenCleaningLogId,
    pub linen_ids: Vec<LinenId>,
    pub staff_id: Option<StaffId>,
    pub sent_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

impl LinenCleaningLog {
    /// Returns `true` while the batch is still at the laundry.
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// A piece of hotel equipment or furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub category: String,
    /// Free text: `"房间 302"`, `"Lobby"`, `"Kitchen"`.
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user account. Logging in is picking one of these; there is no
/// password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
}

// ---------------------------------------------------------------------------
// HotelData: the persisted document
// ---------------------------------------------------------------------------

/// The whole application state, persisted as one document.
///
/// ```text
/// {
///   "staff": [...], "rooms": [...], "guests": [...], "bookings": [...],
///   "cleaningLogs": [...], "linens": [...], "linenCleaningLogs": [...],
///   "assets": [...], "users": [...]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelData {
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub cleaning_logs: Vec<CleaningLog>,
    #[serde(default)]
    pub linens: Vec<Linen>,
    #[serde(default)]
    pub linen_cleaning_logs: Vec<LinenCleaningLog>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl HotelData {
    /// Looks up a room by id.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// Looks up a room by id for modification.
    pub fn room_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| &r.id == id)
    }

    /// Looks up a room by its room number.
    pub fn room_by_number(&self, room_number: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.room_number == room_number)
    }

    /// Looks up a booking by id.
    pub fn booking(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| &b.id == id)
    }

    /// Looks up a guest by id.
    pub fn guest(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| &g.id == id)
    }

    /// Looks up a staff member by id.
    pub fn staff_member(&self, id: &StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }

    /// Looks up a user by id.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Returns the guest currently staying in a room, if any.
    pub fn current_guest(&self, room_id: &RoomId) -> Option<&Guest> {
        let room = self.room(room_id)?;
        let booking = self.booking(room.current_booking_id.as_ref()?)?;
        self.guest(&booking.guest_id)
    }

    /// Returns `true` if the booking belongs to the room, either through
    /// its `room_id` or through the room's booking history.
    pub fn booking_belongs_to(&self, booking: &Booking, room: &Room) -> bool {
        match &booking.room_id {
            Some(id) => id == &room.id,
            None => room.booking_history.contains(&booking.id),
        }
    }

    /// Open bookings that belong to the room.
    pub fn open_bookings_for<'a>(
        &'a self,
        room: &'a Room,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.is_open() && self.booking_belongs_to(b, room))
    }

    /// Open cleaning logs for the room, in insertion order.
    pub fn open_cleaning_logs_for<'a>(
        &'a self,
        room_id: &'a RoomId,
    ) -> impl Iterator<Item = &'a CleaningLog> + 'a {
        self.cleaning_logs
            .iter()
            .filter(move |log| &log.room_id == room_id && log.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_room() -> Room {
        Room::new("101", 1, 2)
    }

    #[test]
    fn test_room_json_uses_camel_case() {
        let room = sample_room();
        let json: serde_json::Value = serde_json::to_value(&room).unwrap();

        assert_eq!(json["roomNumber"], "101");
        assert_eq!(json["status"], "available");
        assert!(json["currentBookingId"].is_null());
        assert_eq!(json["bookingHistory"], serde_json::json!([]));
    }

    #[test]
    fn test_document_has_all_top_level_arrays() {
        let json: serde_json::Value =
            serde_json::to_value(HotelData::default()).unwrap();
        for key in [
            "staff",
            "rooms",
            "guests",
            "bookings",
            "cleaningLogs",
            "linens",
            "linenCleaningLogs",
            "assets",
            "users",
        ] {
            assert!(json[key].is_array(), "missing top-level array {key}");
        }
    }

    #[test]
    fn test_document_missing_arrays_default_to_empty() {
        let data: HotelData =
            serde_json::from_str(r#"{ "rooms": [] }"#).unwrap();
        assert!(data.users.is_empty());
        assert!(data.linen_cleaning_logs.is_empty());
    }

    #[test]
    fn test_legacy_booking_without_room_id() {
        let json = r#"{
            "id": "b1",
            "guestId": "g1",
            "checkIn": "2024-05-01T10:00:00.000Z",
            "checkOut": null
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert!(booking.room_id.is_none());
        assert!(booking.is_open());
    }

    #[test]
    fn test_booking_belongs_to_via_history() {
        let mut room = sample_room();
        let booking = Booking {
            id: BookingId::from("b1"),
            guest_id: GuestId::from("g1"),
            room_id: None,
            check_in: Utc::now(),
            check_out: None,
        };
        let data = HotelData::default();
        assert!(!data.booking_belongs_to(&booking, &room));

        room.booking_history.push(booking.id.clone());
        assert!(data.booking_belongs_to(&booking, &room));
    }

    #[test]
    fn test_cleaning_log_notes_omitted_when_empty() {
        let log = CleaningLog {
            id: CleaningLogId::from("c1"),
            room_id: RoomId::from("r1"),
            staff_id: None,
            assigned_date: Utc::now(),
            completed_date: None,
            notes: None,
        };
        let json: serde_json::Value = serde_json::to_value(&log).unwrap();
        assert!(json.get("notes").is_none());
        assert!(json["staffId"].is_null());
    }

    #[test]
    fn test_asset_purchase_date_is_calendar_date() {
        let json = r#"{
            "id": "a1",
            "name": "TV",
            "category": "Electronics",
            "location": "Lobby",
            "purchaseDate": "2023-11-02",
            "value": 320
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(
            asset.purchase_date,
            NaiveDate::from_ymd_opt(2023, 11, 2).unwrap()
        );
        assert_eq!(asset.value, 320.0);
    }
}
