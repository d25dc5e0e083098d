//! Room records: creation, edits, and deletion with cascade.
//!
//! Status is never edited here. It belongs to the lifecycle engine in
//! `innkeep-rooms`; a new room always starts `Available`.

use innkeep_model::{HotelData, Room, RoomId, User};
use serde::{Deserialize, Serialize};

use crate::RecordError;
use crate::guard::{require_admin, required};

/// Editable fields of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub room_number: String,
    pub floor: u32,
    pub capacity: u32,
}

impl RoomDraft {
    /// Validates the draft, returning the trimmed room number.
    fn validate(&self, data: &HotelData, editing: Option<&RoomId>) -> Result<String, RecordError> {
        let number = required(&self.room_number, "room number")?;
        if self.floor < 1 {
            return Err(RecordError::Validation("floor must be at least 1".into()));
        }
        if self.capacity < 1 {
            return Err(RecordError::Validation("capacity must be at least 1".into()));
        }

        let taken = data
            .rooms
            .iter()
            .any(|r| r.room_number == number && Some(&r.id) != editing);
        if taken {
            return Err(RecordError::Duplicate(format!("room number {number}")));
        }
        Ok(number)
    }
}

/// Adds an available room and returns its new id.
pub fn add_room(data: &HotelData, draft: &RoomDraft) -> Result<(HotelData, RoomId), RecordError> {
    let number = draft.validate(data, None)?;
    let room = Room::new(number, draft.floor, draft.capacity);
    let id = room.id.clone();

    tracing::info!(room = %room.room_number, floor = room.floor, "room added");
    let mut next = data.clone();
    next.rooms.push(room);
    Ok((next, id))
}

/// Changes a room's number, floor, or capacity.
///
/// Status, the current booking, and the booking history are preserved.
pub fn update_room(
    data: &HotelData,
    id: &RoomId,
    draft: &RoomDraft,
) -> Result<HotelData, RecordError> {
    if data.room(id).is_none() {
        return Err(RecordError::not_found("room", id));
    }
    let number = draft.validate(data, Some(id))?;

    let mut next = data.clone();
    let room = next
        .room_mut(id)
        .ok_or_else(|| RecordError::not_found("room", id))?;
    room.room_number = number;
    room.floor = draft.floor;
    room.capacity = draft.capacity;

    tracing::info!(room = %room.room_number, "room updated");
    Ok(next)
}

/// Deletes a room (admin only), along with every booking and cleaning log
/// that belongs to it. Guests are kept.
pub fn delete_room(data: &HotelData, actor: &User, id: &RoomId) -> Result<HotelData, RecordError> {
    require_admin(actor, "delete rooms")?;
    let room = data
        .room(id)
        .ok_or_else(|| RecordError::not_found("room", id))?;

    let mut next = data.clone();
    next.bookings.retain(|b| !data.booking_belongs_to(b, room));
    next.cleaning_logs.retain(|log| &log.room_id != id);
    next.rooms.retain(|r| &r.id != id);

    tracing::info!(
        room = %room.room_number,
        by = %actor.username,
        bookings = data.bookings.len() - next.bookings.len(),
        cleaning_logs = data.cleaning_logs.len() - next.cleaning_logs.len(),
        "room deleted"
    );
    Ok(next)
}
