//! Lifecycle actions: check-in, check-out, cleaning, maintenance.
//!
//! Each action borrows the current document and returns a new one. The
//! pattern is the same everywhere:
//!
//! 1. Validate input and look up the room.
//! 2. Ask [`Transition::target`] for the next status (conflict if `None`).
//! 3. Clone the document, apply the changes, return the clone.
//!
//! Because the input is only borrowed, a failed action leaves the caller's
//! document exactly as it was.

use chrono::{DateTime, Utc};
use innkeep_model::{
    Booking, BookingId, CleaningLog, CleaningLogId, Guest, GuestId, HotelData,
    Room, RoomId, RoomStatus, StaffId, StaffRole,
};
use serde::{Deserialize, Serialize};

use crate::{RoomError, Transition};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Guest details collected at the front desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub name: String,
    pub id_number: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl GuestDetails {
    /// Details without a phone number.
    pub fn new(name: impl Into<String>, id_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_number: id_number.into(),
            phone: None,
        }
    }

    /// Adds a phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A lifecycle action a view can dispatch.
///
/// Internally tagged, so a check-out serializes as
/// `{ "type": "CheckOut", "roomId": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum RoomAction {
    CheckIn { room_id: RoomId, guest: GuestDetails },
    CheckOut { room_id: RoomId },
    AssignCleaning { room_id: RoomId, staff_id: StaffId },
    MarkCleaned { room_id: RoomId },
    CompleteCleaningLog { log_id: CleaningLogId },
    SetMaintenance { room_id: RoomId, enabled: bool },
}

/// Applies `action` to `data`, returning the next document.
pub fn apply(
    data: &HotelData,
    action: &RoomAction,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    match action {
        RoomAction::CheckIn { room_id, guest } => check_in(data, room_id, guest, now),
        RoomAction::CheckOut { room_id } => check_out(data, room_id, now),
        RoomAction::AssignCleaning { room_id, staff_id } => {
            assign_cleaning(data, room_id, staff_id, now)
        }
        RoomAction::MarkCleaned { room_id } => mark_cleaned(data, room_id, now),
        RoomAction::CompleteCleaningLog { log_id } => {
            complete_cleaning_log(data, log_id, now)
        }
        RoomAction::SetMaintenance { room_id, enabled } => {
            set_maintenance(data, room_id, *enabled, now)
        }
    }
}

// ---------------------------------------------------------------------------
// Front desk
// ---------------------------------------------------------------------------

/// Checks a guest into an available room.
///
/// Creates the guest and an open booking, marks the room occupied, and
/// records the booking in the room's history.
///
/// # Errors
/// - [`RoomError::Validation`] if the guest name or id number is blank
/// - [`RoomError::RoomNotFound`] if the room does not exist
/// - [`RoomError::Conflict`] if the room is not available
pub fn check_in(
    data: &HotelData,
    room_id: &RoomId,
    guest: &GuestDetails,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let name = guest.name.trim();
    let id_number = guest.id_number.trim();
    if name.is_empty() || id_number.is_empty() {
        return Err(RoomError::Validation(
            "guest name and id number are required".into(),
        ));
    }

    let room = find_room(data, room_id)?;
    let status = target_status(room, Transition::CheckIn)?;

    let guest = Guest {
        id: GuestId::generate(),
        name: name.to_string(),
        id_number: id_number.to_string(),
        phone: guest
            .phone
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    };
    let booking = Booking {
        id: BookingId::generate(),
        guest_id: guest.id.clone(),
        room_id: Some(room_id.clone()),
        check_in: now,
        check_out: None,
    };

    let mut next = data.clone();
    let room = find_room_mut(&mut next, room_id)?;
    room.status = status;
    room.current_booking_id = Some(booking.id.clone());
    room.booking_history.push(booking.id.clone());

    tracing::info!(
        room = %room.room_number,
        booking = %booking.id,
        "guest checked in"
    );

    next.guests.push(guest);
    next.bookings.push(booking);
    Ok(next)
}

/// Checks the current guest out of a room.
///
/// Closes the open booking, moves the room to `Cleaning`, and opens an
/// unassigned cleaning log so the room shows up on the housekeeping board.
///
/// # Errors
/// - [`RoomError::RoomNotFound`] if the room does not exist
/// - [`RoomError::Conflict`] if the room has no open booking
pub fn check_out(
    data: &HotelData,
    room_id: &RoomId,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let room = find_room(data, room_id)?;
    let status = target_status(room, Transition::CheckOut)?;

    let booking_id = room
        .current_booking_id
        .clone()
        .filter(|id| data.booking(id).is_some_and(Booking::is_open))
        .ok_or_else(|| {
            RoomError::Conflict(format!(
                "room {} has no open booking",
                room.room_number
            ))
        })?;

    let mut next = data.clone();
    if let Some(booking) = next.bookings.iter_mut().find(|b| b.id == booking_id) {
        booking.check_out = Some(now);
    }

    let room = find_room_mut(&mut next, room_id)?;
    room.status = status;
    room.current_booking_id = None;
    let room_number = room.room_number.clone();

    let log_id = open_cleaning_log(&mut next, room_id, None, now);

    tracing::info!(
        room = %room_number,
        booking = %booking_id,
        cleaning_log = %log_id,
        "guest checked out"
    );
    Ok(next)
}

// ---------------------------------------------------------------------------
// Housekeeping
// ---------------------------------------------------------------------------

/// Assigns a cleaner to a room.
///
/// If the room already has an open cleaning log, the cleaner is assigned to
/// it; otherwise a new log is opened. Calling this twice never produces two
/// open logs. An occupied room stays occupied (turn-down service); any other
/// room moves to `Cleaning`.
///
/// # Errors
/// - [`RoomError::RoomNotFound`] if the room does not exist
/// - [`RoomError::Validation`] if no staff id is given, the staff member is
///   unknown, or they are not a cleaner
pub fn assign_cleaning(
    data: &HotelData,
    room_id: &RoomId,
    staff_id: &StaffId,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let room = find_room(data, room_id)?;

    if staff_id.as_str().trim().is_empty() {
        return Err(RoomError::Validation("no cleaner selected".into()));
    }
    let staff = data.staff_member(staff_id).ok_or_else(|| {
        RoomError::Validation(format!("staff member {staff_id} not found"))
    })?;
    if staff.role != StaffRole::Cleaning {
        return Err(RoomError::Validation(format!(
            "{} is {} staff, not a cleaner",
            staff.name, staff.role
        )));
    }

    let status = target_status(room, Transition::AssignCleaning)?;

    let mut next = data.clone();
    let log_id = open_cleaning_log(&mut next, room_id, Some(staff_id), now);
    let room = find_room_mut(&mut next, room_id)?;
    room.status = status;

    tracing::info!(
        room = %room.room_number,
        staff = %staff_id,
        cleaning_log = %log_id,
        %status,
        "cleaning assigned"
    );
    Ok(next)
}

/// Marks a room as cleaned.
///
/// Closes the most recent open cleaning log for the room. A room with no
/// open log is accepted: only its status changes. The room becomes
/// `Available`, unless a guest holds it, in which case it stays `Occupied`.
///
/// # Errors
/// - [`RoomError::RoomNotFound`] if the room does not exist
pub fn mark_cleaned(
    data: &HotelData,
    room_id: &RoomId,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let room = find_room(data, room_id)?;
    let status = target_status(room, Transition::MarkCleaned)?;

    let latest = data
        .open_cleaning_logs_for(room_id)
        .max_by_key(|log| log.assigned_date)
        .map(|log| log.id.clone());

    let mut next = data.clone();
    match &latest {
        Some(log_id) => close_cleaning_log(&mut next, log_id, now),
        None => tracing::debug!(
            room = %room.room_number,
            "no open cleaning log, updating status only"
        ),
    }

    let room = find_room_mut(&mut next, room_id)?;
    room.status = status;

    tracing::info!(room = %room.room_number, %status, "room marked clean");
    Ok(next)
}

/// Completes one specific cleaning log, as done from the housekeeping board.
///
/// Once the room has no open log left, it follows the same status rule as
/// [`mark_cleaned`].
///
/// # Errors
/// - [`RoomError::LogNotFound`] if the log does not exist
/// - [`RoomError::Conflict`] if the log is already completed
pub fn complete_cleaning_log(
    data: &HotelData,
    log_id: &CleaningLogId,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let log = data
        .cleaning_logs
        .iter()
        .find(|log| &log.id == log_id)
        .ok_or_else(|| RoomError::LogNotFound(log_id.clone()))?;
    if !log.is_open() {
        return Err(RoomError::Conflict(format!(
            "cleaning log {log_id} is already completed"
        )));
    }
    let room_id = log.room_id.clone();

    let mut next = data.clone();
    close_cleaning_log(&mut next, log_id, now);

    let still_open = next.open_cleaning_logs_for(&room_id).count();
    match next.room_mut(&room_id) {
        Some(room) if still_open == 0 => {
            if let Some(status) = Transition::MarkCleaned.target(room.status) {
                room.status = status;
            }
            tracing::info!(
                room = %room.room_number,
                cleaning_log = %log_id,
                status = %room.status,
                "cleaning log completed"
            );
        }
        _ => tracing::info!(cleaning_log = %log_id, "cleaning log completed"),
    }
    Ok(next)
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

/// Takes a room out of service (`enabled`) or returns it to `Available`.
///
/// This is an override: it does not check bookings or cleaning logs first.
/// If the room was occupied, its link to the booking is dropped so the
/// status and the link never disagree; the booking record itself is left
/// open. Returning the room to service closes any cleaning log still open
/// for it, so the next stay starts clean.
///
/// # Errors
/// - [`RoomError::RoomNotFound`] if the room does not exist
pub fn set_maintenance(
    data: &HotelData,
    room_id: &RoomId,
    enabled: bool,
    now: DateTime<Utc>,
) -> Result<HotelData, RoomError> {
    let room = find_room(data, room_id)?;
    let status = target_status(room, Transition::SetMaintenance(enabled))?;

    let mut next = data.clone();
    let room = find_room_mut(&mut next, room_id)?;
    if let Some(booking) = room.current_booking_id.take() {
        tracing::warn!(
            room = %room.room_number,
            %booking,
            "maintenance override dropped an occupancy link; booking left open"
        );
    }
    room.status = status;
    let room_number = room.room_number.clone();

    if !enabled {
        let mut closed = 0usize;
        for log in next
            .cleaning_logs
            .iter_mut()
            .filter(|log| &log.room_id == room_id && log.is_open())
        {
            log.completed_date = Some(now);
            closed += 1;
        }
        if closed > 0 {
            tracing::debug!(
                room = %room_number,
                closed,
                "open cleaning logs closed on return to service"
            );
        }
    }

    tracing::info!(room = %room_number, enabled, "maintenance updated");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_room<'a>(data: &'a HotelData, room_id: &RoomId) -> Result<&'a Room, RoomError> {
    data.room(room_id)
        .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))
}

fn find_room_mut<'a>(
    data: &'a mut HotelData,
    room_id: &RoomId,
) -> Result<&'a mut Room, RoomError> {
    data.room_mut(room_id)
        .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))
}

/// Looks up the status `transition` leads to, or explains the conflict.
fn target_status(room: &Room, transition: Transition) -> Result<RoomStatus, RoomError> {
    transition.target(room.status).ok_or_else(|| {
        tracing::debug!(
            room = %room.room_number,
            status = %room.status,
            ?transition,
            "transition rejected"
        );
        RoomError::Conflict(format!(
            "room {} is {}, cannot {:?}",
            room.room_number, room.status, transition
        ))
    })
}

/// Returns the id of the room's open cleaning log, opening one if needed.
///
/// With `staff` set, the (latest) open log is reassigned to that staff
/// member.
fn open_cleaning_log(
    data: &mut HotelData,
    room_id: &RoomId,
    staff: Option<&StaffId>,
    now: DateTime<Utc>,
) -> CleaningLogId {
    let existing = data
        .cleaning_logs
        .iter_mut()
        .filter(|log| &log.room_id == room_id && log.is_open())
        .max_by_key(|log| log.assigned_date);

    if let Some(log) = existing {
        if let Some(staff) = staff {
            log.staff_id = Some(staff.clone());
        }
        return log.id.clone();
    }

    let log = CleaningLog {
        id: CleaningLogId::generate(),
        room_id: room_id.clone(),
        staff_id: staff.cloned(),
        assigned_date: now,
        completed_date: None,
        notes: None,
    };
    let id = log.id.clone();
    data.cleaning_logs.push(log);
    id
}

fn close_cleaning_log(data: &mut HotelData, log_id: &CleaningLogId, now: DateTime<Utc>) {
    if let Some(log) = data.cleaning_logs.iter_mut().find(|log| &log.id == log_id) {
        log.completed_date = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innkeep_model::Staff;

    fn hotel() -> (HotelData, RoomId, StaffId) {
        let mut data = HotelData::default();
        let room = Room::new("101", 1, 2);
        let room_id = room.id.clone();
        data.rooms.push(room);
        let cleaner = Staff {
            id: StaffId::from("s-clean"),
            name: "Alice".into(),
            role: StaffRole::Cleaning,
        };
        data.staff.push(cleaner.clone());
        data.staff.push(Staff {
            id: StaffId::from("s-desk"),
            name: "Charlie".into(),
            role: StaffRole::FrontDesk,
        });
        (data, room_id, cleaner.id)
    }

    #[test]
    fn test_check_in_trims_guest_details() {
        let (data, room_id, _) = hotel();
        let guest = GuestDetails::new("  Zhang San ", " X123 ").with_phone(" 555 ");
        let next = check_in(&data, &room_id, &guest, Utc::now()).unwrap();

        let stored = &next.guests[0];
        assert_eq!(stored.name, "Zhang San");
        assert_eq!(stored.id_number, "X123");
        assert_eq!(stored.phone, "555");
    }

    #[test]
    fn test_check_in_whitespace_name_is_validation_error() {
        let (data, room_id, _) = hotel();
        let guest = GuestDetails::new("   ", "X123");
        let result = check_in(&data, &room_id, &guest, Utc::now());
        assert!(matches!(result, Err(RoomError::Validation(_))));
    }

    #[test]
    fn test_check_in_unknown_room() {
        let (data, _, _) = hotel();
        let guest = GuestDetails::new("Zhang San", "X123");
        let result = check_in(&data, &RoomId::from("nope"), &guest, Utc::now());
        assert_eq!(result, Err(RoomError::RoomNotFound(RoomId::from("nope"))));
    }

    #[test]
    fn test_check_out_opens_unassigned_log() {
        let (data, room_id, _) = hotel();
        let guest = GuestDetails::new("Zhang San", "X123");
        let data = check_in(&data, &room_id, &guest, Utc::now()).unwrap();
        let data = check_out(&data, &room_id, Utc::now()).unwrap();

        let open: Vec<_> = data.open_cleaning_logs_for(&room_id).collect();
        assert_eq!(open.len(), 1);
        assert!(open[0].staff_id.is_none());
    }

    #[test]
    fn test_assign_cleaning_rejects_non_cleaner() {
        let (data, room_id, _) = hotel();
        let result =
            assign_cleaning(&data, &room_id, &StaffId::from("s-desk"), Utc::now());
        assert!(matches!(result, Err(RoomError::Validation(_))));
    }

    #[test]
    fn test_assign_cleaning_rejects_empty_staff_id() {
        let (data, room_id, _) = hotel();
        let result = assign_cleaning(&data, &room_id, &StaffId::from(""), Utc::now());
        assert_eq!(
            result,
            Err(RoomError::Validation("no cleaner selected".into()))
        );
    }

    #[test]
    fn test_assign_cleaning_lifts_maintenance() {
        let (data, room_id, cleaner) = hotel();
        let data = set_maintenance(&data, &room_id, true, Utc::now()).unwrap();
        let data = assign_cleaning(&data, &room_id, &cleaner, Utc::now()).unwrap();
        assert_eq!(data.room(&room_id).unwrap().status, RoomStatus::Cleaning);
    }

    #[test]
    fn test_complete_cleaning_log_twice_is_conflict() {
        let (data, room_id, cleaner) = hotel();
        let data = assign_cleaning(&data, &room_id, &cleaner, Utc::now()).unwrap();
        let log_id = data.cleaning_logs[0].id.clone();

        let data = complete_cleaning_log(&data, &log_id, Utc::now()).unwrap();
        assert_eq!(data.room(&room_id).unwrap().status, RoomStatus::Available);

        let again = complete_cleaning_log(&data, &log_id, Utc::now());
        assert!(matches!(again, Err(RoomError::Conflict(_))));
    }

    #[test]
    fn test_complete_unknown_log() {
        let (data, _, _) = hotel();
        let result = complete_cleaning_log(&data, &CleaningLogId::from("x"), Utc::now());
        assert_eq!(result, Err(RoomError::LogNotFound(CleaningLogId::from("x"))));
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let (data, room_id, _) = hotel();
        let action = RoomAction::SetMaintenance {
            room_id: room_id.clone(),
            enabled: true,
        };
        let next = apply(&data, &action, Utc::now()).unwrap();
        assert_eq!(next.room(&room_id).unwrap().status, RoomStatus::Maintenance);
    }

    #[test]
    fn test_room_action_json_is_internally_tagged() {
        let action = RoomAction::CheckOut {
            room_id: RoomId::from("r1"),
        };
        let json: serde_json::Value = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "CheckOut");
        assert_eq!(json["roomId"], "r1");

        let json = r#"{
            "type": "CheckIn",
            "roomId": "r1",
            "guest": { "name": "Zhang San", "idNumber": "X123" }
        }"#;
        let action: RoomAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            RoomAction::CheckIn {
                room_id: RoomId::from("r1"),
                guest: GuestDetails::new("Zhang San", "X123"),
            }
        );
    }
}
