//! End-to-end lifecycle sequences against a small hotel.

use chrono::{Duration, Utc};
use innkeep_model::{HotelData, Room, RoomId, RoomStatus, Staff, StaffId, StaffRole};
use innkeep_rooms::{
    GuestDetails, Housekeeping, InvariantViolation, Occupancy, RoomAction, RoomCondition,
    RoomError, apply, assign_cleaning, check_in, check_invariants, check_out, mark_cleaned,
    set_maintenance,
};

// =========================================================================
// Fixture: two rooms, one cleaner, one front-desk clerk.
// =========================================================================

struct Hotel {
    data: HotelData,
    room_101: RoomId,
    room_102: RoomId,
    cleaner: StaffId,
}

fn hotel() -> Hotel {
    let mut data = HotelData::default();
    let room_101 = Room::new("101", 1, 2);
    let room_102 = Room::new("102", 1, 4);
    let ids = (room_101.id.clone(), room_102.id.clone());
    data.rooms.push(room_101);
    data.rooms.push(room_102);
    data.staff.push(Staff {
        id: StaffId::from("staff-cleaner"),
        name: "Alice".into(),
        role: StaffRole::Cleaning,
    });
    data.staff.push(Staff {
        id: StaffId::from("staff-desk"),
        name: "Charlie".into(),
        role: StaffRole::FrontDesk,
    });
    Hotel {
        data,
        room_101: ids.0,
        room_102: ids.1,
        cleaner: StaffId::from("staff-cleaner"),
    }
}

fn zhang_san() -> GuestDetails {
    GuestDetails::new("张三", "X123")
}

fn status(data: &HotelData, room: &RoomId) -> RoomStatus {
    data.room(room).unwrap().status
}

// =========================================================================
// Check-in and check-out
// =========================================================================

#[test]
fn test_check_in_creates_guest_and_open_booking() {
    let h = hotel();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), Utc::now()).unwrap();

    let room = data.room(&h.room_101).unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);

    let booking_id = room.current_booking_id.clone().unwrap();
    let booking = data.booking(&booking_id).unwrap();
    assert!(booking.is_open());
    assert_eq!(booking.room_id.as_ref(), Some(&h.room_101));
    assert_eq!(room.booking_history, vec![booking_id]);

    let guest = data.current_guest(&h.room_101).unwrap();
    assert_eq!(guest.name, "张三");
    assert_eq!(guest.id_number, "X123");
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_check_in_occupied_room_is_conflict_and_changes_nothing() {
    let h = hotel();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), Utc::now()).unwrap();

    let second = GuestDetails::new("李四", "Y456");
    let result = check_in(&data, &h.room_101, &second, Utc::now());
    assert!(matches!(result, Err(RoomError::Conflict(_))));
    assert_eq!(data.guests.len(), 1);
    assert_eq!(data.bookings.len(), 1);
}

#[test]
fn test_check_in_missing_id_number_is_validation_error() {
    let h = hotel();
    let guest = GuestDetails::new("张三", "  ");
    let result = check_in(&h.data, &h.room_101, &guest, Utc::now());
    assert!(matches!(result, Err(RoomError::Validation(_))));
    assert!(h.data.guests.is_empty());
}

#[test]
fn test_check_in_rejected_for_cleaning_and_maintenance() {
    let h = hotel();
    let data = assign_cleaning(&h.data, &h.room_101, &h.cleaner, Utc::now()).unwrap();
    let data = set_maintenance(&data, &h.room_102, true, Utc::now()).unwrap();

    for room in [&h.room_101, &h.room_102] {
        let result = check_in(&data, room, &zhang_san(), Utc::now());
        assert!(matches!(result, Err(RoomError::Conflict(_))), "room {room}");
    }
}

#[test]
fn test_check_out_available_room_is_conflict() {
    let h = hotel();
    let result = check_out(&h.data, &h.room_101, Utc::now());
    assert!(matches!(result, Err(RoomError::Conflict(_))));
}

#[test]
fn test_check_out_closes_booking_and_moves_to_cleaning() {
    let h = hotel();
    let checked_in = Utc::now();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), checked_in).unwrap();
    let booking_id = data.room(&h.room_101).unwrap().current_booking_id.clone().unwrap();

    let checked_out = checked_in + Duration::hours(20);
    let data = check_out(&data, &h.room_101, checked_out).unwrap();

    let room = data.room(&h.room_101).unwrap();
    assert_eq!(room.status, RoomStatus::Cleaning);
    assert!(room.current_booking_id.is_none());
    assert_eq!(data.booking(&booking_id).unwrap().check_out, Some(checked_out));

    let condition = RoomCondition::of(&data, room);
    assert_eq!(condition.occupancy, Occupancy::Vacant);
    assert_eq!(condition.housekeeping, Housekeeping::Dirty);
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_check_in_after_check_out_is_rejected_until_cleaned() {
    let h = hotel();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), Utc::now()).unwrap();
    let data = check_out(&data, &h.room_101, Utc::now()).unwrap();

    let result = check_in(&data, &h.room_101, &zhang_san(), Utc::now());
    assert!(matches!(result, Err(RoomError::Conflict(_))));

    let data = mark_cleaned(&data, &h.room_101, Utc::now()).unwrap();
    let data = check_in(&data, &h.room_101, &zhang_san(), Utc::now()).unwrap();
    assert_eq!(data.room(&h.room_101).unwrap().booking_history.len(), 2);
}

// =========================================================================
// Housekeeping
// =========================================================================

#[test]
fn test_full_stay_leaves_one_closed_log() {
    let h = hotel();
    let t0 = Utc::now();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), t0).unwrap();
    let data = check_out(&data, &h.room_101, t0 + Duration::hours(1)).unwrap();
    let data = assign_cleaning(&data, &h.room_101, &h.cleaner, t0 + Duration::hours(2)).unwrap();
    let data = mark_cleaned(&data, &h.room_101, t0 + Duration::hours(3)).unwrap();

    assert_eq!(status(&data, &h.room_101), RoomStatus::Available);
    assert_eq!(data.cleaning_logs.len(), 1);

    let log = &data.cleaning_logs[0];
    assert_eq!(log.staff_id.as_ref(), Some(&h.cleaner));
    assert_eq!(log.completed_date, Some(t0 + Duration::hours(3)));
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_assign_cleaning_twice_keeps_one_open_log() {
    let h = hotel();
    let data = assign_cleaning(&h.data, &h.room_101, &h.cleaner, Utc::now()).unwrap();
    let data = assign_cleaning(&data, &h.room_101, &h.cleaner, Utc::now()).unwrap();

    assert_eq!(data.open_cleaning_logs_for(&h.room_101).count(), 1);
    assert_eq!(status(&data, &h.room_101), RoomStatus::Cleaning);
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_assign_cleaning_unknown_room() {
    let h = hotel();
    let result = assign_cleaning(&h.data, &RoomId::from("ghost"), &h.cleaner, Utc::now());
    assert_eq!(result, Err(RoomError::RoomNotFound(RoomId::from("ghost"))));
}

#[test]
fn test_assign_cleaning_unknown_staff() {
    let h = hotel();
    let result =
        assign_cleaning(&h.data, &h.room_101, &StaffId::from("nobody"), Utc::now());
    assert!(matches!(result, Err(RoomError::Validation(_))));
}

#[test]
fn test_turn_down_service_keeps_guest() {
    let h = hotel();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), Utc::now()).unwrap();
    let booking = data.room(&h.room_101).unwrap().current_booking_id.clone();

    let data = assign_cleaning(&data, &h.room_101, &h.cleaner, Utc::now()).unwrap();
    assert_eq!(status(&data, &h.room_101), RoomStatus::Occupied);
    let room = data.room(&h.room_101).unwrap();
    assert_eq!(room.current_booking_id, booking);
    assert!(RoomCondition::of(&data, room).needs_cleaning());

    let data = mark_cleaned(&data, &h.room_101, Utc::now()).unwrap();
    let room = data.room(&h.room_101).unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);
    assert_eq!(room.current_booking_id, booking);
    assert!(!RoomCondition::of(&data, room).needs_cleaning());

    // The guest can still check out normally.
    let data = check_out(&data, &h.room_101, Utc::now()).unwrap();
    assert_eq!(status(&data, &h.room_101), RoomStatus::Cleaning);
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_mark_cleaned_without_open_log_only_changes_status() {
    let h = hotel();
    let data = set_maintenance(&h.data, &h.room_101, true, Utc::now()).unwrap();
    let data = mark_cleaned(&data, &h.room_101, Utc::now()).unwrap();

    assert_eq!(status(&data, &h.room_101), RoomStatus::Available);
    assert!(data.cleaning_logs.is_empty());
}

#[test]
fn test_mark_cleaned_unknown_room() {
    let h = hotel();
    let result = mark_cleaned(&h.data, &RoomId::from("ghost"), Utc::now());
    assert!(matches!(result, Err(RoomError::RoomNotFound(_))));
}

// =========================================================================
// Maintenance
// =========================================================================

#[test]
fn test_maintenance_round_trip() {
    let h = hotel();
    let data = set_maintenance(&h.data, &h.room_102, true, Utc::now()).unwrap();
    assert_eq!(status(&data, &h.room_102), RoomStatus::Maintenance);
    assert!(RoomCondition::of(&data, data.room(&h.room_102).unwrap()).out_of_service);

    let data = set_maintenance(&data, &h.room_102, false, Utc::now()).unwrap();
    assert_eq!(status(&data, &h.room_102), RoomStatus::Available);
}

#[test]
fn test_return_to_service_closes_pending_cleaning() {
    let h = hotel();
    let before_stay = Utc::now() - Duration::hours(2);
    let data = assign_cleaning(&h.data, &h.room_101, &h.cleaner, before_stay).unwrap();
    let data = set_maintenance(&data, &h.room_101, true, Utc::now()).unwrap();
    assert_eq!(data.open_cleaning_logs_for(&h.room_101).count(), 1);

    let data = set_maintenance(&data, &h.room_101, false, Utc::now()).unwrap();
    assert_eq!(status(&data, &h.room_101), RoomStatus::Available);
    assert_eq!(data.open_cleaning_logs_for(&h.room_101).count(), 0);
    assert!(check_invariants(&data).is_empty());

    // The next guest's room is clean, and check-out opens a fresh,
    // unassigned log instead of reusing the old one.
    let data = check_in(&data, &h.room_101, &zhang_san(), Utc::now()).unwrap();
    let room = data.room(&h.room_101).unwrap();
    assert_eq!(
        RoomCondition::of(&data, room).housekeeping,
        Housekeeping::Clean
    );

    let data = check_out(&data, &h.room_101, Utc::now()).unwrap();
    let open: Vec<_> = data.open_cleaning_logs_for(&h.room_101).collect();
    assert_eq!(open.len(), 1);
    assert!(open[0].staff_id.is_none());
    assert!(open[0].assigned_date > before_stay);
    assert_eq!(data.cleaning_logs.len(), 2);
}

#[test]
fn test_maintenance_on_occupied_room_strands_booking() {
    let h = hotel();
    let data = check_in(&h.data, &h.room_101, &zhang_san(), Utc::now()).unwrap();
    let booking = data.room(&h.room_101).unwrap().current_booking_id.clone().unwrap();

    let data = set_maintenance(&data, &h.room_101, true, Utc::now()).unwrap();
    let room = data.room(&h.room_101).unwrap();
    assert_eq!(room.status, RoomStatus::Maintenance);
    assert!(room.current_booking_id.is_none());
    assert!(data.booking(&booking).unwrap().is_open());

    assert_eq!(
        check_invariants(&data),
        vec![InvariantViolation::StrandedOpenBooking {
            room: h.room_101.clone(),
            booking,
        }]
    );
}

// =========================================================================
// Dispatch
// =========================================================================

#[test]
fn test_apply_runs_a_whole_stay() {
    let h = hotel();
    let now = Utc::now();
    let actions = [
        RoomAction::CheckIn {
            room_id: h.room_102.clone(),
            guest: zhang_san().with_phone("13800000000"),
        },
        RoomAction::CheckOut {
            room_id: h.room_102.clone(),
        },
        RoomAction::AssignCleaning {
            room_id: h.room_102.clone(),
            staff_id: h.cleaner.clone(),
        },
        RoomAction::MarkCleaned {
            room_id: h.room_102.clone(),
        },
    ];

    let data = actions
        .iter()
        .try_fold(h.data.clone(), |data, action| apply(&data, action, now))
        .unwrap();

    assert_eq!(status(&data, &h.room_102), RoomStatus::Available);
    assert_eq!(data.guests[0].phone, "13800000000");
    assert!(data.bookings.iter().all(|b| !b.is_open()));
    assert!(data.cleaning_logs.iter().all(|l| !l.is_open()));
    assert!(check_invariants(&data).is_empty());
}

#[test]
fn test_failed_action_leaves_input_untouched() {
    let h = hotel();
    let before = h.data.clone();
    let action = RoomAction::CheckOut {
        room_id: h.room_101.clone(),
    };
    assert!(apply(&h.data, &action, Utc::now()).is_err());
    assert_eq!(h.data, before);
}
