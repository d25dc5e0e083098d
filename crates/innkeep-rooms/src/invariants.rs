//! Consistency checks across rooms, bookings, and cleaning logs.
//!
//! The lifecycle functions keep these rules on their own. The checker is
//! for documents that came from elsewhere (an older file, a manual edit)
//! and for tests that want to assert a whole sequence left things sane.

use std::fmt;

use innkeep_model::{BookingId, HotelData, RoomId, RoomStatus};

/// One way a room's records can disagree with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The room is `Occupied` but has no open booking linked to it.
    OccupiedWithoutOpenBooking(RoomId),
    /// The room links to a booking while not `Occupied`.
    BookingLinkWhileNotOccupied(RoomId),
    /// The room is `Cleaning` but has no open cleaning log.
    CleaningWithoutOpenLog(RoomId),
    /// The room has more than one open cleaning log.
    MultipleOpenCleaningLogs(RoomId, usize),
    /// An open booking belongs to the room but the room does not link to it.
    /// Left behind when a maintenance override evicts a guest.
    StrandedOpenBooking { room: RoomId, booking: BookingId },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OccupiedWithoutOpenBooking(room) => {
                write!(f, "room {room} is occupied without an open booking")
            }
            Self::BookingLinkWhileNotOccupied(room) => {
                write!(f, "room {room} links a booking but is not occupied")
            }
            Self::CleaningWithoutOpenLog(room) => {
                write!(f, "room {room} is cleaning without an open log")
            }
            Self::MultipleOpenCleaningLogs(room, n) => {
                write!(f, "room {room} has {n} open cleaning logs")
            }
            Self::StrandedOpenBooking { room, booking } => {
                write!(f, "booking {booking} is open but room {room} does not hold it")
            }
        }
    }
}

/// Checks every room in `data` and returns what is wrong, in room order.
///
/// An empty result means the document is consistent.
pub fn check_invariants(data: &HotelData) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for room in &data.rooms {
        let linked_open = room
            .current_booking_id
            .as_ref()
            .and_then(|id| data.booking(id))
            .is_some_and(|b| b.is_open());

        match room.status {
            RoomStatus::Occupied if !linked_open => {
                violations.push(InvariantViolation::OccupiedWithoutOpenBooking(
                    room.id.clone(),
                ));
            }
            RoomStatus::Occupied => {}
            _ if room.current_booking_id.is_some() => {
                violations.push(InvariantViolation::BookingLinkWhileNotOccupied(
                    room.id.clone(),
                ));
            }
            _ => {}
        }

        let open_logs = data.open_cleaning_logs_for(&room.id).count();
        if room.status == RoomStatus::Cleaning && open_logs == 0 {
            violations.push(InvariantViolation::CleaningWithoutOpenLog(room.id.clone()));
        }
        if open_logs > 1 {
            violations.push(InvariantViolation::MultipleOpenCleaningLogs(
                room.id.clone(),
                open_logs,
            ));
        }

        for booking in data.open_bookings_for(room) {
            if room.current_booking_id.as_ref() != Some(&booking.id) {
                violations.push(InvariantViolation::StrandedOpenBooking {
                    room: room.id.clone(),
                    booking: booking.id.clone(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use innkeep_model::{Booking, CleaningLog, CleaningLogId, GuestId, Room};

    fn open_booking(id: &str, room: &Room) -> Booking {
        Booking {
            id: BookingId::from(id),
            guest_id: GuestId::from("g1"),
            room_id: Some(room.id.clone()),
            check_in: Utc::now(),
            check_out: None,
        }
    }

    fn open_log(id: &str, room: &Room) -> CleaningLog {
        CleaningLog {
            id: CleaningLogId::from(id),
            room_id: room.id.clone(),
            staff_id: None,
            assigned_date: Utc::now(),
            completed_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_document_is_consistent() {
        assert!(check_invariants(&HotelData::default()).is_empty());
    }

    #[test]
    fn test_occupied_room_without_booking() {
        let mut data = HotelData::default();
        let mut room = Room::new("101", 1, 2);
        room.status = RoomStatus::Occupied;
        let id = room.id.clone();
        data.rooms.push(room);

        assert_eq!(
            check_invariants(&data),
            vec![InvariantViolation::OccupiedWithoutOpenBooking(id)]
        );
    }

    #[test]
    fn test_link_on_available_room_and_stranded_booking() {
        let mut data = HotelData::default();
        let mut room = Room::new("101", 1, 2);
        let booking = open_booking("b1", &room);
        room.current_booking_id = Some(booking.id.clone());
        data.bookings.push(booking);
        let id = room.id.clone();
        data.rooms.push(room);

        assert_eq!(
            check_invariants(&data),
            vec![InvariantViolation::BookingLinkWhileNotOccupied(id)]
        );

        data.rooms[0].current_booking_id = None;
        assert_eq!(
            check_invariants(&data),
            vec![InvariantViolation::StrandedOpenBooking {
                room: data.rooms[0].id.clone(),
                booking: BookingId::from("b1"),
            }]
        );
    }

    #[test]
    fn test_cleaning_room_log_counts() {
        let mut data = HotelData::default();
        let mut room = Room::new("101", 1, 2);
        room.status = RoomStatus::Cleaning;
        let id = room.id.clone();

        assert_eq!(
            {
                let mut d = data.clone();
                d.rooms.push(room.clone());
                check_invariants(&d)
            },
            vec![InvariantViolation::CleaningWithoutOpenLog(id.clone())]
        );

        data.cleaning_logs.push(open_log("c1", &room));
        data.cleaning_logs.push(open_log("c2", &room));
        data.rooms.push(room);
        assert_eq!(
            check_invariants(&data),
            vec![InvariantViolation::MultipleOpenCleaningLogs(id, 2)]
        );
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation::MultipleOpenCleaningLogs(RoomId::from("r1"), 3);
        assert_eq!(v.to_string(), "room r1 has 3 open cleaning logs");
    }
}
