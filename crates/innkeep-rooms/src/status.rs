//! Status state machine, derived room facets, and dashboard counts.

use innkeep_model::{BookingId, CleaningLogId, HotelData, Room, RoomStatus};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A lifecycle action, reduced to what the status machine needs to know.
///
/// [`Transition::target`] is the single source of truth for which status
/// a room ends in. The lifecycle functions consult it before touching any
/// records, so an illegal action is rejected before anything changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CheckIn,
    CheckOut,
    AssignCleaning,
    MarkCleaned,
    SetMaintenance(bool),
}

impl Transition {
    /// Returns the status a room in `from` moves to, or `None` if the
    /// transition is not allowed from that status.
    ///
    /// Cleaning requested on an occupied room is turn-down service: the
    /// guest keeps the room, so the status stays `Occupied`.
    pub fn target(self, from: RoomStatus) -> Option<RoomStatus> {
        use RoomStatus::{Available, Cleaning, Maintenance, Occupied};

        match (self, from) {
            (Self::CheckIn, Available) => Some(Occupied),
            (Self::CheckIn, _) => None,
            (Self::CheckOut, Occupied) => Some(Cleaning),
            (Self::CheckOut, _) => None,
            (Self::AssignCleaning, Occupied) => Some(Occupied),
            (Self::AssignCleaning, _) => Some(Cleaning),
            (Self::MarkCleaned, Occupied) => Some(Occupied),
            (Self::MarkCleaned, _) => Some(Available),
            (Self::SetMaintenance(true), _) => Some(Maintenance),
            (Self::SetMaintenance(false), _) => Some(Available),
        }
    }

    /// Returns `true` if the transition is allowed from `from`.
    pub fn is_allowed_from(self, from: RoomStatus) -> bool {
        self.target(from).is_some()
    }
}

// ---------------------------------------------------------------------------
// RoomCondition
// ---------------------------------------------------------------------------

/// Whether a guest holds the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupancy {
    Vacant,
    Occupied(BookingId),
}

/// The cleaning state of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Housekeeping {
    /// No cleaning pending.
    Clean,
    /// Cleaning is needed but nobody is assigned yet.
    Dirty,
    /// A cleaner is assigned to the open log.
    InProgress(CleaningLogId),
}

/// The independent facets hidden behind a room's single `status` field.
///
/// The persisted document keeps one `status` per room. This view splits
/// it back into occupancy, housekeeping and out-of-service so callers can
/// answer "is the guest still there?" and "does it need cleaning?"
/// separately, e.g. for an occupied room with turn-down cleaning pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCondition {
    pub occupancy: Occupancy,
    pub housekeeping: Housekeeping,
    pub out_of_service: bool,
}

impl RoomCondition {
    /// Derives the facets of `room` from the document.
    pub fn of(data: &HotelData, room: &Room) -> Self {
        let occupancy = match &room.current_booking_id {
            Some(id) if data.booking(id).is_some_and(|b| b.is_open()) => {
                Occupancy::Occupied(id.clone())
            }
            _ => Occupancy::Vacant,
        };

        let latest_open = data
            .open_cleaning_logs_for(&room.id)
            .max_by_key(|log| log.assigned_date);
        let housekeeping = match latest_open {
            Some(log) if log.staff_id.is_some() => {
                Housekeeping::InProgress(log.id.clone())
            }
            Some(_) => Housekeeping::Dirty,
            None if room.status == RoomStatus::Cleaning => Housekeeping::Dirty,
            None => Housekeeping::Clean,
        };

        Self {
            occupancy,
            housekeeping,
            out_of_service: room.status == RoomStatus::Maintenance,
        }
    }

    /// Returns `true` if the room needs or is receiving cleaning.
    pub fn needs_cleaning(&self) -> bool {
        !matches!(self.housekeeping, Housekeeping::Clean)
    }
}

// ---------------------------------------------------------------------------
// RoomStats
// ---------------------------------------------------------------------------

/// Room counts per status, as shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStats {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub cleaning: usize,
    pub maintenance: usize,
}

impl RoomStats {
    /// Counts the rooms in `data` by status.
    pub fn of(data: &HotelData) -> Self {
        data.rooms.iter().fold(
            Self {
                total: data.rooms.len(),
                ..Self::default()
            },
            |mut stats, room| {
                match room.status {
                    RoomStatus::Available => stats.available += 1,
                    RoomStatus::Occupied => stats.occupied += 1,
                    RoomStatus::Cleaning => stats.cleaning += 1,
                    RoomStatus::Maintenance => stats.maintenance += 1,
                }
                stats
            },
        )
    }

    /// Occupied rooms as a percentage of all rooms. 0 for an empty hotel.
    pub fn occupancy_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.occupied as f64 * 100.0 / self.total as f64
    }
}
