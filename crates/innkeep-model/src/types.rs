//! Identifier newtypes and the closed value sets used by hotel records.
//!
//! Identifiers are strings rather than integers because the persisted
//! document predates this crate: rooms and bookings carry random UUIDs,
//! while the seeded users carry fixed ids such as `user-admin`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Declares a string-backed identifier newtype.
///
/// Each id serializes as a plain JSON string (`#[serde(transparent)]`), so
/// `RoomId("a1".into())` is written as `"a1"`, not `{"0":"a1"}`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generates a fresh random (v4 UUID) identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifies a room.
    RoomId
);
string_id!(
    /// Identifies a guest. Guests are append-only, so a `GuestId` never
    /// dangles.
    GuestId
);
string_id!(
    /// Identifies a booking (one stay of one guest in one room).
    BookingId
);
string_id!(
    /// Identifies a room cleaning task.
    CleaningLogId
);
string_id!(
    /// Identifies a staff member.
    StaffId
);
string_id!(
    /// Identifies a single linen item.
    LinenId
);
string_id!(
    /// Identifies a batch of linens sent out for washing.
    LinenCleaningLogId
);
string_id!(
    /// Identifies an inventory asset.
    AssetId
);
string_id!(
    /// Identifies a user account.
    UserId
);

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The status shown on a room card.
///
/// Serialized in lowercase camel case (`"available"`). Documents written by
/// the browser version of the tracker used Chinese labels; those are
/// accepted on read through `alias`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum RoomStatus {
    /// Clean and ready for a guest.
    #[default]
    #[serde(alias = "可用")]
    Available,
    /// A guest is checked in.
    #[serde(alias = "入住")]
    Occupied,
    /// Waiting for or undergoing cleaning.
    #[serde(alias = "打扫中")]
    Cleaning,
    /// Out of service.
    #[serde(alias = "维修中")]
    Maintenance,
}

impl RoomStatus {
    /// Every status, in dashboard order.
    pub const ALL: [RoomStatus; 4] = [
        Self::Available,
        Self::Occupied,
        Self::Cleaning,
        Self::Maintenance,
    ];

    /// Returns `true` if a guest can be checked in.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Returns `true` if a guest currently holds the room.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Occupied => write!(f, "Occupied"),
            Self::Cleaning => write!(f, "Cleaning"),
            Self::Maintenance => write!(f, "Maintenance"),
        }
    }
}

// ---------------------------------------------------------------------------
// StaffRole
// ---------------------------------------------------------------------------

/// The job a staff member does. Only [`StaffRole::Cleaning`] staff can be
/// assigned to clean a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StaffRole {
    #[serde(alias = "保洁")]
    Cleaning,
    #[serde(alias = "前台")]
    FrontDesk,
    #[serde(alias = "财务")]
    Finance,
    #[serde(alias = "维修")]
    Maintenance,
    #[serde(alias = "经理")]
    Manager,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cleaning => write!(f, "Cleaning"),
            Self::FrontDesk => write!(f, "FrontDesk"),
            Self::Finance => write!(f, "Finance"),
            Self::Maintenance => write!(f, "Maintenance"),
            Self::Manager => write!(f, "Manager"),
        }
    }
}

// ---------------------------------------------------------------------------
// LinenStatus
// ---------------------------------------------------------------------------

/// Where a linen item currently is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum LinenStatus {
    #[default]
    #[serde(alias = "库存")]
    InStock,
    #[serde(alias = "使用中")]
    InUse,
    #[serde(alias = "待清洗")]
    PendingWash,
    #[serde(alias = "清洗中")]
    Washing,
}

impl LinenStatus {
    /// Every status, in inventory-report order.
    pub const ALL: [LinenStatus; 4] = [
        Self::InStock,
        Self::InUse,
        Self::PendingWash,
        Self::Washing,
    ];

    /// Parses a status from an import line.
    ///
    /// Accepts the serialized name (`inStock`), the display name
    /// (`InStock`), and the legacy label (`库存`). Unknown values return
    /// `None` so the importer can skip the line.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "inStock" | "InStock" | "库存" => Some(Self::InStock),
            "inUse" | "InUse" | "使用中" => Some(Self::InUse),
            "pendingWash" | "PendingWash" | "待清洗" => Some(Self::PendingWash),
            "washing" | "Washing" | "清洗中" => Some(Self::Washing),
            _ => None,
        }
    }
}

impl fmt::Display for LinenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStock => write!(f, "InStock"),
            Self::InUse => write!(f, "InUse"),
            Self::PendingWash => write!(f, "PendingWash"),
            Self::Washing => write!(f, "Washing"),
        }
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Account role. Admins may perform destructive actions (deletes, role
/// changes, data resets); regular users may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    #[serde(alias = "管理员")]
    Admin,
    #[serde(alias = "普通用户")]
    User,
}

impl UserRole {
    /// Returns `true` for [`UserRole::Admin`].
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::User => write!(f, "User"),
        }
    }
}
