//! Sample hotel used to seed an empty store.

use chrono::{Days, NaiveDate};
use innkeep_model::{
    Asset, AssetId, HotelData, Linen, LinenId, LinenStatus, Room, Staff, StaffId, StaffRole,
    User, UserId, UserRole,
};
use rand::Rng;

use crate::SampleConfig;

/// Id of the seeded admin account.
pub const ADMIN_USER_ID: &str = "user-admin";
/// Id of the seeded standard account.
pub const STANDARD_USER_ID: &str = "user-standard";

const STAFF: [(&str, StaffRole); 5] = [
    ("Alice", StaffRole::Cleaning),
    ("Bob", StaffRole::Cleaning),
    ("Charlie", StaffRole::FrontDesk),
    ("Diana", StaffRole::Manager),
    ("Ethan", StaffRole::Maintenance),
];

const LINEN_KINDS: [&str; 5] = ["Pillowcase", "Bed sheet", "Duvet cover", "Bath towel", "Hand towel"];

const ROOM_ASSETS: [(&str, &str); 10] = [
    ("TV", "Electronics"),
    ("Mini fridge", "Electronics"),
    ("Kettle", "Electronics"),
    ("Bed frame", "Furniture"),
    ("Mattress", "Furniture"),
    ("Desk", "Furniture"),
    ("Chair", "Furniture"),
    ("Lamp", "Furniture"),
    ("Shower head", "Plumbing"),
    ("Faucet", "Plumbing"),
];

/// Every room gets at least this many of [`ROOM_ASSETS`], in order.
const MIN_ASSETS_PER_ROOM: usize = 4;

/// Purchase dates go back at most this many days from `today`.
const MAX_ASSET_AGE_DAYS: u64 = 3 * 365;

/// Generates a sample hotel using the thread-local RNG.
pub fn generate(config: &SampleConfig, today: NaiveDate) -> HotelData {
    generate_with(config, today, &mut rand::rng())
}

/// Generates a sample hotel from `rng`.
///
/// - rooms `{floor}0{n}` for every floor and room index, capacity 4 when
///   `n` is a multiple of 3, otherwise 2, all available
/// - five staff, two of them cleaners
/// - `linens_per_kind` in-stock linens of each kind, priced 5 to 24
/// - four to nine assets per room, bought within the last three years
/// - an admin and a standard user account
pub fn generate_with<R: Rng>(
    config: &SampleConfig,
    today: NaiveDate,
    rng: &mut R,
) -> HotelData {
    let mut data = HotelData {
        staff: STAFF
            .iter()
            .map(|(name, role)| Staff {
                id: StaffId::generate(),
                name: (*name).to_string(),
                role: *role,
            })
            .collect(),
        users: vec![
            User {
                id: UserId::from(ADMIN_USER_ID),
                username: "Admin".to_string(),
                role: UserRole::Admin,
            },
            User {
                id: UserId::from(STANDARD_USER_ID),
                username: "Front desk".to_string(),
                role: UserRole::User,
            },
        ],
        ..HotelData::default()
    };

    for floor in 1..=config.floors {
        for n in 1..=config.rooms_per_floor {
            let capacity = if n % 3 == 0 { 4 } else { 2 };
            data.rooms.push(Room::new(format!("{floor}0{n}"), floor, capacity));
        }
    }

    for kind in LINEN_KINDS {
        for _ in 0..config.linens_per_kind {
            data.linens.push(Linen {
                id: LinenId::generate(),
                name: kind.to_string(),
                price: f64::from(rng.random_range(5..25u32)),
                status: LinenStatus::InStock,
            });
        }
    }

    for room in &data.rooms {
        let count = rng.random_range(MIN_ASSETS_PER_ROOM..=ROOM_ASSETS.len() - 1);
        for (name, category) in &ROOM_ASSETS[..count] {
            let age = rng.random_range(0..MAX_ASSET_AGE_DAYS);
            data.assets.push(Asset {
                id: AssetId::generate(),
                name: (*name).to_string(),
                category: (*category).to_string(),
                location: format!("Room {}", room.room_number),
                purchase_date: today.checked_sub_days(Days::new(age)).unwrap_or(today),
                value: f64::from(rng.random_range(50..550u32)),
            });
        }
    }

    tracing::info!(
        rooms = data.rooms.len(),
        linens = data.linens.len(),
        assets = data.assets.len(),
        "sample data generated"
    );
    data
}
