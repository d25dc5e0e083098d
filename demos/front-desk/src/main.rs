use std::error::Error;

use innkeep::prelude::*;
use innkeep::sample::ADMIN_USER_ID;
use innkeep_model::{LinenCleaningLogId, LinenId, LinenStatus};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Shift script
// ---------------------------------------------------------------------------

const LINENS_PER_BATCH: usize = 3;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShiftReport {
    room_number: String,
    guest: String,
    cleaned_by: String,
    washed_linens: usize,
    stats: DashboardStats,
}

/// Plays one guest's stay in the first free room, then runs a linen batch.
async fn run_shift(hotel: &HotelHandle, guest: GuestDetails) -> Result<ShiftReport, Box<dyn Error>> {
    let admin = hotel.login(&UserId::from(ADMIN_USER_ID)).await?;

    let data = hotel.snapshot();
    let Some(room) = data
        .rooms
        .iter()
        .find(|r| r.status == RoomStatus::Available)
    else {
        return Err(missing("no available room"));
    };
    let Some(cleaner) = data.staff.iter().find(|s| s.role == StaffRole::Cleaning) else {
        return Err(missing("no cleaning staff"));
    };
    let (room_id, room_number) = (room.id.clone(), room.room_number.clone());
    let (cleaner_id, cleaner_name) = (cleaner.id.clone(), cleaner.name.clone());
    let guest_name = guest.name.clone();

    hotel
        .dispatch(RoomAction::CheckIn {
            room_id: room_id.clone(),
            guest,
        })
        .await?;
    tracing::info!(room = %room_number, guest = %guest_name, "guest checked in");

    hotel
        .dispatch(RoomAction::CheckOut {
            room_id: room_id.clone(),
        })
        .await?;
    hotel
        .dispatch(RoomAction::AssignCleaning {
            room_id: room_id.clone(),
            staff_id: cleaner_id.clone(),
        })
        .await?;
    let condition = {
        let data = hotel.snapshot();
        data.room(&room_id).map(|room| RoomCondition::of(&data, room))
    };
    tracing::info!(room = %room_number, ?condition, "cleaning in progress");

    hotel.dispatch(RoomAction::MarkCleaned { room_id }).await?;

    let batch: Vec<LinenId> = hotel
        .snapshot()
        .linens
        .iter()
        .filter(|l| l.status == LinenStatus::InStock)
        .take(LINENS_PER_BATCH)
        .map(|l| l.id.clone())
        .collect();
    let washed_linens = batch.len();
    if !batch.is_empty() {
        let outcome = hotel
            .record(
                &admin.id,
                RecordOp::SendLinensToWash {
                    linen_ids: batch,
                    staff_id: Some(cleaner_id),
                },
            )
            .await?;
        if let RecordOutcome::Created(batch_id) = outcome {
            hotel
                .record(
                    &admin.id,
                    RecordOp::ReturnLinensFromWash {
                        batch_id: LinenCleaningLogId::from(batch_id),
                    },
                )
                .await?;
        }
    }

    Ok(ShiftReport {
        room_number,
        guest: guest_name,
        cleaned_by: cleaner_name,
        washed_linens,
        stats: hotel.stats(),
    })
}

fn missing(what: &str) -> Box<dyn Error> {
    format!("{what}: seed sample data or add records first").into()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    innkeep::init_tracing();

    let mut config = HotelConfig::load()?;
    if let Some(dir) = std::env::args().nth(1) {
        config.storage_dir = dir.into();
    }
    eprintln!("using hotel data in {}", config.storage_dir.display());

    let hotel = innkeep::open(&config).await?;
    let report = run_shift(&hotel, GuestDetails::new("Zhang San", "X123")).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    hotel.shutdown().await?;
    Ok(())
}
