//! The registry's operations as one dispatchable enum.
//!
//! The hotel service receives these over its command channel, so they are
//! plain data (serde) and carry everything the operation needs except the
//! acting user, which the service resolves itself.

use chrono::{DateTime, Utc};
use innkeep_model::{
    AssetId, HotelData, LinenCleaningLogId, LinenId, RoomId, StaffId, User, UserId, UserRole,
};
use serde::{Deserialize, Serialize};

use crate::guard::require_admin;
use crate::{
    AssetDraft, ImportReport, LinenDraft, RecordError, RoomDraft, StaffDraft, assets, linens,
    rooms, staff, users,
};

/// A registry operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum RecordOp {
    AddStaff { draft: StaffDraft },
    UpdateStaff { id: StaffId, draft: StaffDraft },
    DeleteStaff { id: StaffId },

    AddRoom { draft: RoomDraft },
    UpdateRoom { id: RoomId, draft: RoomDraft },
    DeleteRoom { id: RoomId },

    AddLinen { draft: LinenDraft },
    UpdateLinen { id: LinenId, draft: LinenDraft },
    DeleteLinen { id: LinenId },
    ImportLinens { csv: String },
    SendLinensToWash {
        linen_ids: Vec<LinenId>,
        #[serde(default)]
        staff_id: Option<StaffId>,
    },
    ReturnLinensFromWash { batch_id: LinenCleaningLogId },

    AddAsset { draft: AssetDraft },
    UpdateAsset { id: AssetId, draft: AssetDraft },
    DeleteAsset { id: AssetId },

    AddUser { username: String, role: UserRole },
    RenameUser { id: UserId, username: String },
    ChangeUserRole { id: UserId, role: UserRole },
    DeleteUser { id: UserId },

    ClearBusinessData,
}

/// What an operation produced besides the new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RecordOutcome {
    /// A record was changed or removed.
    Done,
    /// A record was created; carries its new id.
    Created(String),
    /// A bulk import ran.
    Imported(ImportReport),
}

/// Runs `op` as `actor` against `data`.
///
/// Permission checks live in the operations themselves, so calling the
/// per-entity functions directly is just as safe as going through here.
pub fn apply(
    data: &HotelData,
    actor: &User,
    op: &RecordOp,
    now: DateTime<Utc>,
) -> Result<(HotelData, RecordOutcome), RecordError> {
    fn created(
        result: Result<(HotelData, impl ToString), RecordError>,
    ) -> Result<(HotelData, RecordOutcome), RecordError> {
        result.map(|(data, id)| (data, RecordOutcome::Created(id.to_string())))
    }
    fn done(result: Result<HotelData, RecordError>) -> Result<(HotelData, RecordOutcome), RecordError> {
        result.map(|data| (data, RecordOutcome::Done))
    }

    match op {
        RecordOp::AddStaff { draft } => created(staff::add_staff(data, draft)),
        RecordOp::UpdateStaff { id, draft } => done(staff::update_staff(data, id, draft)),
        RecordOp::DeleteStaff { id } => done(staff::delete_staff(data, actor, id)),

        RecordOp::AddRoom { draft } => created(rooms::add_room(data, draft)),
        RecordOp::UpdateRoom { id, draft } => done(rooms::update_room(data, id, draft)),
        RecordOp::DeleteRoom { id } => done(rooms::delete_room(data, actor, id)),

        RecordOp::AddLinen { draft } => created(linens::add_linen(data, draft)),
        RecordOp::UpdateLinen { id, draft } => done(linens::update_linen(data, id, draft)),
        RecordOp::DeleteLinen { id } => done(linens::delete_linen(data, actor, id)),
        RecordOp::ImportLinens { csv } => {
            let (next, report) = linens::import_linens(data, csv);
            Ok((next, RecordOutcome::Imported(report)))
        }
        RecordOp::SendLinensToWash { linen_ids, staff_id } => created(
            linens::send_linens_to_wash(data, linen_ids, staff_id.as_ref(), now),
        ),
        RecordOp::ReturnLinensFromWash { batch_id } => {
            done(linens::return_linens_from_wash(data, batch_id, now))
        }

        RecordOp::AddAsset { draft } => created(assets::add_asset(data, draft)),
        RecordOp::UpdateAsset { id, draft } => done(assets::update_asset(data, id, draft)),
        RecordOp::DeleteAsset { id } => done(assets::delete_asset(data, actor, id)),

        RecordOp::AddUser { username, role } => {
            created(users::add_user(data, actor, username, *role))
        }
        RecordOp::RenameUser { id, username } => {
            done(users::rename_user(data, actor, id, username))
        }
        RecordOp::ChangeUserRole { id, role } => {
            done(users::change_user_role(data, actor, id, *role))
        }
        RecordOp::DeleteUser { id } => done(users::delete_user(data, actor, id)),

        RecordOp::ClearBusinessData => done(clear_business_data(data, actor)),
    }
}

/// Empties every collection except user accounts (admin only).
pub fn clear_business_data(data: &HotelData, actor: &User) -> Result<HotelData, RecordError> {
    require_admin(actor, "clear hotel data")?;
    tracing::warn!(
        by = %actor.username,
        rooms = data.rooms.len(),
        bookings = data.bookings.len(),
        "clearing all hotel data except users"
    );
    Ok(HotelData {
        users: data.users.clone(),
        ..HotelData::default()
    })
}
