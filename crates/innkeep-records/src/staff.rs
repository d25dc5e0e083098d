//! Staff records.

use innkeep_model::{HotelData, Staff, StaffId, StaffRole, User};
use serde::{Deserialize, Serialize};

use crate::RecordError;
use crate::guard::{require_admin, required};

/// Editable fields of a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffDraft {
    pub name: String,
    pub role: StaffRole,
}

/// Adds a staff member and returns their new id.
pub fn add_staff(
    data: &HotelData,
    draft: &StaffDraft,
) -> Result<(HotelData, StaffId), RecordError> {
    let staff = Staff {
        id: StaffId::generate(),
        name: required(&draft.name, "staff name")?,
        role: draft.role,
    };
    let id = staff.id.clone();

    tracing::info!(staff = %id, name = %staff.name, role = %staff.role, "staff added");
    let mut next = data.clone();
    next.staff.push(staff);
    Ok((next, id))
}

/// Renames a staff member or changes their role.
///
/// Open cleaning assignments are kept even if the new role is not
/// `Cleaning`.
pub fn update_staff(
    data: &HotelData,
    id: &StaffId,
    draft: &StaffDraft,
) -> Result<HotelData, RecordError> {
    let name = required(&draft.name, "staff name")?;

    let mut next = data.clone();
    let staff = next
        .staff
        .iter_mut()
        .find(|s| &s.id == id)
        .ok_or_else(|| RecordError::not_found("staff member", id))?;
    staff.name = name;
    staff.role = draft.role;

    tracing::info!(staff = %id, "staff updated");
    Ok(next)
}

/// Deletes a staff member (admin only).
///
/// Cleaning logs and linen batches that referenced them keep their history
/// but lose the staff reference.
pub fn delete_staff(
    data: &HotelData,
    actor: &User,
    id: &StaffId,
) -> Result<HotelData, RecordError> {
    require_admin(actor, "delete staff")?;
    if data.staff_member(id).is_none() {
        return Err(RecordError::not_found("staff member", id));
    }

    let mut next = data.clone();
    next.staff.retain(|s| &s.id != id);

    let mut detached = 0;
    for log in &mut next.cleaning_logs {
        if log.staff_id.as_ref() == Some(id) {
            log.staff_id = None;
            detached += 1;
        }
    }
    for log in &mut next.linen_cleaning_logs {
        if log.staff_id.as_ref() == Some(id) {
            log.staff_id = None;
            detached += 1;
        }
    }

    tracing::info!(staff = %id, by = %actor.username, detached, "staff deleted");
    Ok(next)
}
