//! Linen inventory and laundry batches.

use chrono::{DateTime, Utc};
use innkeep_model::{
    HotelData, Linen, LinenCleaningLog, LinenCleaningLogId, LinenId, LinenStatus, StaffId, User,
};
use serde::{Deserialize, Serialize};

use crate::RecordError;
use crate::guard::{amount, require_admin, required};

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Editable fields of a linen item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinenDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub status: LinenStatus,
}

impl LinenDraft {
    fn validate(&self) -> Result<(String, f64), RecordError> {
        Ok((
            required(&self.name, "linen name")?,
            amount(self.price, "price")?,
        ))
    }
}

/// Adds a linen item and returns its new id.
pub fn add_linen(data: &HotelData, draft: &LinenDraft) -> Result<(HotelData, LinenId), RecordError> {
    let (name, price) = draft.validate()?;
    let linen = Linen {
        id: LinenId::generate(),
        name,
        price,
        status: draft.status,
    };
    let id = linen.id.clone();

    tracing::info!(linen = %id, name = %linen.name, "linen added");
    let mut next = data.clone();
    next.linens.push(linen);
    Ok((next, id))
}

pub fn update_linen(
    data: &HotelData,
    id: &LinenId,
    draft: &LinenDraft,
) -> Result<HotelData, RecordError> {
    let (name, price) = draft.validate()?;

    let mut next = data.clone();
    let linen = next
        .linens
        .iter_mut()
        .find(|l| &l.id == id)
        .ok_or_else(|| RecordError::not_found("linen", id))?;
    linen.name = name;
    linen.price = price;
    linen.status = draft.status;

    tracing::info!(linen = %id, "linen updated");
    Ok(next)
}

/// Deletes a linen item (admin only). Laundry batches keep the id in their
/// history.
pub fn delete_linen(data: &HotelData, actor: &User, id: &LinenId) -> Result<HotelData, RecordError> {
    require_admin(actor, "delete linens")?;
    if !data.linens.iter().any(|l| &l.id == id) {
        return Err(RecordError::not_found("linen", id));
    }

    let mut next = data.clone();
    next.linens.retain(|l| &l.id != id);
    tracing::info!(linen = %id, by = %actor.username, "linen deleted");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

/// How many lines a bulk import accepted and rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Imports linens from `name,price,status` lines.
///
/// Blank lines are ignored. A line with a missing field, an unparseable or
/// negative price, or an unknown status is skipped and counted in
/// [`ImportReport::skipped`]; the rest are still imported. Extra columns
/// after the status are ignored.
///
/// ```text
/// Pillowcase,12,inStock
/// Bath towel,8.5,库存
/// ```
pub fn import_linens(data: &HotelData, csv: &str) -> (HotelData, ImportReport) {
    let mut report = ImportReport::default();
    let mut next = data.clone();

    for line in csv.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Some(linen) => {
                next.linens.push(linen);
                report.imported += 1;
            }
            None => {
                tracing::debug!(line, "skipping invalid linen line");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "linen import finished"
    );
    (next, report)
}

fn parse_line(line: &str) -> Option<Linen> {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().filter(|s| !s.is_empty())?;
    let price: f64 = fields.next()?.parse().ok()?;
    let status = LinenStatus::parse(fields.next()?)?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }

    Some(Linen {
        id: LinenId::generate(),
        name: name.to_string(),
        price,
        status,
    })
}

// ---------------------------------------------------------------------------
// Status counts
// ---------------------------------------------------------------------------

/// Number of linens in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinenCounts {
    pub in_stock: usize,
    pub in_use: usize,
    pub pending_wash: usize,
    pub washing: usize,
}

impl LinenCounts {
    pub fn of(data: &HotelData) -> Self {
        let mut counts = Self::default();
        for linen in &data.linens {
            *counts.slot(linen.status) += 1;
        }
        counts
    }

    /// The count for one status.
    pub fn get(&self, status: LinenStatus) -> usize {
        match status {
            LinenStatus::InStock => self.in_stock,
            LinenStatus::InUse => self.in_use,
            LinenStatus::PendingWash => self.pending_wash,
            LinenStatus::Washing => self.washing,
        }
    }

    fn slot(&mut self, status: LinenStatus) -> &mut usize {
        match status {
            LinenStatus::InStock => &mut self.in_stock,
            LinenStatus::InUse => &mut self.in_use,
            LinenStatus::PendingWash => &mut self.pending_wash,
            LinenStatus::Washing => &mut self.washing,
        }
    }
}

// ---------------------------------------------------------------------------
// Laundry
// ---------------------------------------------------------------------------

/// Sends a batch of linens to the laundry.
///
/// Every linen becomes `Washing` and a new open batch records them.
///
/// # Errors
/// - [`RecordError::Validation`] if the batch is empty, lists an item
///   twice, or contains an item that is already washing
/// - [`RecordError::NotFound`] if a linen or the staff member is unknown
pub fn send_linens_to_wash(
    data: &HotelData,
    linen_ids: &[LinenId],
    staff_id: Option<&StaffId>,
    now: DateTime<Utc>,
) -> Result<(HotelData, LinenCleaningLogId), RecordError> {
    if linen_ids.is_empty() {
        return Err(RecordError::Validation("no linens selected".into()));
    }
    if let Some(staff) = staff_id {
        if data.staff_member(staff).is_none() {
            return Err(RecordError::not_found("staff member", staff));
        }
    }

    for (i, id) in linen_ids.iter().enumerate() {
        if linen_ids[..i].contains(id) {
            return Err(RecordError::Validation(format!("linen {id} listed twice")));
        }
        let linen = data
            .linens
            .iter()
            .find(|l| &l.id == id)
            .ok_or_else(|| RecordError::not_found("linen", id))?;
        if linen.status == LinenStatus::Washing {
            return Err(RecordError::Validation(format!(
                "linen {id} is already washing"
            )));
        }
    }

    let mut next = data.clone();
    for linen in next.linens.iter_mut().filter(|l| linen_ids.contains(&l.id)) {
        linen.status = LinenStatus::Washing;
    }
    let batch = LinenCleaningLog {
        id: LinenCleaningLogId::generate(),
        linen_ids: linen_ids.to_vec(),
        staff_id: staff_id.cloned(),
        sent_date: now,
        returned_date: None,
    };
    let id = batch.id.clone();
    next.linen_cleaning_logs.push(batch);

    tracing::info!(batch = %id, linens = linen_ids.len(), "linens sent to wash");
    Ok((next, id))
}

/// Closes a laundry batch. Linens from the batch that still exist and are
/// still washing go back in stock.
///
/// # Errors
/// - [`RecordError::NotFound`] if the batch is unknown
/// - [`RecordError::Validation`] if the batch was already returned
pub fn return_linens_from_wash(
    data: &HotelData,
    batch_id: &LinenCleaningLogId,
    now: DateTime<Utc>,
) -> Result<HotelData, RecordError> {
    let batch = data
        .linen_cleaning_logs
        .iter()
        .find(|b| &b.id == batch_id)
        .ok_or_else(|| RecordError::not_found("linen batch", batch_id))?;
    if !batch.is_open() {
        return Err(RecordError::Validation(format!(
            "linen batch {batch_id} was already returned"
        )));
    }
    let linen_ids = batch.linen_ids.clone();

    let mut next = data.clone();
    let mut restocked = 0;
    for linen in next
        .linens
        .iter_mut()
        .filter(|l| linen_ids.contains(&l.id) && l.status == LinenStatus::Washing)
    {
        linen.status = LinenStatus::InStock;
        restocked += 1;
    }
    if let Some(batch) = next.linen_cleaning_logs.iter_mut().find(|b| &b.id == batch_id) {
        batch.returned_date = Some(now);
    }

    tracing::info!(batch = %batch_id, restocked, "linens returned from wash");
    Ok(next)
}
