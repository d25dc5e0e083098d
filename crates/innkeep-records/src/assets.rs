//! Asset inventory.

use chrono::NaiveDate;
use innkeep_model::{Asset, AssetId, HotelData, User};
use serde::{Deserialize, Serialize};

use crate::RecordError;
use crate::guard::{amount, require_admin, required};

/// Editable fields of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    pub name: String,
    pub category: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value: f64,
}

impl AssetDraft {
    fn to_asset(&self, id: AssetId) -> Result<Asset, RecordError> {
        Ok(Asset {
            id,
            name: required(&self.name, "asset name")?,
            category: required(&self.category, "category")?,
            location: required(&self.location, "location")?,
            purchase_date: self.purchase_date,
            value: amount(self.value, "value")?,
        })
    }
}

/// Adds an asset and returns its new id.
pub fn add_asset(data: &HotelData, draft: &AssetDraft) -> Result<(HotelData, AssetId), RecordError> {
    let asset = draft.to_asset(AssetId::generate())?;
    let id = asset.id.clone();

    tracing::info!(asset = %id, name = %asset.name, location = %asset.location, "asset added");
    let mut next = data.clone();
    next.assets.push(asset);
    Ok((next, id))
}

pub fn update_asset(
    data: &HotelData,
    id: &AssetId,
    draft: &AssetDraft,
) -> Result<HotelData, RecordError> {
    let updated = draft.to_asset(id.clone())?;

    let mut next = data.clone();
    let asset = next
        .assets
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(|| RecordError::not_found("asset", id))?;
    *asset = updated;

    tracing::info!(asset = %id, "asset updated");
    Ok(next)
}

/// Deletes an asset (admin only).
pub fn delete_asset(data: &HotelData, actor: &User, id: &AssetId) -> Result<HotelData, RecordError> {
    require_admin(actor, "delete assets")?;
    if !data.assets.iter().any(|a| &a.id == id) {
        return Err(RecordError::not_found("asset", id));
    }

    let mut next = data.clone();
    next.assets.retain(|a| &a.id != id);
    tracing::info!(asset = %id, by = %actor.username, "asset deleted");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv() -> AssetDraft {
        AssetDraft {
            name: "TV".into(),
            category: "Electronics".into(),
            location: "Room 101".into(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            value: 300.0,
        }
    }

    #[test]
    fn test_add_asset_requires_location() {
        let draft = AssetDraft {
            location: " ".into(),
            ..tv()
        };
        assert_eq!(
            add_asset(&HotelData::default(), &draft).map(|_| ()),
            Err(RecordError::Validation("location is required".into()))
        );
    }

    #[test]
    fn test_update_asset_replaces_fields() {
        let (data, id) = add_asset(&HotelData::default(), &tv()).unwrap();
        let moved = AssetDraft {
            location: "Lobby".into(),
            value: 250.0,
            ..tv()
        };
        let data = update_asset(&data, &id, &moved).unwrap();
        assert_eq!(data.assets[0].location, "Lobby");
        assert_eq!(data.assets[0].value, 250.0);
        assert_eq!(data.assets[0].id, id);
    }
}
