//! Shared checks: admin permission and required text fields.

use innkeep_model::User;

use crate::RecordError;

/// Refuses `action` unless `actor` is an admin.
pub(crate) fn require_admin(actor: &User, action: &'static str) -> Result<(), RecordError> {
    if actor.role.is_admin() {
        return Ok(());
    }
    tracing::debug!(user = %actor.username, action, "permission denied");
    Err(RecordError::PermissionDenied {
        user: actor.username.clone(),
        action,
    })
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn required(value: &str, field: &str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative, infinite, and NaN amounts.
pub(crate) fn amount(value: f64, field: &str) -> Result<f64, RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RecordError::Validation(format!(
            "{field} must be a non-negative number"
        )))
    }
}
