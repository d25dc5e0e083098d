//! User accounts and login.
//!
//! There are no passwords: logging in means picking an existing account.
//! The hotel must always keep at least one admin, otherwise nobody could
//! delete records or change roles again.

use innkeep_model::{HotelData, User, UserId, UserRole};

use crate::RecordError;
use crate::guard::{require_admin, required};

/// Looks up the account to act as.
pub fn login(data: &HotelData, id: &UserId) -> Result<User, RecordError> {
    let user = data
        .user(id)
        .cloned()
        .ok_or_else(|| RecordError::not_found("user", id))?;
    tracing::info!(user = %user.username, role = %user.role, "logged in");
    Ok(user)
}

/// Creates an account. Only an admin may create another admin.
pub fn add_user(
    data: &HotelData,
    actor: &User,
    username: &str,
    role: UserRole,
) -> Result<(HotelData, UserId), RecordError> {
    if role.is_admin() {
        require_admin(actor, "create admin accounts")?;
    }
    let username = unique_username(data, username, None)?;

    let user = User {
        id: UserId::generate(),
        username,
        role,
    };
    let id = user.id.clone();

    tracing::info!(user = %user.username, %role, by = %actor.username, "user added");
    let mut next = data.clone();
    next.users.push(user);
    Ok((next, id))
}

/// Changes a username. Users may rename themselves; renaming anyone else
/// is admin only.
pub fn rename_user(
    data: &HotelData,
    actor: &User,
    id: &UserId,
    username: &str,
) -> Result<HotelData, RecordError> {
    if &actor.id != id {
        require_admin(actor, "rename other users")?;
    }
    if data.user(id).is_none() {
        return Err(RecordError::not_found("user", id));
    }
    let username = unique_username(data, username, Some(id))?;

    let mut next = data.clone();
    if let Some(user) = next.users.iter_mut().find(|u| &u.id == id) {
        user.username = username;
    }
    tracing::info!(user = %id, by = %actor.username, "user renamed");
    Ok(next)
}

/// Changes a user's role (admin only). Demoting the last admin is refused.
pub fn change_user_role(
    data: &HotelData,
    actor: &User,
    id: &UserId,
    role: UserRole,
) -> Result<HotelData, RecordError> {
    require_admin(actor, "change user roles")?;
    let user = data
        .user(id)
        .ok_or_else(|| RecordError::not_found("user", id))?;
    if user.role.is_admin() && !role.is_admin() {
        ensure_other_admin(data, id)?;
    }

    let mut next = data.clone();
    if let Some(user) = next.users.iter_mut().find(|u| &u.id == id) {
        user.role = role;
    }
    tracing::info!(user = %user.username, %role, by = %actor.username, "user role changed");
    Ok(next)
}

/// Deletes an account (admin only). Deleting the last admin is refused.
pub fn delete_user(data: &HotelData, actor: &User, id: &UserId) -> Result<HotelData, RecordError> {
    require_admin(actor, "delete users")?;
    let user = data
        .user(id)
        .ok_or_else(|| RecordError::not_found("user", id))?;
    if user.role.is_admin() {
        ensure_other_admin(data, id)?;
    }

    let mut next = data.clone();
    next.users.retain(|u| &u.id != id);
    tracing::info!(user = %user.username, by = %actor.username, "user deleted");
    Ok(next)
}

fn unique_username(
    data: &HotelData,
    username: &str,
    editing: Option<&UserId>,
) -> Result<String, RecordError> {
    let username = required(username, "username")?;
    if data
        .users
        .iter()
        .any(|u| u.username == username && Some(&u.id) != editing)
    {
        return Err(RecordError::Duplicate(format!("username {username}")));
    }
    Ok(username)
}

fn ensure_other_admin(data: &HotelData, leaving: &UserId) -> Result<(), RecordError> {
    let others = data
        .users
        .iter()
        .filter(|u| &u.id != leaving && u.role.is_admin())
        .count();
    if others == 0 {
        return Err(RecordError::Validation(
            "the hotel must keep at least one admin".into(),
        ));
    }
    Ok(())
}
