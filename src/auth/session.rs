//! User table and per-request session context.
//!
//! A [`SessionContext`] is created by `authenticate`, handed down the call
//! chain explicitly, and dropped when the request is done. There is no
//! ambient "current user": whoever needs the session gets it as a
//! parameter.

use std::{collections::HashMap, path::Path};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{
    password::verify_password,
    roles::{Permission, Role},
};
use crate::config::{BUILTIN_USERS, constants};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    #[error("invalid password for '{0}'")]
    InvalidPassword(String),

    #[error(
        "credentials required (pass --user/--password or set {}/{})",
        constants::ENV_USER,
        constants::ENV_PASSWORD
    )]
    MissingCredentials,

    #[error("'{username}' ({role}) is not allowed to {action}")]
    PermissionDenied {
        username: String,
        role: Role,
        action: &'static str,
    },

    #[error("users file {path}: {reason}")]
    InvalidUserFile { path: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    /// SHA-256 of the password, lowercase hex.
    pub password_hash: String,
    pub role: Role,
}

/// Credential store: builtin demo accounts, optionally overridden per entry
/// by a JSON file.
#[derive(Debug, Clone)]
pub struct UserTable {
    users: HashMap<String, UserRecord>,
}

impl UserTable {
    pub fn builtin() -> Self {
        let users = BUILTIN_USERS
            .iter()
            .filter_map(|entry| {
                // Builtin roles are compile-time strings; a typo there is a bug,
                // not an input error, so just drop and complain loudly.
                let Some(role) = Role::parse(entry.role) else {
                    log::error!("builtin user '{}' has unknown role '{}'", entry.username, entry.role);
                    return None;
                };
                Some((
                    entry.username.to_string(),
                    UserRecord {
                        password_hash: entry.password_hash.to_string(),
                        role,
                    },
                ))
            })
            .collect();
        Self { users }
    }

    /// Merges entries from a JSON file (`{"name": {"password_hash": "...",
    /// "role": "trader"}, ...}`) over the builtin table. File entries win.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AuthError::InvalidUserFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let parsed: HashMap<String, UserRecord> =
            serde_json::from_str(&raw).map_err(|e| AuthError::InvalidUserFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        log::info!("loaded {} user override(s) from {}", parsed.len(), path.display());
        self.users.extend(parsed);
        Ok(())
    }

    /// Checks credentials and mints a session. The only place a
    /// [`SessionContext`] is ever created.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionContext, AuthError> {
        let record = self
            .users
            .get(username)
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

        if !verify_password(password, &record.password_hash) {
            return Err(AuthError::InvalidPassword(username.to_string()));
        }

        Ok(SessionContext {
            session_id: Uuid::new_v4(),
            username: username.to_string(),
            role: record.role,
            login_time: Utc::now(),
        })
    }
}

/// One authenticated request. Passed explicitly, discarded after use.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub username: String,
    pub role: Role,
    pub login_time: DateTime<Utc>,
}

impl SessionContext {
    /// Boundary check: call before the guarded operation, with a human
    /// description for the refusal message.
    pub fn require(&self, permission: Permission, action: &'static str) -> Result<(), AuthError> {
        if self.role.has_permission(permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied {
                username: self.username.clone(),
                role: self.role,
                action,
            })
        }
    }
}
