//! Role-based access control.
//!
//! Roles are a closed enum, each with an explicit capability set. Checked at
//! the CLI boundary before the scanner is invoked, never inside it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management.
    Admin,
    /// Runs scans and exports result sheets.
    Trader,
    /// Runs scans, view-only output.
    Analyst,
}

impl Role {
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::Trader => matches!(
                permission,
                Permission::ViewResults | Permission::RunScan | Permission::ExportResults
            ),
            Role::Analyst => {
                matches!(permission, Permission::ViewResults | Permission::RunScan)
            }
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "trader" => Some(Role::Trader),
            "analyst" => Some(Role::Analyst),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Trader => "trader",
            Role::Analyst => "analyst",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// See scan results in the terminal.
    ViewResults,
    /// Invoke the scanner at all.
    RunScan,
    /// Write result sheets to disk.
    ExportResults,
    /// Add/replace user entries.
    ManageUsers,
}
