use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permission level attached to an account.
///
/// Roles are a closed set: every authorization decision point matches on them
/// exhaustively rather than comparing strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DepartmentHead,
    Manager,
    Supervisor,
    Volunteer,
    User,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::DepartmentHead,
        Role::Manager,
        Role::Supervisor,
        Role::Volunteer,
        Role::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DepartmentHead => "department_head",
            Role::Manager => "manager",
            Role::Supervisor => "supervisor",
            Role::Volunteer => "volunteer",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "department_head" => Ok(Role::DepartmentHead),
            "manager" => Ok(Role::Manager),
            "supervisor" => Ok(Role::Supervisor),
            "volunteer" => Ok(Role::Volunteer),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
