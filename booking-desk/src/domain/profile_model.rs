use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("unknown role {other:?}")),
        }
    }
}

/// Role filter of the user management tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(UserRole),
}

impl RoleFilter {
    pub fn allows(self, role: UserRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => wanted == role,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RoleFilter::All);
        }
        s.parse().map(RoleFilter::Only)
    }
}

/// Account data kept next to the auth user. `phone` is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

#[derive(FromRow)]
pub(crate) struct ProfileRow {
    id: String,
    email: String,
    full_name: Option<String>,
    phone: Option<String>,
    // LEFT JOIN: users without a role row are plain users
    role: Option<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = match row.role.as_deref() {
            None => UserRole::User,
            Some(text) => text
                .parse()
                .map_err(|e| AppError::CorruptRecord(format!("profile {}: {e}", row.id)))?,
        };
        Ok(Profile {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            role,
        })
    }
}

#[cfg(test)]
mod profile_model_tests {
    use super::*;

    #[test]
    fn role_filter_parsing() {
        assert_eq!("all".parse(), Ok(RoleFilter::All));
        assert_eq!("Admin".parse(), Ok(RoleFilter::Only(UserRole::Admin)));
        assert!("guest".parse::<RoleFilter>().is_err());
        assert!(RoleFilter::All.allows(UserRole::User));
        assert!(!RoleFilter::Only(UserRole::Admin).allows(UserRole::User));
    }
}
