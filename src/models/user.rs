//! User model
//! 
//! Users carry one of three roles. Drivers track availability
//! (AVAILABLE / ASSIGNED / ON_LEAVE); admins and supervisors are simply ACTIVE.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Supervisor,
    Driver,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Supervisor => "SUPERVISOR",
            UserRole::Driver => "DRIVER",
        }
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserRole::Admin),
            "SUPERVISOR" => Ok(UserRole::Supervisor),
            "DRIVER" => Ok(UserRole::Driver),
            other => Err(ParseEnumError::new("user role", other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Available,
    Assigned,
    OnLeave,
    Active,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Available => "AVAILABLE",
            UserStatus::Assigned => "ASSIGNED",
            UserStatus::OnLeave => "ON_LEAVE",
            UserStatus::Active => "ACTIVE",
        }
    }

    /// Status a freshly created account starts with
    pub fn initial_for(role: UserRole) -> Self {
        match role {
            UserRole::Driver => UserStatus::Available,
            UserRole::Admin | UserRole::Supervisor => UserStatus::Active,
        }
    }

    /// Whether an account with `role` may hold this status
    pub fn allowed_for(&self, role: UserRole) -> bool {
        match role {
            UserRole::Driver => !matches!(self, UserStatus::Active),
            UserRole::Admin | UserRole::Supervisor => matches!(self, UserStatus::Active),
        }
    }
}

impl FromStr for UserStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(UserStatus::Available),
            "ASSIGNED" => Ok(UserStatus::Assigned),
            "ON_LEAVE" => Ok(UserStatus::OnLeave),
            "ACTIVE" => Ok(UserStatus::Active),
            other => Err(ParseEnumError::new("user status", other)),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account record. Hashes never leave the backend; see `UserResponse`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    /// Set once the account has a real credential
    pub password_hash: Option<String>,
    /// Admin-provisioned credential, cleared on first successful login
    pub temp_password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email: normalize_email(&email),
            role,
            status: UserStatus::initial_for(role),
            password_hash: None,
            temp_password_hash: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }

    pub fn is_available_driver(&self) -> bool {
        self.is_driver() && self.status == UserStatus::Available
    }
}

/// Emails are matched case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_depends_on_role() {
        let driver = User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver);
        let supervisor = User::new("Meena".into(), "meena@example.com".into(), UserRole::Supervisor);

        assert_eq!(driver.status, UserStatus::Available);
        assert!(driver.is_available_driver());
        assert_eq!(supervisor.status, UserStatus::Active);
        assert!(!supervisor.is_available_driver());
    }

    #[test]
    fn test_status_allowed_for_role() {
        assert!(UserStatus::OnLeave.allowed_for(UserRole::Driver));
        assert!(!UserStatus::Active.allowed_for(UserRole::Driver));
        assert!(UserStatus::Active.allowed_for(UserRole::Admin));
        assert!(!UserStatus::Assigned.allowed_for(UserRole::Supervisor));
    }

    #[test]
    fn test_email_is_normalized() {
        let user = User::new("A".into(), "  Admin@Example.COM ".into(), UserRole::Admin);
        assert_eq!(user.email, "admin@example.com");
    }

    #[test]
    fn test_enum_round_trip_through_storage_strings() {
        assert_eq!("ON_LEAVE".parse::<UserStatus>().unwrap(), UserStatus::OnLeave);
        assert_eq!(UserRole::Supervisor.to_string(), "SUPERVISOR");
        assert!("driver".parse::<UserRole>().is_err());
    }
}
