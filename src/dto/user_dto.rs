use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{User, UserRole, UserStatus};
use crate::utils::validation::validate_not_blank;

// Admin provisioning; the password is temporary until the first login
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub role: UserRole,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub status: UserStatus,
}

// User profile without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    /// Still waiting for the first login with the temporary password
    pub pending_activation: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            pending_activation: user.password_hash.is_none() && user.temp_password_hash.is_some(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}
