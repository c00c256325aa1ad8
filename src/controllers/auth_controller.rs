use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::user::normalize_email;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::change_feed::{ChangeFeed, ChangeKind, Collection};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::password::{hash_password, verify_password};

const EMAIL_TAKEN: &str = "Email already registered. Try logging in.";
const UNKNOWN_EMAIL: &str = "No user found with this email.";
const WRONG_PASSWORD: &str = "Incorrect password.";

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    feed: ChangeFeed,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            feed: state.feed.clone(),
            config: state.config.clone(),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let mut user = User::new(request.name.trim().to_string(), email, request.role);
        user.password_hash = Some(hash_password(&request.password, self.config.bcrypt_cost)?);

        // Lost a race with another registration for the same email
        let user = self.users.create(&user).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(EMAIL_TAKEN.to_string()),
            other => other,
        })?;
        self.feed.publish(Collection::Users, user.id, ChangeKind::Created);
        info!("👤 Registered {} as {}", user.email, user.role);

        let response = self.issue_token(user)?;
        Ok(ApiResponse::success_with_message(response, "Account created"))
    }

    /// Checks the permanent password first. Accounts provisioned by an admin
    /// only have a temporary password; a match on it activates the account.
    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let mut user = self
            .users
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(UNKNOWN_EMAIL.to_string()))?;

        if let Some(hash) = &user.password_hash {
            if verify_password(&request.password, hash)? {
                return Ok(ApiResponse::success(self.issue_token(user)?));
            }
        }

        let temp_matches = match &user.temp_password_hash {
            Some(hash) => verify_password(&request.password, hash)?,
            None => false,
        };
        if !temp_matches {
            return Err(AppError::Unauthorized(WRONG_PASSWORD.to_string()));
        }

        user.password_hash = Some(hash_password(&request.password, self.config.bcrypt_cost)?);
        user.temp_password_hash = None;
        let user = self.users.update(&user).await?;
        self.feed.publish(Collection::Users, user.id, ChangeKind::Updated);
        info!("🔓 Activated account {}", user.email);

        let response = self.issue_token(user)?;
        Ok(ApiResponse::success_with_message(response, "Account activated"))
    }

    pub fn me(&self, user: User) -> ApiResponse<UserResponse> {
        ApiResponse::success(user.into())
    }

    fn issue_token(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = generate_token(user.id, user.role, &JwtConfig::from(&self.config))?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}
