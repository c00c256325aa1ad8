use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::activity_log_controller::ActivityLogController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UserResponse};
use crate::middleware::auth::ensure_admin;
use crate::models::user::normalize_email;
use crate::models::{User, UserStatus};
use crate::repositories::UserRepository;
use crate::services::activity_text;
use crate::services::change_feed::{ChangeFeed, ChangeKind, Collection};
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};
use crate::utils::password::hash_password;

pub struct UserController {
    users: Arc<dyn UserRepository>,
    activity: ActivityLogController,
    feed: ChangeFeed,
    bcrypt_cost: u32,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            activity: ActivityLogController::new(state),
            feed: state.feed.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn list(&self, actor: &User) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        ensure_admin(actor, "list users")?;
        let users = self.users.list().await?;
        Ok(ApiResponse::success(users.into_iter().map(UserResponse::from).collect()))
    }

    /// Drivers that can be picked in the approval form
    pub async fn available_drivers(&self, actor: &User) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        ensure_admin(actor, "list drivers")?;
        let drivers = self
            .users
            .list()
            .await?
            .into_iter()
            .filter(User::is_available_driver)
            .map(UserResponse::from)
            .collect();
        Ok(ApiResponse::success(drivers))
    }

    /// Creates an account with a temporary password. The user activates it
    /// by logging in with that password.
    pub async fn provision(
        &self,
        actor: &User,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        ensure_admin(actor, "add users")?;
        request.validate()?;

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!("A user with email '{}' already exists", email)));
        }

        let mut user = User::new(request.name.trim().to_string(), email, request.role);
        user.temp_password_hash = Some(hash_password(&request.password, self.bcrypt_cost)?);

        let user = self.users.create(&user).await?;
        self.feed.publish(Collection::Users, user.id, ChangeKind::Created);
        self.activity.record(actor, activity_text::user_added(&user)).await;
        info!("👤 {} provisioned {} ({})", actor.email, user.email, user.role);

        Ok(ApiResponse::success_with_message(user.into(), "User added"))
    }

    pub async fn update_status(
        &self,
        actor: &User,
        id: Uuid,
        status: UserStatus,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        ensure_admin(actor, "update user status")?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", &id.to_string()))?;

        if !status.allowed_for(user.role) {
            return Err(AppError::BadRequest(format!(
                "Status {} is not valid for role {}",
                status, user.role
            )));
        }

        user.status = status;
        let user = self.users.update(&user).await?;
        self.feed.publish(Collection::Users, user.id, ChangeKind::Updated);
        self.activity
            .record(actor, activity_text::user_status_updated(user.id, status))
            .await;

        Ok(ApiResponse::success(user.into()))
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        ensure_admin(actor, "delete users")?;
        if actor.id == id {
            return Err(forbidden_error("delete user", "admins cannot delete their own account"));
        }

        if !self.users.delete(id).await? {
            return Err(not_found_error("User", &id.to_string()));
        }
        self.feed.publish(Collection::Users, id, ChangeKind::Deleted);
        self.activity.record(actor, activity_text::user_deleted(id)).await;

        Ok(ApiResponse::message("User deleted"))
    }
}
