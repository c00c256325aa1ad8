use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserStatusRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/drivers/available", get(available_drivers))
        .route("/:id/status", put(update_status))
        .route("/:id", delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let response = UserController::new(&state).list(&auth.user).await?;
    Ok(Json(response))
}

async fn available_drivers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let response = UserController::new(&state).available_drivers(&auth.user).await?;
    Ok(Json(response))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let response = UserController::new(&state).provision(&auth.user, request).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let response = UserController::new(&state)
        .update_status(&auth.user, id, request.status)
        .await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = UserController::new(&state).delete(&auth.user, id).await?;
    Ok(Json(response))
}
