use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleStatusRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/active", get(active_vehicles))
        .route("/:id/status", put(update_status))
        .route("/:id", delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let response = VehicleController::new(&state).list(&auth.user).await?;
    Ok(Json(response))
}

async fn active_vehicles(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let response = VehicleController::new(&state).active(&auth.user).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(&state).create(&auth.user, request).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(&state)
        .update_status(&auth.user, id, request.status)
        .await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = VehicleController::new(&state).delete(&auth.user, id).await?;
    Ok(Json(response))
}
