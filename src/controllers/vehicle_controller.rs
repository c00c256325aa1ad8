use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::activity_log_controller::ActivityLogController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::middleware::auth::ensure_admin;
use crate::models::{User, Vehicle, VehicleStatus};
use crate::repositories::VehicleRepository;
use crate::services::activity_text;
use crate::services::change_feed::{ChangeFeed, ChangeKind, Collection};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    activity: ActivityLogController,
    feed: ChangeFeed,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            activity: ActivityLogController::new(state),
            feed: state.feed.clone(),
        }
    }

    pub async fn list(&self, actor: &User) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        ensure_admin(actor, "list vehicles")?;
        Ok(ApiResponse::success(self.vehicles.list().await?))
    }

    pub async fn active(&self, actor: &User) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        ensure_admin(actor, "list vehicles")?;
        let vehicles = self
            .vehicles
            .list()
            .await?
            .into_iter()
            .filter(Vehicle::is_active)
            .collect();
        Ok(ApiResponse::success(vehicles))
    }

    pub async fn create(
        &self,
        actor: &User,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        ensure_admin(actor, "add vehicles")?;
        request.validate()?;

        let vehicle = self
            .vehicles
            .create(&Vehicle::new(request.name.trim().to_string()))
            .await?;
        self.feed.publish(Collection::Vehicles, vehicle.id, ChangeKind::Created);
        self.activity.record(actor, activity_text::vehicle_added(&vehicle)).await;

        Ok(ApiResponse::success_with_message(vehicle, "Vehicle added"))
    }

    pub async fn update_status(
        &self,
        actor: &User,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        ensure_admin(actor, "update vehicle status")?;

        let mut vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        vehicle.status = status;
        let vehicle = self.vehicles.update(&vehicle).await?;
        self.feed.publish(Collection::Vehicles, vehicle.id, ChangeKind::Updated);
        self.activity
            .record(actor, activity_text::vehicle_status_updated(vehicle.id, status))
            .await;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        ensure_admin(actor, "delete vehicles")?;

        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        self.feed.publish(Collection::Vehicles, id, ChangeKind::Deleted);
        self.activity.record(actor, activity_text::vehicle_deleted(id)).await;

        Ok(ApiResponse::message("Vehicle deleted"))
    }
}
