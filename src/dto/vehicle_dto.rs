use serde::Deserialize;
use validator::Validate;

use crate::models::VehicleStatus;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}
