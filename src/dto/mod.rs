pub mod activity_log_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod job_dto;
pub mod user_dto;
pub mod vehicle_dto;
