pub mod activity_log_controller;
pub mod auth_controller;
pub mod job_controller;
pub mod user_controller;
pub mod vehicle_controller;
