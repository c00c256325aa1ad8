//! Persistence port
//! 
//! One trait per collection. Controllers only see these traits, so the same
//! code runs on PostgreSQL in production and on `MemoryStore` in development
//! and tests.

pub mod activity_log_repository;
pub mod job_repository;
pub mod memory_store;
pub mod user_repository;
pub mod vehicle_repository;

pub use activity_log_repository::{ActivityLogRepository, PgActivityLogRepository};
pub use job_repository::{JobRepository, PgJobRepository};
pub use memory_store::MemoryStore;
pub use user_repository::{PgUserRepository, UserRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};

use crate::models::ParseEnumError;
use crate::utils::errors::AppError;

/// A stored value that no longer parses is a data problem, not a client one
pub(crate) fn corrupt_row(err: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("Corrupt row: {}", err))
}

impl From<ParseEnumError> for AppError {
    fn from(err: ParseEnumError) -> Self {
        corrupt_row(err)
    }
}
