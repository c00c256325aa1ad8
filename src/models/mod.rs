//! Domain models
//! 
//! Plain data types shared by the repositories, the pure services and the
//! controllers. Enum values are stored and serialized in SCREAMING_SNAKE_CASE.

pub mod activity_log;
pub mod job;
pub mod time_slot;
pub mod user;
pub mod vehicle;

pub use activity_log::{ActivityLog, Language};
pub use job::{Job, JobStatus, Priority};
pub use time_slot::{TimeSlot, TimeSlotError};
pub use user::{User, UserRole, UserStatus};
pub use vehicle::{Vehicle, VehicleStatus};

use thiserror::Error;

/// Error returned when a stored or submitted enum value is unknown
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
