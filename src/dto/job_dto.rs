use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::NewJob;
use crate::models::{Job, Priority, TimeSlot};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_not_blank, validate_time_slot};

// Transport request raised by a supervisor (or an admin on their behalf)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(custom = "validate_not_blank")]
    pub purpose: String,
    #[validate(custom = "validate_not_blank")]
    pub from_location: String,
    #[validate(custom = "validate_not_blank")]
    pub to_location: String,
    pub date: NaiveDate,
    /// `HH:MM - HH:MM`
    #[validate(custom = "validate_time_slot")]
    pub slot: String,
    pub priority: Option<Priority>,
}

impl CreateJobRequest {
    pub fn into_new_job(self) -> Result<NewJob, AppError> {
        let slot: TimeSlot = self
            .slot
            .parse()
            .map_err(|e: crate::models::TimeSlotError| validation_error("slot", &e.to_string()))?;

        Ok(NewJob {
            purpose: self.purpose.trim().to_string(),
            from_location: self.from_location.trim().to_string(),
            to_location: self.to_location.trim().to_string(),
            date: self.date,
            slot,
            priority: self.priority.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveJobRequest {
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub remark: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectJobRequest {
    pub remark: Option<String>,
}

// Job plus its short reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub reference: String,
    #[serde(flatten)]
    pub job: Job,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            reference: job.reference(),
            job,
        }
    }
}

// Role-scoped job board: what needs attention now and what is done
#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub active: Vec<JobResponse>,
    pub history: Vec<JobResponse>,
}

impl JobListResponse {
    pub fn split(jobs: Vec<Job>, is_active: impl Fn(&Job) -> bool, is_history: impl Fn(&Job) -> bool) -> Self {
        let mut active = Vec::new();
        let mut history = Vec::new();
        for job in jobs {
            if is_active(&job) {
                active.push(job.into());
            } else if is_history(&job) {
                history.push(job.into());
            }
        }
        Self { active, history }
    }
}
