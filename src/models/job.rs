//! Job model
//! 
//! A job is one transport request: where from, where to, on which date and
//! slot, and (once approved) which driver and vehicle carry it out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ParseEnumError, TimeSlot, User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
    Accepted,
    Reached,
    OnWork,
    Completed,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Approved => "APPROVED",
            JobStatus::Rejected => "REJECTED",
            JobStatus::Accepted => "ACCEPTED",
            JobStatus::Reached => "REACHED",
            JobStatus::OnWork => "ON_WORK",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Archived => "ARCHIVED",
        }
    }
}

impl FromStr for JobStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(JobStatus::Pending),
            "APPROVED" => Ok(JobStatus::Approved),
            "REJECTED" => Ok(JobStatus::Rejected),
            "ACCEPTED" => Ok(JobStatus::Accepted),
            "REACHED" => Ok(JobStatus::Reached),
            "ON_WORK" => Ok(JobStatus::OnWork),
            "COMPLETED" => Ok(JobStatus::Completed),
            "ARCHIVED" => Ok(JobStatus::Archived),
            other => Err(ParseEnumError::new("job status", other)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(ParseEnumError::new("priority", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a requester fills in; everything else is derived
#[derive(Debug, Clone)]
pub struct NewJob {
    pub purpose: String,
    pub from_location: String,
    pub to_location: String,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub supervisor_id: Uuid,
    pub supervisor_name: String,
    pub purpose: String,
    pub from_location: String,
    pub to_location: String,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub priority: Priority,
    pub status: JobStatus,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Builds a PENDING request on behalf of `requester`. Requests raised by
    /// an admin are labelled as such in the supervisor column.
    pub fn new(details: NewJob, requester: &User) -> Self {
        let supervisor_name = match requester.role {
            UserRole::Admin => format!("{} (Admin)", requester.name),
            _ => requester.name.clone(),
        };

        Self {
            id: Uuid::new_v4(),
            supervisor_id: requester.id,
            supervisor_name,
            purpose: details.purpose,
            from_location: details.from_location,
            to_location: details.to_location,
            date: details.date,
            slot: details.slot,
            priority: details.priority,
            status: JobStatus::Pending,
            driver_id: None,
            driver_name: None,
            vehicle_id: None,
            vehicle_name: None,
            remark: None,
            created_at: Utc::now(),
            approved_at: None,
        }
    }

    /// Short uppercase reference printed on slips
    pub fn reference(&self) -> String {
        let simple = self.id.simple().to_string();
        simple[simple.len() - 8..].to_uppercase()
    }

    pub fn is_assigned_to(&self, driver_id: Uuid) -> bool {
        self.driver_id == Some(driver_id)
    }
}
