//! Job lifecycle
//! 
//! ```text
//! PENDING ─► APPROVED ─► ACCEPTED ─► REACHED ─► ON_WORK ─► COMPLETED
//!    │
//!    └─► REJECTED                      (any) ─► ARCHIVED
//! ```
//!
//! Admins approve, reject and archive. The assigned driver walks the job
//! through the execution steps one at a time. Functions here only decide;
//! callers persist the resulting `Transition`.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Job, JobStatus};
use crate::utils::errors::AppError;

/// Side effect a transition has on the assigned driver's availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatusEffect {
    Unchanged,
    ReleaseDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: JobStatus,
    pub to: JobStatus,
    pub driver_effect: DriverStatusEffect,
}

impl Transition {
    fn new(from: JobStatus, to: JobStatus) -> Self {
        let driver_effect = if to == JobStatus::Completed {
            DriverStatusEffect::ReleaseDriver
        } else {
            DriverStatusEffect::Unchanged
        };
        Self { from, to, driver_effect }
    }

    pub fn apply(&self, job: &mut Job) {
        job.status = self.to;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Archived(Transition),
    AlreadyArchived,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("job has no assigned driver")]
    Unassigned,

    #[error("job is assigned to another driver")]
    NotAssignedDriver,

    #[error("cannot {action} a job with status {status}")]
    InvalidTransition {
        action: &'static str,
        status: JobStatus,
    },
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotAssignedDriver => AppError::Forbidden(err.to_string()),
            LifecycleError::Unassigned | LifecycleError::InvalidTransition { .. } => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

/// The driver's step table
pub fn next_driver_step(status: JobStatus) -> Option<JobStatus> {
    match status {
        JobStatus::Approved => Some(JobStatus::Accepted),
        JobStatus::Accepted => Some(JobStatus::Reached),
        JobStatus::Reached => Some(JobStatus::OnWork),
        JobStatus::OnWork => Some(JobStatus::Completed),
        _ => None,
    }
}

/// Nothing else can happen to the job except archiving
pub fn is_terminal(status: JobStatus) -> bool {
    matches!(
        status,
        JobStatus::Rejected | JobStatus::Completed | JobStatus::Archived
    )
}

/// Statuses in which a job occupies its vehicle and driver
pub fn is_active_assignment(status: JobStatus) -> bool {
    matches!(
        status,
        JobStatus::Approved | JobStatus::Accepted | JobStatus::Reached | JobStatus::OnWork
    )
}

pub fn is_archived(status: JobStatus) -> bool {
    status == JobStatus::Archived
}

/// Driver progress: exactly one step forward, only by the assigned driver
pub fn advance(job: &Job, actor_id: Uuid) -> Result<Transition, LifecycleError> {
    let driver_id = job.driver_id.ok_or(LifecycleError::Unassigned)?;
    if driver_id != actor_id {
        return Err(LifecycleError::NotAssignedDriver);
    }

    let next = next_driver_step(job.status).ok_or(LifecycleError::InvalidTransition {
        action: "advance",
        status: job.status,
    })?;

    Ok(Transition::new(job.status, next))
}

pub fn approve(job: &Job) -> Result<Transition, LifecycleError> {
    pending_only(job, "approve", JobStatus::Approved)
}

pub fn reject(job: &Job) -> Result<Transition, LifecycleError> {
    pending_only(job, "reject", JobStatus::Rejected)
}

/// Archiving an archived job is a no-op, not an error
pub fn archive(job: &Job) -> ArchiveOutcome {
    if is_archived(job.status) {
        ArchiveOutcome::AlreadyArchived
    } else {
        ArchiveOutcome::Archived(Transition::new(job.status, JobStatus::Archived))
    }
}

fn pending_only(job: &Job, action: &'static str, to: JobStatus) -> Result<Transition, LifecycleError> {
    if job.status != JobStatus::Pending {
        return Err(LifecycleError::InvalidTransition {
            action,
            status: job.status,
        });
    }
    Ok(Transition::new(JobStatus::Pending, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::{Priority, User, UserRole};
    use chrono::NaiveDate;

    const ALL: [JobStatus; 8] = [
        JobStatus::Pending,
        JobStatus::Approved,
        JobStatus::Rejected,
        JobStatus::Accepted,
        JobStatus::Reached,
        JobStatus::OnWork,
        JobStatus::Completed,
        JobStatus::Archived,
    ];

    fn job_with(status: JobStatus, driver: Option<Uuid>) -> Job {
        let supervisor = User::new("Meena".into(), "meena@example.com".into(), UserRole::Supervisor);
        let mut job = Job::new(
            NewJob {
                purpose: "Shift change".into(),
                from_location: "Gate 1".into(),
                to_location: "Gate 4".into(),
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                slot: "08:00 - 10:00".parse().unwrap(),
                priority: Priority::Low,
            },
            &supervisor,
        );
        job.status = status;
        job.driver_id = driver;
        job
    }

    #[test]
    fn test_driver_walks_the_full_chain() {
        let driver = Uuid::new_v4();
        let mut job = job_with(JobStatus::Approved, Some(driver));
        let mut seen = vec![job.status];

        while let Ok(transition) = advance(&job, driver) {
            assert_eq!(transition.from, job.status);
            assert_eq!(Some(transition.to), next_driver_step(job.status));
            transition.apply(&mut job);
            seen.push(job.status);
        }

        assert_eq!(
            seen,
            vec![
                JobStatus::Approved,
                JobStatus::Accepted,
                JobStatus::Reached,
                JobStatus::OnWork,
                JobStatus::Completed,
            ]
        );
    }

    #[test]
    fn test_only_completion_releases_the_driver() {
        let driver = Uuid::new_v4();
        for status in ALL {
            let job = job_with(status, Some(driver));
            if let Ok(transition) = advance(&job, driver) {
                let expected = if transition.to == JobStatus::Completed {
                    DriverStatusEffect::ReleaseDriver
                } else {
                    DriverStatusEffect::Unchanged
                };
                assert_eq!(transition.driver_effect, expected);
            }
        }
    }

    #[test]
    fn test_progress_from_terminal_or_pending_is_rejected() {
        let driver = Uuid::new_v4();
        for status in [
            JobStatus::Pending,
            JobStatus::Rejected,
            JobStatus::Completed,
            JobStatus::Archived,
        ] {
            let job = job_with(status, Some(driver));
            assert_eq!(
                advance(&job, driver),
                Err(LifecycleError::InvalidTransition {
                    action: "advance",
                    status
                })
            );
        }
    }

    #[test]
    fn test_progress_requires_assigned_driver() {
        let job = job_with(JobStatus::Pending, None);
        assert_eq!(advance(&job, Uuid::new_v4()), Err(LifecycleError::Unassigned));

        let job = job_with(JobStatus::Approved, Some(Uuid::new_v4()));
        assert_eq!(
            advance(&job, Uuid::new_v4()),
            Err(LifecycleError::NotAssignedDriver)
        );
    }

    #[test]
    fn test_approve_and_reject_only_from_pending() {
        for status in ALL {
            let job = job_with(status, None);
            assert_eq!(approve(&job).is_ok(), status == JobStatus::Pending);
            assert_eq!(reject(&job).is_ok(), status == JobStatus::Pending);
        }

        let job = job_with(JobStatus::Pending, None);
        assert_eq!(approve(&job).unwrap().to, JobStatus::Approved);
        assert_eq!(reject(&job).unwrap().to, JobStatus::Rejected);
        assert_eq!(
            approve(&job).unwrap().driver_effect,
            DriverStatusEffect::Unchanged
        );
    }

    #[test]
    fn test_archive_is_idempotent() {
        let mut job = job_with(JobStatus::OnWork, Some(Uuid::new_v4()));

        match archive(&job) {
            ArchiveOutcome::Archived(transition) => {
                assert_eq!(transition.driver_effect, DriverStatusEffect::Unchanged);
                transition.apply(&mut job);
            }
            ArchiveOutcome::AlreadyArchived => panic!("first archive must transition"),
        }

        assert_eq!(job.status, JobStatus::Archived);
        assert_eq!(archive(&job), ArchiveOutcome::AlreadyArchived);
        assert_eq!(job.status, JobStatus::Archived);
    }

    #[test]
    fn test_status_classification() {
        assert!(is_terminal(JobStatus::Completed));
        assert!(is_terminal(JobStatus::Rejected));
        assert!(!is_terminal(JobStatus::OnWork));
        assert!(is_active_assignment(JobStatus::Reached));
        assert!(!is_active_assignment(JobStatus::Pending));
        assert!(!is_active_assignment(JobStatus::Completed));
    }
}
