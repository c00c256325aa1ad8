//! Admin dashboard counters

use serde::Serialize;

use crate::models::{Job, JobStatus, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending: usize,
    /// Approved, accepted or completed
    pub approved: usize,
    pub available_drivers: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn compute(jobs: &[Job], users: &[User]) -> Self {
        let count = |pred: fn(JobStatus) -> bool| jobs.iter().filter(|j| pred(j.status)).count();

        Self {
            pending: count(|s| s == JobStatus::Pending),
            approved: count(|s| {
                matches!(s, JobStatus::Approved | JobStatus::Accepted | JobStatus::Completed)
            }),
            available_drivers: users.iter().filter(|u| u.is_available_driver()).count(),
            completed: count(|s| s == JobStatus::Completed),
        }
    }
}
