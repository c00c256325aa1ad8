//! Job workflow
//! 
//! Supervisors raise requests, admins approve or reject them with a driver
//! and vehicle, drivers walk approved jobs to completion. Every write is
//! followed by a change notification and, for admin actions, an audit entry.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::activity_log_controller::ActivityLogController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::job_dto::{ApproveJobRequest, CreateJobRequest, JobListResponse, JobResponse, RejectJobRequest};
use crate::middleware::auth::{ensure_admin, ensure_role};
use crate::models::{Job, JobStatus, TimeSlot, User, UserRole, UserStatus};
use crate::repositories::{JobRepository, UserRepository, VehicleRepository};
use crate::services::activity_text;
use crate::services::assignment::{check_assignment, AssignmentError};
use crate::services::change_feed::{ChangeFeed, ChangeKind, Collection};
use crate::services::dashboard::DashboardStats;
use crate::services::job_lifecycle::{self, ArchiveOutcome, DriverStatusEffect};
use crate::services::job_slip;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};

pub struct JobController {
    jobs: Arc<dyn JobRepository>,
    users: Arc<dyn UserRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    activity: ActivityLogController,
    feed: ChangeFeed,
}

impl JobController {
    pub fn new(state: &AppState) -> Self {
        Self {
            jobs: state.jobs.clone(),
            users: state.users.clone(),
            vehicles: state.vehicles.clone(),
            activity: ActivityLogController::new(state),
            feed: state.feed.clone(),
        }
    }

    pub async fn create(&self, actor: &User, request: CreateJobRequest) -> Result<ApiResponse<JobResponse>, AppError> {
        ensure_role(actor, &[UserRole::Supervisor, UserRole::Admin], "create job")?;
        request.validate()?;

        let job = Job::new(request.into_new_job()?, actor);
        let job = self.jobs.create(&job).await?;
        self.feed.publish(Collection::Jobs, job.id, ChangeKind::Created);

        if actor.is_admin() {
            self.activity
                .record(actor, activity_text::job_created_by_admin(&job))
                .await;
        }
        info!("📝 Job {} requested by {}", job.reference(), job.supervisor_name);

        Ok(ApiResponse::success_with_message(job.into(), "Request submitted"))
    }

    /// Admins see every job that is not archived, supervisors their own
    /// requests, drivers the jobs assigned to them.
    pub async fn list(&self, actor: &User) -> Result<ApiResponse<JobListResponse>, AppError> {
        let board = match actor.role {
            UserRole::Admin => JobListResponse::split(
                self.jobs.list().await?,
                |j| !job_lifecycle::is_terminal(j.status),
                |j| matches!(j.status, JobStatus::Rejected | JobStatus::Completed),
            ),
            UserRole::Supervisor => JobListResponse::split(
                self.jobs.list_by_supervisor(actor.id).await?,
                |j| j.status == JobStatus::Pending,
                |j| !job_lifecycle::is_archived(j.status),
            ),
            UserRole::Driver => JobListResponse::split(
                self.jobs.list_by_driver(actor.id).await?,
                |j| !job_lifecycle::is_terminal(j.status),
                |j| j.status == JobStatus::Completed,
            ),
        };
        Ok(ApiResponse::success(board))
    }

    pub async fn archived(&self, actor: &User) -> Result<ApiResponse<Vec<JobResponse>>, AppError> {
        ensure_admin(actor, "view archive")?;
        let jobs = self
            .jobs
            .list()
            .await?
            .into_iter()
            .filter(|j| job_lifecycle::is_archived(j.status))
            .map(JobResponse::from)
            .collect();
        Ok(ApiResponse::success(jobs))
    }

    pub async fn stats(&self, actor: &User) -> Result<ApiResponse<DashboardStats>, AppError> {
        ensure_admin(actor, "view dashboard")?;
        let jobs = self.jobs.list().await?;
        let users = self.users.list().await?;
        Ok(ApiResponse::success(DashboardStats::compute(&jobs, &users)))
    }

    pub fn slots(&self) -> ApiResponse<Vec<String>> {
        ApiResponse::success(TimeSlot::standard_slots().into_iter().map(String::from).collect())
    }

    pub async fn get(&self, actor: &User, id: Uuid) -> Result<ApiResponse<JobResponse>, AppError> {
        let job = self.visible_job(actor, id).await?;
        Ok(ApiResponse::success(job.into()))
    }

    pub async fn approve(
        &self,
        actor: &User,
        id: Uuid,
        request: ApproveJobRequest,
    ) -> Result<ApiResponse<JobResponse>, AppError> {
        ensure_admin(actor, "approve job")?;
        let mut job = self.find(id).await?;
        let transition = job_lifecycle::approve(&job)?;

        let (driver_id, vehicle_id) = match (request.driver_id, request.vehicle_id) {
            (Some(driver_id), Some(vehicle_id)) => (driver_id, vehicle_id),
            _ => return Err(AssignmentError::MissingAssignment.into()),
        };

        let driver = self.users.find_by_id(driver_id).await?;
        let vehicle = self.vehicles.find_by_id(vehicle_id).await?;
        let same_day = self.jobs.list_for_vehicle_on(vehicle_id, job.date).await?;
        let assignment = check_assignment(&job, driver.as_ref(), vehicle.as_ref(), &same_day)?;

        transition.apply(&mut job);
        job.driver_id = Some(assignment.driver_id);
        job.driver_name = Some(assignment.driver_name.clone());
        job.vehicle_id = Some(assignment.vehicle_id);
        job.vehicle_name = Some(assignment.vehicle_name.clone());
        job.remark = clean_remark(request.remark);
        job.approved_at = Some(Utc::now());
        let job = self.jobs.update(&job).await?;
        self.feed.publish(Collection::Jobs, job.id, ChangeKind::Updated);

        // check_assignment already proved the driver exists
        if let Some(mut driver) = driver {
            driver.status = UserStatus::Assigned;
            let driver = self.users.update(&driver).await?;
            self.feed.publish(Collection::Users, driver.id, ChangeKind::Updated);
        }

        self.activity
            .record(actor, activity_text::job_approved(&job, &assignment.driver_name))
            .await;
        info!(
            "✅ Job {} approved: {} with {}",
            job.reference(),
            assignment.driver_name,
            assignment.vehicle_name
        );

        Ok(ApiResponse::success_with_message(job.into(), "Job approved"))
    }

    pub async fn reject(
        &self,
        actor: &User,
        id: Uuid,
        request: RejectJobRequest,
    ) -> Result<ApiResponse<JobResponse>, AppError> {
        ensure_admin(actor, "reject job")?;
        let mut job = self.find(id).await?;
        let transition = job_lifecycle::reject(&job)?;

        transition.apply(&mut job);
        job.remark = clean_remark(request.remark);
        let job = self.jobs.update(&job).await?;
        self.feed.publish(Collection::Jobs, job.id, ChangeKind::Updated);
        self.activity.record(actor, activity_text::job_rejected(&job)).await;

        Ok(ApiResponse::success_with_message(job.into(), "Job rejected"))
    }

    /// Archiving twice is a no-op and is only logged once
    pub async fn archive(&self, actor: &User, id: Uuid) -> Result<ApiResponse<JobResponse>, AppError> {
        ensure_admin(actor, "archive job")?;
        let mut job = self.find(id).await?;

        match job_lifecycle::archive(&job) {
            ArchiveOutcome::Archived(transition) => {
                transition.apply(&mut job);
                let job = self.jobs.update(&job).await?;
                self.feed.publish(Collection::Jobs, job.id, ChangeKind::Updated);
                self.activity.record(actor, activity_text::job_archived(job.id)).await;
                Ok(ApiResponse::success_with_message(job.into(), "Job archived"))
            }
            ArchiveOutcome::AlreadyArchived => {
                debug!("Job {} already archived", job.reference());
                Ok(ApiResponse::success_with_message(job.into(), "Job already archived"))
            }
        }
    }

    /// One step along the driver's progression. Completing the job makes the
    /// driver available again.
    pub async fn progress(&self, actor: &User, id: Uuid) -> Result<ApiResponse<JobResponse>, AppError> {
        ensure_role(actor, &[UserRole::Driver], "update job progress")?;
        let mut job = self.find(id).await?;
        let transition = job_lifecycle::advance(&job, actor.id)?;

        transition.apply(&mut job);
        let job = self.jobs.update(&job).await?;
        self.feed.publish(Collection::Jobs, job.id, ChangeKind::Updated);

        if transition.driver_effect == DriverStatusEffect::ReleaseDriver {
            if let Some(mut driver) = self.users.find_by_id(actor.id).await? {
                driver.status = UserStatus::Available;
                let driver = self.users.update(&driver).await?;
                self.feed.publish(Collection::Users, driver.id, ChangeKind::Updated);
            }
        }
        info!("🚚 Job {}: {} -> {}", job.reference(), transition.from, transition.to);

        Ok(ApiResponse::success(job.into()))
    }

    /// Supervisors may withdraw their own request while it is still pending
    pub async fn cancel(&self, actor: &User, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let job = self.find(id).await?;
        if job.supervisor_id != actor.id {
            return Err(forbidden_error("cancel job", "only the requester can cancel it"));
        }
        if job.status != JobStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Only pending requests can be cancelled, this one is {}",
                job.status
            )));
        }

        if !self.jobs.delete(id).await? {
            return Err(not_found_error("Job", &id.to_string()));
        }
        self.feed.publish(Collection::Jobs, id, ChangeKind::Deleted);

        Ok(ApiResponse::message("Request cancelled"))
    }

    /// Plain-text slip for a job that has a driver and vehicle
    pub async fn slip(&self, actor: &User, id: Uuid) -> Result<String, AppError> {
        let job = self.visible_job(actor, id).await?;
        let printable = job.driver_id.is_some()
            && job.vehicle_id.is_some()
            && !matches!(job.status, JobStatus::Rejected | JobStatus::Archived);
        if !printable {
            return Err(AppError::BadRequest(format!(
                "No slip for a job with status {}",
                job.status
            )));
        }
        Ok(job_slip::render(&job, Utc::now()))
    }

    async fn find(&self, id: Uuid) -> Result<Job, AppError> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Job", &id.to_string()))
    }

    async fn visible_job(&self, actor: &User, id: Uuid) -> Result<Job, AppError> {
        let job = self.find(id).await?;
        let visible = match actor.role {
            UserRole::Admin => true,
            UserRole::Supervisor => job.supervisor_id == actor.id,
            UserRole::Driver => job.is_assigned_to(actor.id),
        };
        if visible {
            Ok(job)
        } else {
            Err(forbidden_error("view job", "it belongs to another user"))
        }
    }
}

fn clean_remark(remark: Option<String>) -> Option<String> {
    remark
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
