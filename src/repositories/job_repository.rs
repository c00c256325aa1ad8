use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::corrupt_row;
use crate::models::Job;
use crate::utils::errors::AppError;

/// Listings are newest first
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError>;
    async fn list(&self) -> Result<Vec<Job>, AppError>;
    async fn list_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<Job>, AppError>;
    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Job>, AppError>;
    /// Every job booked on `vehicle_id` for `date`, whatever its status
    async fn list_for_vehicle_on(&self, vehicle_id: Uuid, date: NaiveDate) -> Result<Vec<Job>, AppError>;
    async fn update(&self, job: &Job) -> Result<Job, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    supervisor_id: Uuid,
    supervisor_name: String,
    purpose: String,
    from_location: String,
    to_location: String,
    job_date: NaiveDate,
    slot: String,
    priority: String,
    status: String,
    driver_id: Option<Uuid>,
    driver_name: Option<String>,
    vehicle_id: Option<Uuid>,
    vehicle_name: Option<String>,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for Job {
    type Error = AppError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            supervisor_id: row.supervisor_id,
            supervisor_name: row.supervisor_name,
            purpose: row.purpose,
            from_location: row.from_location,
            to_location: row.to_location,
            date: row.job_date,
            slot: row.slot.parse().map_err(corrupt_row)?,
            priority: row.priority.parse()?,
            status: row.status.parse()?,
            driver_id: row.driver_id,
            driver_name: row.driver_name,
            vehicle_id: row.vehicle_id,
            vehicle_name: row.vehicle_name,
            remark: row.remark,
            created_at: row.created_at,
            approved_at: row.approved_at,
        })
    }
}

fn into_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, AppError> {
    rows.into_iter().map(Job::try_from).collect()
}

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create(&self, job: &Job) -> Result<Job, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (
                id, supervisor_id, supervisor_name, purpose, from_location, to_location,
                job_date, slot, priority, status, driver_id, driver_name, vehicle_id,
                vehicle_name, remark, created_at, approved_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(job.supervisor_id)
        .bind(&job.supervisor_name)
        .bind(&job.purpose)
        .bind(&job.from_location)
        .bind(&job.to_location)
        .bind(job.date)
        .bind(job.slot.to_string())
        .bind(job.priority.as_str())
        .bind(job.status.as_str())
        .bind(job.driver_id)
        .bind(&job.driver_name)
        .bind(job.vehicle_id)
        .bind(&job.vehicle_name)
        .bind(&job.remark)
        .bind(job.created_at)
        .bind(job.approved_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Job::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        into_jobs(rows)
    }

    async fn list_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE supervisor_id = $1 ORDER BY created_at DESC",
        )
        .bind(supervisor_id)
        .fetch_all(&self.pool)
        .await?;

        into_jobs(rows)
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE driver_id = $1 ORDER BY created_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        into_jobs(rows)
    }

    async fn list_for_vehicle_on(&self, vehicle_id: Uuid, date: NaiveDate) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT * FROM jobs WHERE vehicle_id = $1 AND job_date = $2 ORDER BY created_at DESC",
        )
        .bind(vehicle_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        into_jobs(rows)
    }

    async fn update(&self, job: &Job) -> Result<Job, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET purpose = $2, from_location = $3, to_location = $4, job_date = $5, slot = $6,
                priority = $7, status = $8, driver_id = $9, driver_name = $10, vehicle_id = $11,
                vehicle_name = $12, remark = $13, approved_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(&job.purpose)
        .bind(&job.from_location)
        .bind(&job.to_location)
        .bind(job.date)
        .bind(job.slot.to_string())
        .bind(job.priority.as_str())
        .bind(job.status.as_str())
        .bind(job.driver_id)
        .bind(&job.driver_name)
        .bind(job.vehicle_id)
        .bind(&job.vehicle_name)
        .bind(&job.remark)
        .bind(job.approved_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
