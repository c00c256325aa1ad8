use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ActivityLog;
use crate::utils::errors::AppError;

/// Append-only: entries are never updated or removed
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: &ActivityLog) -> Result<ActivityLog, AppError>;
    /// Newest first
    async fn list(&self) -> Result<Vec<ActivityLog>, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityLogRow {
    id: Uuid,
    text_en: String,
    text_hi: String,
    user_id: Uuid,
    user_name: String,
    logged_at: DateTime<Utc>,
}

impl From<ActivityLogRow> for ActivityLog {
    fn from(row: ActivityLogRow) -> Self {
        Self {
            id: row.id,
            text_en: row.text_en,
            text_hi: row.text_hi,
            user_id: row.user_id,
            user_name: row.user_name,
            timestamp: row.logged_at,
        }
    }
}

pub struct PgActivityLogRepository {
    pool: PgPool,
}

impl PgActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PgActivityLogRepository {
    async fn append(&self, entry: &ActivityLog) -> Result<ActivityLog, AppError> {
        let row = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            INSERT INTO activity_logs (id, text_en, text_hi, user_id, user_name, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(&entry.text_en)
        .bind(&entry.text_hi)
        .bind(entry.user_id)
        .bind(&entry.user_name)
        .bind(entry.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<ActivityLog>, AppError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            "SELECT * FROM activity_logs ORDER BY logged_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ActivityLog::from).collect())
    }
}
