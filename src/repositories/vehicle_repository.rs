use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Vehicle;
use crate::utils::errors::AppError;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;
    async fn list(&self) -> Result<Vec<Vehicle>, AppError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: row.id,
            name: row.name,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (id, name, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(vehicle.status.as_str())
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Vehicle::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Vehicle::try_from)
            .collect()
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "UPDATE vehicles SET name = $2, status = $3 WHERE id = $1 RETURNING *",
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(vehicle.status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
