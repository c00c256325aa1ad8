//! In-memory backend
//! 
//! Implements every repository trait over `HashMap`s behind `tokio` locks.
//! Used when no `DATABASE_URL` is configured and by the test suites. Each
//! call is atomic on its own; there are no multi-call transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ActivityLogRepository, JobRepository, UserRepository, VehicleRepository};
use crate::models::{ActivityLog, Job, User, Vehicle};
use crate::utils::errors::AppError;

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
    vehicles: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
    logs: Arc<RwLock<Vec<ActivityLog>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_jobs_first<'a>(jobs: impl Iterator<Item = &'a Job>) -> Vec<Job> {
    let mut jobs: Vec<Job> = jobs.cloned().collect();
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    jobs
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn create(&self, job: &Job) -> Result<Job, AppError> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(job.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Job>, AppError> {
        Ok(newest_jobs_first(self.jobs.read().await.values()))
    }

    async fn list_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(newest_jobs_first(
            jobs.values().filter(|j| j.supervisor_id == supervisor_id),
        ))
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(newest_jobs_first(
            jobs.values().filter(|j| j.driver_id == Some(driver_id)),
        ))
    }

    async fn list_for_vehicle_on(&self, vehicle_id: Uuid, date: NaiveDate) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(newest_jobs_first(
            jobs.values()
                .filter(|j| j.vehicle_id == Some(vehicle_id) && j.date == date),
        ))
    }

    async fn update(&self, job: &Job) -> Result<Job, AppError> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(job.clone())
            }
            None => Err(AppError::NotFound("Job not found".to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.jobs.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        self.vehicles.write().await.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles: Vec<Vehicle> = self.vehicles.read().await.values().cloned().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.get_mut(&vehicle.id) {
            Some(existing) => {
                *existing = vehicle.clone();
                Ok(vehicle.clone())
            }
            None => Err(AppError::NotFound("Vehicle not found".to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.vehicles.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ActivityLogRepository for MemoryStore {
    async fn append(&self, entry: &ActivityLog) -> Result<ActivityLog, AppError> {
        self.logs.write().await.push(entry.clone());
        Ok(entry.clone())
    }

    async fn list(&self) -> Result<Vec<ActivityLog>, AppError> {
        let mut logs = self.logs.read().await.clone();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserRole, UserStatus};

    #[tokio::test]
    async fn test_user_crud() {
        let store = MemoryStore::new();
        let mut user = User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver);

        UserRepository::create(&store, &user).await.unwrap();
        assert_eq!(
            store.find_by_email("ravi@example.com").await.unwrap().map(|u| u.id),
            Some(user.id)
        );

        user.status = UserStatus::OnLeave;
        UserRepository::update(&store, &user).await.unwrap();
        let stored = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(stored.status, UserStatus::OnLeave);

        assert!(UserRepository::delete(&store, user.id).await.unwrap());
        assert!(!UserRepository::delete(&store, user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let first = User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver);
        let second = User::new("Ravi K".into(), "RAVI@example.com".into(), UserRole::Driver);

        UserRepository::create(&store, &first).await.unwrap();
        assert!(matches!(
            UserRepository::create(&store, &second).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_vehicle_is_not_found() {
        let store = MemoryStore::new();
        let vehicle = Vehicle::new("Truck-7".into());
        assert!(matches!(
            VehicleRepository::update(&store, &vehicle).await,
            Err(AppError::NotFound(_))
        ));
    }
}
