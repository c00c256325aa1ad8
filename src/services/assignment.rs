//! Assignment checks
//! 
//! Run before a job is approved, against data read just before. There is no
//! lock between this check and the write that follows, so two admins approving
//! the same vehicle and slot at the same moment can both pass.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Job, TimeSlot, User, Vehicle};
use crate::services::job_lifecycle::is_active_assignment;
use crate::utils::errors::AppError;

/// Driver and vehicle that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Please assign a driver and vehicle.")]
    MissingAssignment,

    #[error("Driver not found")]
    DriverNotFound,

    #[error("{0} is not a driver")]
    NotADriver(String),

    #[error("Driver {0} is not available")]
    DriverUnavailable(String),

    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("Vehicle {0} is not in service")]
    VehicleUnavailable(String),

    #[error("Vehicle already assigned for this slot!")]
    VehicleConflict { conflicting_job: Uuid },
}

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::MissingAssignment | AssignmentError::NotADriver(_) => {
                AppError::BadRequest(err.to_string())
            }
            AssignmentError::DriverNotFound | AssignmentError::VehicleNotFound => {
                AppError::NotFound(err.to_string())
            }
            AssignmentError::DriverUnavailable(_)
            | AssignmentError::VehicleUnavailable(_)
            | AssignmentError::VehicleConflict { .. } => AppError::Conflict(err.to_string()),
        }
    }
}

/// First job other than `exclude_job_id` holding `vehicle_id` on the same
/// date and slot in an active assignment status
pub fn find_vehicle_conflict<'a>(
    jobs: &'a [Job],
    vehicle_id: Uuid,
    date: NaiveDate,
    slot: &TimeSlot,
    exclude_job_id: Uuid,
) -> Option<&'a Job> {
    jobs.iter().find(|j| {
        j.id != exclude_job_id
            && j.vehicle_id == Some(vehicle_id)
            && j.date == date
            && j.slot == *slot
            && is_active_assignment(j.status)
    })
}

/// Validates the admin's choice of driver and vehicle for `job`.
///
/// `driver` and `vehicle` are the looked-up records (`None` when the id did
/// not resolve); `existing_jobs` is whatever the caller fetched for the
/// vehicle, it only needs to cover `job.date`.
pub fn check_assignment(
    job: &Job,
    driver: Option<&User>,
    vehicle: Option<&Vehicle>,
    existing_jobs: &[Job],
) -> Result<Assignment, AssignmentError> {
    let driver = driver.ok_or(AssignmentError::DriverNotFound)?;
    if !driver.is_driver() {
        return Err(AssignmentError::NotADriver(driver.name.clone()));
    }
    if !driver.is_available_driver() && !job.is_assigned_to(driver.id) {
        return Err(AssignmentError::DriverUnavailable(driver.name.clone()));
    }

    let vehicle = vehicle.ok_or(AssignmentError::VehicleNotFound)?;
    if !vehicle.is_active() && job.vehicle_id != Some(vehicle.id) {
        return Err(AssignmentError::VehicleUnavailable(vehicle.name.clone()));
    }

    if let Some(conflict) = find_vehicle_conflict(existing_jobs, vehicle.id, job.date, &job.slot, job.id) {
        return Err(AssignmentError::VehicleConflict {
            conflicting_job: conflict.id,
        });
    }

    Ok(Assignment {
        driver_id: driver.id,
        driver_name: driver.name.clone(),
        vehicle_id: vehicle.id,
        vehicle_name: vehicle.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::{JobStatus, Priority, UserRole, UserStatus, VehicleStatus};

    fn supervisor() -> User {
        User::new("Meena".into(), "meena@example.com".into(), UserRole::Supervisor)
    }

    fn job_on(date: &str, slot: &str) -> Job {
        Job::new(
            NewJob {
                purpose: "Cement bags".into(),
                from_location: "Depot".into(),
                to_location: "Site 9".into(),
                date: date.parse().unwrap(),
                slot: slot.parse().unwrap(),
                priority: Priority::Medium,
            },
            &supervisor(),
        )
    }

    fn booked(vehicle: &Vehicle, status: JobStatus, date: &str, slot: &str) -> Job {
        let mut job = job_on(date, slot);
        job.status = status;
        job.vehicle_id = Some(vehicle.id);
        job.vehicle_name = Some(vehicle.name.clone());
        job
    }

    fn driver() -> User {
        User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver)
    }

    #[test]
    fn test_truck_seven_slot_conflict() {
        let truck = Vehicle::new("Truck-7".into());
        let existing = vec![booked(&truck, JobStatus::Accepted, "2024-05-01", "10:00–12:00")];
        let driver = driver();

        let same_slot = job_on("2024-05-01", "10:00 - 12:00");
        let err = check_assignment(&same_slot, Some(&driver), Some(&truck), &existing).unwrap_err();
        assert_eq!(
            err,
            AssignmentError::VehicleConflict {
                conflicting_job: existing[0].id
            }
        );
        assert_eq!(err.to_string(), "Vehicle already assigned for this slot!");

        let next_slot = job_on("2024-05-01", "12:00–14:00");
        let assignment = check_assignment(&next_slot, Some(&driver), Some(&truck), &existing).unwrap();
        assert_eq!(assignment.vehicle_id, truck.id);
        assert_eq!(assignment.vehicle_name, "Truck-7");
    }

    #[test]
    fn test_only_active_assignments_block() {
        let truck = Vehicle::new("Truck-7".into());
        let date: NaiveDate = "2024-05-01".parse().unwrap();
        let slot: TimeSlot = "10:00 - 12:00".parse().unwrap();

        for status in [
            JobStatus::Approved,
            JobStatus::Accepted,
            JobStatus::Reached,
            JobStatus::OnWork,
        ] {
            let jobs = vec![booked(&truck, status, "2024-05-01", "10:00 - 12:00")];
            assert!(find_vehicle_conflict(&jobs, truck.id, date, &slot, Uuid::new_v4()).is_some());
        }

        for status in [
            JobStatus::Pending,
            JobStatus::Rejected,
            JobStatus::Completed,
            JobStatus::Archived,
        ] {
            let jobs = vec![booked(&truck, status, "2024-05-01", "10:00 - 12:00")];
            assert!(find_vehicle_conflict(&jobs, truck.id, date, &slot, Uuid::new_v4()).is_none());
        }
    }

    #[test]
    fn test_other_vehicle_date_or_same_job_do_not_block() {
        let truck = Vehicle::new("Truck-7".into());
        let van = Vehicle::new("Van-2".into());
        let date: NaiveDate = "2024-05-01".parse().unwrap();
        let slot: TimeSlot = "10:00 - 12:00".parse().unwrap();

        let jobs = vec![
            booked(&van, JobStatus::Approved, "2024-05-01", "10:00 - 12:00"),
            booked(&truck, JobStatus::Approved, "2024-05-02", "10:00 - 12:00"),
        ];
        assert!(find_vehicle_conflict(&jobs, truck.id, date, &slot, Uuid::new_v4()).is_none());

        let own = booked(&truck, JobStatus::Approved, "2024-05-01", "10:00 - 12:00");
        let own_id = own.id;
        assert!(find_vehicle_conflict(&[own], truck.id, date, &slot, own_id).is_none());
    }

    #[test]
    fn test_driver_must_be_an_available_driver() {
        let truck = Vehicle::new("Truck-7".into());
        let job = job_on("2024-05-01", "08:00 - 10:00");

        let mut busy = driver();
        busy.status = UserStatus::OnLeave;
        assert_eq!(
            check_assignment(&job, Some(&busy), Some(&truck), &[]),
            Err(AssignmentError::DriverUnavailable("Ravi".into()))
        );

        assert_eq!(
            check_assignment(&job, Some(&supervisor()), Some(&truck), &[]),
            Err(AssignmentError::NotADriver("Meena".into()))
        );

        assert_eq!(
            check_assignment(&job, None, Some(&truck), &[]),
            Err(AssignmentError::DriverNotFound)
        );
    }

    #[test]
    fn test_vehicle_must_be_in_service() {
        let mut truck = Vehicle::new("Truck-7".into());
        truck.status = VehicleStatus::Maintenance;
        let job = job_on("2024-05-01", "08:00 - 10:00");

        assert_eq!(
            check_assignment(&job, Some(&driver()), Some(&truck), &[]),
            Err(AssignmentError::VehicleUnavailable("Truck-7".into()))
        );
        assert_eq!(
            check_assignment(&job, Some(&driver()), None, &[]),
            Err(AssignmentError::VehicleNotFound)
        );
    }
}
