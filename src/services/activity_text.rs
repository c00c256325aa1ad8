//! Activity log sentences
//! 
//! English and Hindi text for every logged admin action.

use uuid::Uuid;

use crate::models::{Job, User, UserRole, UserStatus, Vehicle, VehicleStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogText {
    pub en: String,
    pub hi: String,
}

pub fn job_created_by_admin(job: &Job) -> LogText {
    LogText {
        en: format!(
            "Admin created a job: {} ({} to {})",
            job.purpose, job.from_location, job.to_location
        ),
        hi: format!(
            "एडमिन ने एक कार्य बनाया: {} ({} से {})",
            job.purpose, job.from_location, job.to_location
        ),
    }
}

pub fn job_approved(job: &Job, driver_name: &str) -> LogText {
    LogText {
        en: format!("Approved job {} and assigned {}", job.id, driver_name),
        hi: format!("कार्य {} को मंजूरी दी गई और {} को सौंपा गया", job.id, driver_name),
    }
}

pub fn job_rejected(job: &Job) -> LogText {
    LogText {
        en: format!("Rejected job {}", job.id),
        hi: format!("कार्य {} को अस्वीकार कर दिया गया", job.id),
    }
}

pub fn job_archived(job_id: Uuid) -> LogText {
    LogText {
        en: format!("Archived job {}", job_id),
        hi: format!("कार्य {} को आर्काइव किया गया", job_id),
    }
}

pub fn user_added(user: &User) -> LogText {
    let role = user.role;
    LogText {
        en: format!("Admin added user {} ({}) with password", user.name, role),
        hi: format!("एडमिन ने उपयोगकर्ता {} ({}) को पासवर्ड के साथ जोड़ा", user.name, role),
    }
}

pub fn user_status_updated(user_id: Uuid, status: UserStatus) -> LogText {
    LogText {
        en: format!("Updated status of user {} to {}", user_id, status),
        hi: format!("उपयोगकर्ता {} की स्थिति को {} में अपडेट किया गया", user_id, status),
    }
}

pub fn user_deleted(user_id: Uuid) -> LogText {
    LogText {
        en: format!("Deleted user {}", user_id),
        hi: format!("उपयोगकर्ता {} को हटा दिया गया", user_id),
    }
}

pub fn vehicle_added(vehicle: &Vehicle) -> LogText {
    LogText {
        en: format!("Added vehicle {}", vehicle.name),
        hi: format!("वाहन {} को जोड़ा गया", vehicle.name),
    }
}

pub fn vehicle_status_updated(vehicle_id: Uuid, status: VehicleStatus) -> LogText {
    LogText {
        en: format!("Updated vehicle {} status to {}", vehicle_id, status),
        hi: format!("वाहन {} की स्थिति को {} में अपडेट किया गया", vehicle_id, status),
    }
}

pub fn vehicle_deleted(vehicle_id: Uuid) -> LogText {
    LogText {
        en: format!("Deleted vehicle {}", vehicle_id),
        hi: format!("वाहन {} को हटा दिया गया", vehicle_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_added_mentions_role() {
        let user = User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver);
        let text = user_added(&user);
        assert_eq!(text.en, "Admin added user Ravi (DRIVER) with password");
        assert!(text.hi.contains("Ravi (DRIVER)"));
    }
}
