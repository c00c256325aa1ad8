//! Transport slip
//! 
//! Plain-text slip handed to the driver for an assigned job.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::Job;

const RULE: &str = "------------------------------------------------------------";

pub fn render(job: &Job, generated_at: DateTime<Utc>) -> String {
    let mut slip = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(slip, "LogiTrack Transport Slip");
    let _ = writeln!(slip, "Official Job Assignment Document");
    let _ = writeln!(slip, "{}", RULE);
    let _ = writeln!(slip, "Job ID:      #{}", job.reference());
    let _ = writeln!(slip, "Purpose:     {}", job.purpose);
    let _ = writeln!(slip, "From:        {}", job.from_location);
    let _ = writeln!(slip, "To:          {}", job.to_location);
    let _ = writeln!(slip, "Date:        {}", job.date.format("%Y-%m-%d"));
    let _ = writeln!(slip, "Time slot:   {}", job.slot);
    let _ = writeln!(slip, "Driver:      {}", job.driver_name.as_deref().unwrap_or("N/A"));
    let _ = writeln!(slip, "Vehicle:     {}", job.vehicle_name.as_deref().unwrap_or("N/A"));
    let _ = writeln!(slip, "Supervisor:  {}", job.supervisor_name);
    let _ = writeln!(slip, "Priority:    {}", job.priority);
    if let Some(remark) = job.remark.as_deref().filter(|r| !r.trim().is_empty()) {
        let _ = writeln!(slip, "Remarks:     \"{}\"", remark);
    }
    let _ = writeln!(slip, "{}", RULE);
    let _ = writeln!(slip, "Generated:   {}", generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(slip);
    let _ = writeln!(slip, "Driver signature: ____________    Supervisor signature: ____________");

    slip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::{JobStatus, Priority, User, UserRole};

    #[test]
    fn test_slip_contents() {
        let supervisor = User::new("Meena".into(), "meena@example.com".into(), UserRole::Supervisor);
        let mut job = Job::new(
            NewJob {
                purpose: "Steel coils".into(),
                from_location: "Yard".into(),
                to_location: "Plant B".into(),
                date: "2024-05-01".parse().unwrap(),
                slot: "10:00–12:00".parse().unwrap(),
                priority: Priority::High,
            },
            &supervisor,
        );
        job.status = JobStatus::Approved;
        job.driver_name = Some("Ravi".into());
        job.vehicle_name = Some("Truck-7".into());
        job.remark = Some("Use gate 3".into());

        let slip = render(&job, Utc::now());

        assert!(slip.contains(&format!("#{}", job.reference())));
        assert!(slip.contains("Time slot:   10:00 - 12:00"));
        assert!(slip.contains("Driver:      Ravi"));
        assert!(slip.contains("Vehicle:     Truck-7"));
        assert!(slip.contains("Priority:    HIGH"));
        assert!(slip.contains("\"Use gate 3\""));
    }

    #[test]
    fn test_missing_assignment_renders_na() {
        let supervisor = User::new("Meena".into(), "meena@example.com".into(), UserRole::Supervisor);
        let job = Job::new(
            NewJob {
                purpose: "Steel coils".into(),
                from_location: "Yard".into(),
                to_location: "Plant B".into(),
                date: "2024-05-01".parse().unwrap(),
                slot: "10:00 - 12:00".parse().unwrap(),
                priority: Priority::Low,
            },
            &supervisor,
        );

        let slip = render(&job, Utc::now());
        assert!(slip.contains("Driver:      N/A"));
        assert!(!slip.contains("Remarks"));
    }
}
