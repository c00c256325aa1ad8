//! Services
//! 
//! Business rules that do not touch storage: the job state machine, the
//! assignment checks, log sentences, slips and dashboard counters. The change
//! feed lives here too since every controller publishes to it.

pub mod activity_text;
pub mod assignment;
pub mod change_feed;
pub mod dashboard;
pub mod job_lifecycle;
pub mod job_slip;
