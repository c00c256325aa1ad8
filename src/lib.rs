//! LogiTrack
//! 
//! Transport job coordination: supervisors request vehicle movements, admins
//! approve them with a driver and vehicle, drivers report progress.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
