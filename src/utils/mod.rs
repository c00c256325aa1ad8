//! Utilities
//! 
//! Error handling, validation, password and JWT helpers.

pub mod errors;
pub mod jwt;
pub mod password;
pub mod validation;
