//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging setup,
//! Problem Details assertions and unique room codes.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
