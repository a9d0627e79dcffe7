//! Error handling for the Bisca backend.

pub mod domain;
pub mod error_code;

#[cfg(test)]
mod tests_error_mapping;

pub use domain::{DomainError, ValidationKind};
pub use error_code::ErrorCode;
