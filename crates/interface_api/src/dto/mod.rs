//! Request/response DTOs

pub mod operations;
pub mod proposals;
pub mod reports;
