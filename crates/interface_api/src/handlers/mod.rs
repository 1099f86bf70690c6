//! HTTP request handlers

pub mod health;
pub mod lookups;
pub mod operations;
pub mod proposals;
pub mod reports;
