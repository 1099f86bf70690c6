//! Core Kernel - Foundational types and utilities for the underwriting desk
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - CPF document numbers with check-digit validation
//! - Temporal helpers for pt-BR rendering and age computation
//! - Common identifiers and value objects

pub mod money;
pub mod cpf;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use cpf::{Cpf, CpfError};
pub use temporal::{age_on, age_at_term_end, format_history_timestamp, TemporalError};
pub use identifiers::{ProposalId, DocumentId, ProductId, OperationNumber};
pub use error::CoreError;
pub use ports::{AdapterHealth, DomainPort, HealthCheckable, HealthCheckResult, PortError};
