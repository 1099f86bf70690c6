//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than the standard macros.

use domain_proposal::validation::ValidationResult;
use domain_proposal::{Proposal, ProposalStatus};

/// Asserts that the input passed validation
///
/// # Panics
///
/// Panics with the collected field errors when validation failed
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid,
        "expected valid input, got errors: {:?}",
        result.errors
    );
}

/// Asserts that a specific field was rejected with the given message
pub fn assert_field_error(result: &ValidationResult, field: &str, message: &str) {
    assert!(
        !result.is_valid,
        "expected a rejection for field {field}, but the input passed"
    );
    match result.error_for(field) {
        Some(actual) => assert_eq!(
            actual, message,
            "field {field} was rejected with a different message"
        ),
        None => panic!(
            "no error recorded for field {field}; errors: {:?}",
            result.errors
        ),
    }
}

/// Asserts the proposal's MIP-lane status
pub fn assert_status(proposal: &Proposal, expected: ProposalStatus) {
    assert_eq!(
        proposal.status_code(),
        expected,
        "proposal {} sits at {:?} (code {}), expected {:?}",
        proposal.uid,
        proposal.status_code(),
        proposal.status.id,
        expected
    );
}
