//! Property-Based Test Generators
//!
//! Proptest strategies for random test data that holds the domain's
//! invariants, plus fake-data helpers for realistic names and emails.

use chrono::NaiveDate;
use core_kernel::Money;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::name::raw::Name;
use fake::locales::{EN, PT_BR};
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Appends the two módulo-11 check digits to a nine-digit base.
pub fn with_check_digits(base: &[u8]) -> String {
    fn check_digit(prefix: &[u8]) -> u8 {
        let len = prefix.len() as u32;
        let sum: u32 = prefix
            .iter()
            .enumerate()
            .map(|(i, &d)| d as u32 * (len + 1 - i as u32))
            .sum();
        (sum * 10 % 11 % 10) as u8
    }

    let mut digits = base.to_vec();
    digits.push(check_digit(&digits));
    digits.push(check_digit(&digits));
    digits.iter().map(|d| (d + b'0') as char).collect()
}

/// Strategy for valid CPF digit strings
pub fn cpf_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10u8, 9).prop_filter_map(
        "repeated-digit bases are not assignable",
        |base| {
            let first = base[0];
            if base.iter().all(|&d| d == first) {
                return None;
            }
            Some(with_check_digits(&base))
        },
    )
}

/// Strategy for capitals within the accepted cap
pub fn capital_strategy() -> impl Strategy<Value = Money> {
    (1i64..=10_000_000i64).prop_map(|value| Money::brl(Decimal::from(value)))
}

/// Strategy for MIP/DFI capital pairs that pass the ordering rule
pub fn capital_pair_strategy() -> impl Strategy<Value = (Money, Money)> {
    (1i64..=10_000_000i64, 0i64..=1_000_000i64).prop_filter_map(
        "DFI capital stays within the cap",
        |(mip, margin)| {
            let dfi = mip.checked_add(margin)?;
            if dfi > 10_000_000 {
                return None;
            }
            Some((
                Money::brl(Decimal::from(mip)),
                Money::brl(Decimal::from(dfi)),
            ))
        },
    )
}

/// Strategy for adult birth dates
pub fn birth_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1940i32..=2005i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for contract deadlines in months
pub fn deadline_strategy() -> impl Strategy<Value = u32> {
    12u32..=420u32
}

/// A random Brazilian person name
pub fn person_name() -> String {
    Name(PT_BR).fake()
}

/// A random e-mail address
pub fn email() -> String {
    SafeEmail(EN).fake()
}
