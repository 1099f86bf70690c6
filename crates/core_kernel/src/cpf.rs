//! CPF document numbers
//!
//! Brazilian natural-person tax identifiers. A CPF has nine base digits and
//! two módulo-11 check digits; repeated-digit sequences pass the arithmetic
//! but are rejected by the registry and therefore here as well.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a CPF
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CpfError {
    #[error("CPF must have 11 digits, got {0}")]
    WrongLength(usize),

    #[error("CPF with all digits equal is not assignable")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    CheckDigits,
}

/// A validated CPF, stored as its 11 digits.
///
/// Accepts masked (`529.982.247-25`) or bare (`52998224725`) input; any
/// non-digit characters are ignored. Serializes as the bare digit string,
/// which is what the upstream API expects in `document` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf([u8; 11]);

impl Cpf {
    /// Parses and validates a CPF from masked or bare input
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits: Vec<u8> = input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .map(|c| c as u8 - b'0')
            .collect();

        if digits.len() != 11 {
            return Err(CpfError::WrongLength(digits.len()));
        }

        let first = digits[0];
        if digits.iter().all(|&d| d == first) {
            return Err(CpfError::RepeatedDigits);
        }

        if digits[9] != check_digit(&digits[..9]) || digits[10] != check_digit(&digits[..10]) {
            return Err(CpfError::CheckDigits);
        }

        let mut stored = [0u8; 11];
        stored.copy_from_slice(&digits);
        Ok(Self(stored))
    }

    /// Returns the 11 digits without separators
    pub fn as_digits(&self) -> String {
        self.0.iter().map(|d| (d + b'0') as char).collect()
    }

    /// Returns the masked form, `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        let d = self.as_digits();
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

/// Módulo-11 check digit over a digit prefix.
///
/// Weights run from `len + 1` down to 2; the `* 10 % 11 % 10` form folds the
/// "remainder below 2 yields zero" rule into one expression.
fn check_digit(prefix: &[u8]) -> u8 {
    let len = prefix.len() as u32;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * (len + 1 - i as u32))
        .sum();
    (sum * 10 % 11 % 10) as u8
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Cpf {
    type Error = CpfError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> String {
        cpf.as_digits()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generated_check_digits_always_validate(base in proptest::array::uniform9(0u8..10)) {
            // Skip the degenerate all-equal sequences the registry refuses.
            prop_assume!(base.iter().any(|&d| d != base[0]));

            let mut digits = base.to_vec();
            digits.push(check_digit(&digits));
            digits.push(check_digit(&digits));

            let text: String = digits.iter().map(|d| (d + b'0') as char).collect();
            prop_assert!(Cpf::parse(&text).is_ok());
        }

        #[test]
        fn parse_is_mask_insensitive(base in proptest::array::uniform9(0u8..10)) {
            prop_assume!(base.iter().any(|&d| d != base[0]));

            let mut digits = base.to_vec();
            digits.push(check_digit(&digits));
            digits.push(check_digit(&digits));
            let bare: String = digits.iter().map(|d| (d + b'0') as char).collect();

            let masked = format!(
                "{}.{}.{}-{}",
                &bare[0..3], &bare[3..6], &bare[6..9], &bare[9..11]
            );
            prop_assert_eq!(Cpf::parse(&bare).unwrap(), Cpf::parse(&masked).unwrap());
        }
    }
}
