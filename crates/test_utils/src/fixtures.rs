//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the desk's entities. Fixtures are fixed values,
//! consistent and predictable across test runs; random data lives in
//! `generators`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::Money;
use domain_proposal::{LookupRef, ProductRef};
use domain_review::Role;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// The LMI ranges the upstream `ValoresLMI` group serves.
pub static LMI_RANGES: Lazy<Vec<LookupRef>> = Lazy::new(|| {
    vec![
        LookupRef {
            id: 1,
            description: "Até R$ 100.000,00".to_string(),
        },
        LookupRef {
            id: 3,
            description: "De R$ 200.000,01 até R$ 500.000,00".to_string(),
        },
        LookupRef {
            id: 5,
            description: "Acima de R$ 1.000.000,00".to_string(),
        },
    ]
});

/// Fixture for CPF test documents
pub struct CpfFixtures;

impl CpfFixtures {
    /// A valid CPF, used as the default proponent document
    pub fn principal() -> &'static str {
        "52998224725"
    }

    /// The same CPF in masked form
    pub fn principal_masked() -> &'static str {
        "529.982.247-25"
    }

    /// A second valid CPF for co-participants
    pub fn co_participant() -> &'static str {
        "11144477735"
    }

    /// Fails the check-digit validation
    pub fn invalid() -> &'static str {
        "12345678900"
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard MIP capital
    pub fn capital_mip() -> Money {
        Money::brl(dec!(250_000))
    }

    /// Standard DFI capital, above the MIP capital
    pub fn capital_dfi() -> Money {
        Money::brl(dec!(400_000))
    }

    /// Financed amount of the default operation
    pub fn operation_value() -> Money {
        Money::brl(dec!(380_000))
    }

    /// One cent above the accepted capital cap
    pub fn over_cap() -> Money {
        Money::brl(dec!(10_000_000.01))
    }
}

/// Fixture for reference data the lookups serve
pub struct LookupFixtures;

impl LookupFixtures {
    /// The default product of the catalogue
    pub fn product() -> ProductRef {
        ProductRef {
            uid: Uuid::parse_str("7c1d2e3f-4a5b-6c7d-8e9f-0a1b2c3d4e5f").unwrap(),
            name: "Prestamista Habitacional".to_string(),
        }
    }

    /// The proposal type the desk creates
    pub fn kind() -> LookupRef {
        LookupRef {
            id: 2,
            description: "Habitacional".to_string(),
        }
    }

    /// The default LMI range
    pub fn lmi() -> LookupRef {
        LMI_RANGES[1].clone()
    }

    /// Property types served by the `TipoImovel` group
    pub fn property_types() -> Vec<LookupRef> {
        vec![
            LookupRef {
                id: 1,
                description: "Residencial".to_string(),
            },
            LookupRef {
                id: 2,
                description: "Comercial".to_string(),
            },
        ]
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Timestamp the default proposal was created at
    pub fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 14, 30, 0).unwrap()
    }

    /// Birth date of a proponent in their forties
    pub fn birthdate() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 3, 12).unwrap()
    }

    /// Birth date that exceeds the age cap on long deadlines
    pub fn senior_birthdate() -> NaiveDate {
        NaiveDate::from_ymd_opt(1950, 1, 1).unwrap()
    }

    /// A fixed "today" for validations that take the current date
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }
}

/// Fixture for role sets as the token carries them
pub struct RoleFixtures;

impl RoleFixtures {
    pub fn sales() -> Vec<Role> {
        vec![Role::Vendedor]
    }

    pub fn sales_supervisor() -> Vec<Role> {
        vec![Role::VendedorSup]
    }

    pub fn underwriting() -> Vec<Role> {
        vec![Role::Subscritor]
    }

    pub fn medical() -> Vec<Role> {
        vec![Role::SubscritorMed]
    }

    pub fn admin() -> Vec<Role> {
        vec![Role::Admin]
    }
}
