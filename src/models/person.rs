//! Person data structure.

use crate::models::district::DistrictId;
use serde::{Deserialize, Serialize};

/// Youngest age (inclusive) that qualifies for a tessera.
pub const TESSERA_MIN_AGE: u32 = 12;
/// Age (exclusive) at which a person no longer qualifies for a tessera.
pub const TESSERA_MAX_AGE: u32 = 18;

/// A single person in the games. Lives in exactly one district population (or a duel pair).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    /// 1-12; parity decides the odd or even population.
    pub birth_month: u32,
    pub age: u32,
    pub district_id: DistrictId,
    pub effectiveness: i32,
    /// Set iff age is in [12, 18) when the person is created.
    pub tessera: bool,
}

impl Person {
    /// Create a person; `tessera` is derived from the age.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_month: u32,
        age: u32,
        district_id: DistrictId,
        effectiveness: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_month,
            age,
            district_id,
            effectiveness,
            tessera: Self::age_qualifies(age),
        }
    }

    fn age_qualifies(age: u32) -> bool {
        (TESSERA_MIN_AGE..TESSERA_MAX_AGE).contains(&age)
    }

    /// Preferred for selection: holds a tessera and is still of tessera age.
    pub fn is_eligible(&self) -> bool {
        self.tessera && Self::age_qualifies(self.age)
    }

    pub fn has_odd_birth_month(&self) -> bool {
        self.birth_month % 2 == 1
    }

    /// "First Last", for logs and reports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
