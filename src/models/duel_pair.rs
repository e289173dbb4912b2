//! DuelPair and Slot: the two people chosen to fight.

use crate::models::person::Person;
use serde::{Deserialize, Serialize};

/// Which side of a duel pair won.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    Odd,
    Even,
}

/// Candidates for a duel: `odd` is always drawn from an odd population, `even` from an even one.
/// One side may be missing only while a pair is being returned or unwound.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DuelPair {
    pub odd: Option<Person>,
    pub even: Option<Person>,
}

impl DuelPair {
    pub fn new(odd: Person, even: Person) -> Self {
        Self {
            odd: Some(odd),
            even: Some(even),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.odd.is_some() && self.even.is_some()
    }
}
