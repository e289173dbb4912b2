//! District: a keyed partition of the population into odd and even birth months.

use crate::models::duel_pair::DuelPair;
use crate::models::person::Person;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for a district (the tree's ordering key).
pub type DistrictId = i32;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    /// People born in an odd month, in insertion order.
    pub odd_population: Vec<Person>,
    /// People born in an even month, in insertion order.
    pub even_population: Vec<Person>,
}

impl District {
    /// Create an empty district.
    pub fn new(id: DistrictId) -> Self {
        Self {
            id,
            odd_population: Vec::new(),
            even_population: Vec::new(),
        }
    }

    /// Append a person to the population matching their birth-month parity.
    pub fn add_person(&mut self, person: Person) {
        if person.has_odd_birth_month() {
            self.odd_population.push(person);
        } else {
            self.even_population.push(person);
        }
    }

    /// Both populations are empty.
    pub fn is_exhausted(&self) -> bool {
        self.odd_population.is_empty() && self.even_population.is_empty()
    }

    pub fn population(&self) -> usize {
        self.odd_population.len() + self.even_population.len()
    }

    /// Take one odd and one even person out of this district, if both populations are non-empty.
    ///
    /// 1. Scan each population (read-only) for the first eligible person.
    /// 2. If a scan found nobody, pick uniformly at random from that whole population.
    /// 3. Move both out of the live populations into the pair.
    pub fn take_pair<R: Rng>(&mut self, rng: &mut R) -> Option<DuelPair> {
        if self.odd_population.is_empty() || self.even_population.is_empty() {
            return None;
        }
        let odd_idx = pick_index(&self.odd_population, rng);
        let even_idx = pick_index(&self.even_population, rng);
        let odd = self.odd_population.remove(odd_idx);
        let even = self.even_population.remove(even_idx);
        Some(DuelPair::new(odd, even))
    }
}

/// First eligible index, else a random one. `population` must be non-empty.
fn pick_index<R: Rng>(population: &[Person], rng: &mut R) -> usize {
    population
        .iter()
        .position(Person::is_eligible)
        .unwrap_or_else(|| rng.gen_range(0..population.len()))
}
