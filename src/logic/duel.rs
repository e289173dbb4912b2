//! Duels: deciding a winner and returning people to their districts afterwards.

use crate::models::{District, DistrictId, DuelPair, Person, Registry, Slot};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

/// Decides which side of a complete pair wins.
pub trait Duel {
    fn resolve(&self, odd: &Person, even: &Person, rng: &mut StdRng) -> Slot;
}

/// Default duel: each side rolls 1-10 and adds its effectiveness; the higher total wins.
/// Ties go to the tessera holder, then to the odd side.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectivenessDuel;

impl Duel for EffectivenessDuel {
    fn resolve(&self, odd: &Person, even: &Person, rng: &mut StdRng) -> Slot {
        let odd_total = rng.gen_range(1..=10) + odd.effectiveness;
        let even_total = rng.gen_range(1..=10) + even.effectiveness;
        match odd_total.cmp(&even_total) {
            std::cmp::Ordering::Greater => Slot::Odd,
            std::cmp::Ordering::Less => Slot::Even,
            std::cmp::Ordering::Equal if even.tessera && !odd.tessera => Slot::Even,
            std::cmp::Ordering::Equal => Slot::Odd,
        }
    }
}

/// What happened to a pair handed to [`resolve_duel`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DuelOutcome {
    /// The pair fought. The loser is out of the games; the winner went home.
    Fought {
        winner: Slot,
        winner_name: String,
        loser: Person,
        /// Set when the winner's district was found exhausted afterwards and removed.
        eliminated_district: Option<DistrictId>,
    },
    /// Incomplete pair: whoever was in it went home without a fight.
    Returned,
    /// Nothing to do.
    Empty,
}

/// Consume a duel pair.
///
/// - Complete pair: fight, send the winner back to their district by birth-month parity, then
///   eliminate the winner's district if both its populations are empty.
/// - One person: send them back unchanged; no fight, no elimination check.
/// - Nobody: no-op.
pub fn resolve_duel(registry: &mut Registry, pair: DuelPair, duel: &impl Duel) -> DuelOutcome {
    match (pair.odd, pair.even) {
        (Some(odd), Some(even)) => {
            let winner = duel.resolve(&odd, &even, registry.rng_mut());
            let (winner_person, loser) = match winner {
                Slot::Odd => (odd, even),
                Slot::Even => (even, odd),
            };
            let winner_name = winner_person.full_name();
            let district_id = winner_person.district_id;
            log::debug!("{} defeats {}", winner_name, loser.full_name());

            let mut eliminated_district = None;
            if send_home(registry, winner_person)
                && registry
                    .find_district(district_id)
                    .is_some_and(District::is_exhausted)
            {
                eliminated_district = registry.eliminate(district_id).map(|d| d.id);
            }
            DuelOutcome::Fought {
                winner,
                winner_name,
                loser,
                eliminated_district,
            }
        }
        (Some(person), None) | (None, Some(person)) => {
            send_home(registry, person);
            DuelOutcome::Returned
        }
        (None, None) => DuelOutcome::Empty,
    }
}

/// Put a person back into their origin district. A person whose district has already left
/// the tree cannot go anywhere and drops out of the games.
fn send_home(registry: &mut Registry, person: Person) -> bool {
    match registry.find_district_mut(person.district_id) {
        Some(district) => {
            district.add_person(person);
            true
        }
        None => {
            log::warn!(
                "district {} is no longer in the game; {} drops out",
                person.district_id,
                person.full_name()
            );
            false
        }
    }
}
