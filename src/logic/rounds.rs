//! Rounds: select a pair and settle their duel, repeatedly, until nobody can be paired.

use crate::logic::duel::{resolve_duel, Duel, DuelOutcome};
use crate::models::{DistrictId, Registry, RegistryError};
use serde::Serialize;

/// Summary of one round (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundReport {
    pub round: usize,
    /// District that supplied both duelers.
    pub district_id: DistrictId,
    pub outcome: DuelOutcome,
}

/// Play a single round: the registry picks the next pair and the duel settles it.
/// Rounds are numbered across the registry's whole lifetime.
pub fn play_round(registry: &mut Registry, duel: &impl Duel) -> Result<RoundReport, RegistryError> {
    let pair = registry.select_pair()?;
    if !pair.is_complete() {
        // Selection only hands out full pairs; put anyone back and stop.
        resolve_duel(registry, pair, duel);
        return Err(RegistryError::NotEnoughCandidates);
    }
    let district_id = pair
        .odd
        .as_ref()
        .map(|p| p.district_id)
        .ok_or(RegistryError::NotEnoughCandidates)?;
    let outcome = resolve_duel(registry, pair, duel);
    Ok(RoundReport {
        round: registry.next_round(),
        district_id,
        outcome,
    })
}

/// Play rounds until no pair can be formed or `max_rounds` is reached.
/// Whatever districts remain afterwards are the possible winners.
pub fn play_out(registry: &mut Registry, duel: &impl Duel, max_rounds: usize) -> Vec<RoundReport> {
    let mut reports = Vec::new();
    while reports.len() < max_rounds {
        match play_round(registry, duel) {
            Ok(report) => reports.push(report),
            Err(e) => {
                log::info!("Games over after {} round(s): {}", reports.len(), e);
                break;
            }
        }
    }
    reports
}
