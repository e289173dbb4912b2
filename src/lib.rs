//! District games: a binary search tree of districts that pairs people off for duels.

pub mod logic;
pub mod models;

pub use logic::{
    parse_input, play_out, play_round, resolve_duel, setup_from_path, Duel, DuelOutcome,
    EffectivenessDuel, RoundReport, SetupError,
};
pub use models::{
    District, DistrictId, DuelPair, Link, Person, Registry, RegistryError, Slot, TreeNode,
    DEFAULT_SEED, TESSERA_MAX_AGE, TESSERA_MIN_AGE,
};
