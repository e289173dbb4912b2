//! Games logic: setup from input, duels, and rounds.

mod duel;
mod rounds;
mod setup;

pub use duel::{resolve_duel, Duel, DuelOutcome, EffectivenessDuel};
pub use rounds::{play_out, play_round, RoundReport};
pub use setup::{parse_input, setup_from_path, SetupError};
