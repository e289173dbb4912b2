//! Data structures for the district games: people, districts, the district tree and registry.

mod district;
mod duel_pair;
mod person;
mod registry;
mod tree;

pub use district::{District, DistrictId};
pub use duel_pair::{DuelPair, Slot};
pub use person::{Person, TESSERA_MAX_AGE, TESSERA_MIN_AGE};
pub use registry::{Registry, RegistryError, DEFAULT_SEED};
pub use tree::{Link, TreeNode};
