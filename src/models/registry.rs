//! Registry: the tree of active districts plus the staging list of districts not yet admitted.

use crate::models::district::{District, DistrictId};
use crate::models::duel_pair::DuelPair;
use crate::models::tree::{Link, TreeNode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Seed used when none is configured, so runs are reproducible by default.
pub const DEFAULT_SEED: u64 = 2023;

/// Errors that can occur during registry operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// The tree is empty or no district has both an odd and an even population left.
    NotEnoughCandidates,
    /// No district with this id is waiting in the staging list.
    NotStaged(DistrictId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NotEnoughCandidates => write!(f, "Not enough candidates to form a duel pair"),
            RegistryError::NotStaged(id) => write!(f, "District {} is not in the staging list", id),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Full game state: staged districts, the district tree, and the seeded random source.
#[derive(Clone, Debug, Serialize)]
pub struct Registry {
    /// Districts read from input and not yet admitted, in input order.
    staging: Vec<District>,
    /// Root of the BST of districts still in the game.
    root: Link,
    seed: u64,
    /// Duels fought so far.
    rounds_played: usize,
    #[serde(skip)]
    rng: StdRng,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Registry {
    /// Create an empty registry whose selections are driven by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            staging: Vec::new(),
            root: None,
            seed,
            rounds_played: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a registry with districts waiting to be admitted (e.g. from setup).
    pub fn with_staging(staging: Vec<District>, seed: u64) -> Self {
        Self {
            staging,
            ..Self::new(seed)
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Count one more round and return its number (starting at 1).
    pub(crate) fn next_round(&mut self) -> usize {
        self.rounds_played += 1;
        self.rounds_played
    }

    /// Districts not yet admitted, in input order.
    pub fn staging(&self) -> &[District] {
        &self.staging
    }

    /// Mutable staging list (setup appends people to staged districts).
    pub fn staging_mut(&mut self) -> &mut Vec<District> {
        &mut self.staging
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Number of districts in the tree.
    pub fn len(&self) -> usize {
        self.root().map_or(0, TreeNode::len)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, id: DistrictId) -> bool {
        TreeNode::find(&self.root, id).is_some()
    }

    /// Link a district into the tree. Returns false when the id is already present.
    /// If this exact district is waiting in the staging list, that one entry leaves it.
    pub fn admit(&mut self, district: District) -> bool {
        let staged = self.staging.iter().position(|d| *d == district);
        if !self.link(district) {
            return false;
        }
        if let Some(idx) = staged {
            self.staging.remove(idx);
        }
        true
    }

    /// Admit the staged district with this id. It stays staged if the tree already holds the id.
    pub fn admit_staged(&mut self, id: DistrictId) -> Result<bool, RegistryError> {
        let idx = self
            .staging
            .iter()
            .position(|d| d.id == id)
            .ok_or(RegistryError::NotStaged(id))?;
        if self.contains(id) {
            log::debug!("district {} already in the game; stays staged", id);
            return Ok(false);
        }
        let district = self.staging.remove(idx);
        Ok(self.link(district))
    }

    /// Insert into the tree without touching the staging list.
    fn link(&mut self, district: District) -> bool {
        let id = district.id;
        let (root, rejected) = TreeNode::insert(self.root.take(), district);
        self.root = root;
        if rejected.is_some() {
            log::debug!("district {} already in the game; admission ignored", id);
            return false;
        }
        log::debug!("district {} admitted", id);
        true
    }

    /// Admit the first staged district that is not yet in the tree. Returns its id.
    pub fn admit_next(&mut self) -> Option<DistrictId> {
        let id = self
            .staging
            .iter()
            .map(|d| d.id)
            .find(|&id| !self.contains(id))?;
        match self.admit_staged(id) {
            Ok(true) => Some(id),
            _ => None,
        }
    }

    /// Admit every staged district in staging order. Returns how many were linked.
    pub fn admit_all(&mut self) -> usize {
        let mut admitted = 0;
        while self.admit_next().is_some() {
            admitted += 1;
        }
        admitted
    }

    /// Look up an active district by id.
    pub fn find_district(&self, id: DistrictId) -> Option<&District> {
        TreeNode::find(&self.root, id).map(TreeNode::district)
    }

    pub fn find_district_mut(&mut self, id: DistrictId) -> Option<&mut District> {
        TreeNode::find_mut(&mut self.root, id).map(TreeNode::district_mut)
    }

    /// Pick the next duel pair: the first district in pre-order (node, left, right) with both
    /// populations non-empty supplies one odd and one even person, preferring tessera holders.
    /// The chosen people leave their populations and are owned by the pair.
    pub fn select_pair(&mut self) -> Result<DuelPair, RegistryError> {
        TreeNode::select_pair(&mut self.root, &mut self.rng).ok_or(RegistryError::NotEnoughCandidates)
    }

    /// Unlink a district from the tree; no-op if it is not there. Returns the removed district.
    pub fn eliminate(&mut self, id: DistrictId) -> Option<District> {
        let (root, removed) = TreeNode::remove(self.root.take(), id);
        self.root = root;
        if removed.is_some() {
            log::debug!("district {} eliminated", id);
        }
        removed
    }

    /// Districts still in the game, in key order.
    pub fn survivors(&self) -> Vec<&District> {
        let mut out = Vec::new();
        if let Some(root) = self.root() {
            root.walk_in_order(&mut |n| out.push(n.district()));
        }
        out
    }

    /// Random source used for selection and duels.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
