//! TreeNode: unbalanced binary search tree of districts, keyed by district id.
//!
//! Mutations take an owned subtree and hand back the (possibly new) subtree root, so the
//! caller rewires its own child link and no parent pointers are needed.

use crate::models::district::{District, DistrictId};
use crate::models::duel_pair::DuelPair;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;

/// An owned, possibly empty subtree.
pub type Link = Option<Box<TreeNode>>;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TreeNode {
    district: District,
    left: Link,
    right: Link,
}

impl TreeNode {
    pub fn new(district: District) -> Self {
        Self {
            district,
            left: None,
            right: None,
        }
    }

    pub fn district(&self) -> &District {
        &self.district
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    /// Insert `district` as a new leaf. An equal id anywhere on the path rejects it,
    /// and the rejected district is handed back as the second value.
    pub(crate) fn insert(link: Link, district: District) -> (Link, Option<District>) {
        match link {
            None => (Some(Box::new(TreeNode::new(district))), None),
            Some(mut node) => {
                let rejected = match district.id.cmp(&node.district.id) {
                    Ordering::Less => {
                        let (left, rejected) = Self::insert(node.left.take(), district);
                        node.left = left;
                        rejected
                    }
                    Ordering::Greater => {
                        let (right, rejected) = Self::insert(node.right.take(), district);
                        node.right = right;
                        rejected
                    }
                    Ordering::Equal => Some(district),
                };
                (Some(node), rejected)
            }
        }
    }

    /// Remove the node holding `id`; returns the new subtree and the removed district.
    ///
    /// A node with two children takes over its in-order successor's district, and the
    /// successor's original node (which has no left child) is spliced out.
    pub(crate) fn remove(link: Link, id: DistrictId) -> (Link, Option<District>) {
        let Some(mut node) = link else {
            return (None, None);
        };
        match id.cmp(&node.district.id) {
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), id);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), id);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => (None, Some(node.district)),
                (Some(left), None) => (Some(left), Some(node.district)),
                (None, Some(right)) => (Some(right), Some(node.district)),
                (Some(left), Some(right)) => {
                    let (right, successor) = Self::remove_min(right);
                    let removed = std::mem::replace(&mut node.district, successor);
                    node.left = Some(left);
                    node.right = right;
                    (Some(node), Some(removed))
                }
            },
        }
    }

    /// Detach the leftmost node of a subtree, returning what remains and its district.
    fn remove_min(mut node: Box<TreeNode>) -> (Link, District) {
        match node.left.take() {
            None => {
                let TreeNode { district, right, .. } = *node;
                (right, district)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                (Some(node), min)
            }
        }
    }

    pub(crate) fn find(link: &Link, id: DistrictId) -> Option<&TreeNode> {
        let mut current = link.as_deref();
        while let Some(node) = current {
            current = match id.cmp(&node.district.id) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub(crate) fn find_mut(link: &mut Link, id: DistrictId) -> Option<&mut TreeNode> {
        let node = link.as_deref_mut()?;
        match id.cmp(&node.district.id) {
            Ordering::Less => Self::find_mut(&mut node.left, id),
            Ordering::Greater => Self::find_mut(&mut node.right, id),
            Ordering::Equal => Some(node),
        }
    }

    pub(crate) fn district_mut(&mut self) -> &mut District {
        &mut self.district
    }

    /// Pre-order search for the first district able to supply a complete pair.
    /// The subtrees of a node that supplies the pair are never visited.
    pub(crate) fn select_pair<R: Rng>(link: &mut Link, rng: &mut R) -> Option<DuelPair> {
        let node = link.as_deref_mut()?;
        if let Some(pair) = node.district.take_pair(rng) {
            log::debug!("district {} supplies the next duel", node.district.id);
            return Some(pair);
        }
        Self::select_pair(&mut node.left, rng).or_else(|| Self::select_pair(&mut node.right, rng))
    }

    /// Number of nodes in this subtree (this node included).
    pub fn len(&self) -> usize {
        1 + self.left().map_or(0, TreeNode::len) + self.right().map_or(0, TreeNode::len)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self
            .left()
            .map_or(0, TreeNode::depth)
            .max(self.right().map_or(0, TreeNode::depth))
    }

    /// District ids in key order.
    pub fn ids_in_order(&self) -> Vec<DistrictId> {
        let mut ids = Vec::new();
        self.walk_in_order(&mut |n| ids.push(n.district.id));
        ids
    }

    /// District ids in selection order (node, left subtree, right subtree).
    pub fn ids_pre_order(&self) -> Vec<DistrictId> {
        let mut ids = Vec::new();
        self.walk_pre_order(&mut |n| ids.push(n.district.id));
        ids
    }

    pub fn walk_in_order<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        if let Some(left) = self.left() {
            left.walk_in_order(visit);
        }
        visit(self);
        if let Some(right) = self.right() {
            right.walk_in_order(visit);
        }
    }

    pub fn walk_pre_order<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        if let Some(left) = self.left() {
            left.walk_pre_order(visit);
        }
        if let Some(right) = self.right() {
            right.walk_pre_order(visit);
        }
    }

    /// Every left key is smaller and every right key larger than its ancestor's key.
    pub fn is_ordered(&self) -> bool {
        self.ids_in_order().windows(2).all(|w| w[0] < w[1])
    }
}
