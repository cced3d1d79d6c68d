//! Linear trees
//!
//! A tree is a flat array of leaves in Morton order, one per quadrant, with
//! the payload stored next to each quadrant. No node pointers: containment
//! and adjacency come from the quadrant algebra.
//!
//! The container accepts any sequence so that unsorted or overlapping
//! input can be inspected; [`Tree::is_sorted`], [`Tree::is_linear`] and
//! [`Tree::is_complete`] check the ordering invariants.

mod print;

pub use print::{Relation, TreeDisplay};

use tracing::debug;

use crate::hooks::DataHooks;
use crate::quadrant::{Level, Quadrant, MAX_LEVEL};

/// 0-based index of a tree within a forest.
pub type TreeIndex = u32;

const LEVELS: usize = MAX_LEVEL as usize + 1;

/// A quadrant together with its payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Leaf<const D: usize, T> {
    /// Position of the leaf.
    pub quadrant: Quadrant<D>,
    /// User payload, opaque to the algebra.
    pub data: T,
}

/// Quadrants of one tree in a forest.
#[derive(Debug, Clone)]
pub struct Tree<const D: usize, T = ()> {
    which_tree: TreeIndex,
    leaves: Vec<Leaf<D, T>>,
    quadrants_per_level: [usize; LEVELS],
    maxlevel: Level,
}

impl<const D: usize, T> Tree<D, T> {
    /// Create an empty tree.
    pub fn new(which_tree: TreeIndex) -> Self {
        Self {
            which_tree,
            leaves: Vec::new(),
            quadrants_per_level: [0; LEVELS],
            maxlevel: 0,
        }
    }

    /// Index of this tree in its forest.
    #[inline]
    pub fn which_tree(&self) -> TreeIndex {
        self.which_tree
    }

    /// Number of leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree holds no leaves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaves in storage order.
    #[inline]
    pub fn leaves(&self) -> &[Leaf<D, T>] {
        &self.leaves
    }

    /// Mutable access to the payloads. Quadrants stay fixed so the
    /// per-level counts remain accurate.
    pub fn data_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.leaves.iter_mut().map(|leaf| &mut leaf.data)
    }

    /// Quadrants in storage order.
    pub fn quadrants(&self) -> impl ExactSizeIterator<Item = Quadrant<D>> + '_ {
        self.leaves.iter().map(|leaf| leaf.quadrant)
    }

    /// Number of leaves at `level`.
    #[inline]
    pub fn quadrants_per_level(&self, level: Level) -> usize {
        self.quadrants_per_level
            .get(level as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Finest level present (0 for an empty tree).
    #[inline]
    pub fn maxlevel(&self) -> Level {
        self.maxlevel
    }

    /// Append a leaf with an already constructed payload.
    ///
    /// # Panics
    /// If the quadrant's level exceeds `MAX_LEVEL`.
    pub fn push(&mut self, quadrant: Quadrant<D>, data: T) {
        let level = quadrant.level();
        assert!(level <= MAX_LEVEL, "quadrant level {} exceeds maximum", level);
        self.quadrants_per_level[level as usize] += 1;
        self.maxlevel = self.maxlevel.max(level);
        self.leaves.push(Leaf { quadrant, data });
    }

    /// Append a quadrant, creating its payload through `hooks.init`.
    pub fn insert_with<H>(&mut self, quadrant: Quadrant<D>, hooks: &mut H)
    where
        H: DataHooks<D, Data = T>,
    {
        let data = hooks.init(self.which_tree, &quadrant);
        self.push(quadrant, data);
    }

    /// Remove every leaf, handing each payload to `hooks.free`.
    pub fn clear<H>(&mut self, hooks: &mut H)
    where
        H: DataHooks<D, Data = T>,
    {
        let released = self.leaves.len();
        for leaf in self.leaves.drain(..) {
            hooks.free(&leaf.quadrant, leaf.data);
        }
        self.quadrants_per_level = [0; LEVELS];
        self.maxlevel = 0;
        debug!(which_tree = self.which_tree, released, "cleared tree");
    }

    /// Whether the quadrants strictly increase in Morton order, which also
    /// rules out duplicates.
    pub fn is_sorted(&self) -> bool {
        self.leaves
            .windows(2)
            .all(|pair| pair[0].quadrant < pair[1].quadrant)
    }

    /// Whether the tree is sorted and no quadrant overlaps another.
    ///
    /// In a sorted sequence an overlap always shows up between neighbors,
    /// as an ancestor immediately followed by one of its descendants.
    pub fn is_linear(&self) -> bool {
        self.leaves.windows(2).all(|pair| {
            let (q, r) = (&pair[0].quadrant, &pair[1].quadrant);
            q < r && !q.is_ancestor(r)
        })
    }

    /// Whether the tree is linear and leaves no hole between neighbors.
    pub fn is_complete(&self) -> bool {
        self.is_linear()
            && self
                .leaves
                .windows(2)
                .all(|pair| pair[0].quadrant.is_next(&pair[1].quadrant))
    }

    /// Digest of the quadrant sequence (coordinates and levels, not
    /// payloads). Equal trees give equal digests on every platform.
    pub fn checksum(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(D as u32).to_le_bytes());
        hasher.update(&(self.leaves.len() as u64).to_le_bytes());
        for leaf in &self.leaves {
            for coord in leaf.quadrant.coords() {
                hasher.update(&coord.to_le_bytes());
            }
            hasher.update(&[leaf.quadrant.level()]);
        }
        hasher.finalize()
    }

    /// One line per quadrant with coordinates, level and the relation to
    /// the previous quadrant. Lines are prefixed with `[identifier] ` when
    /// one is given.
    pub fn display(&self, identifier: Option<i32>) -> TreeDisplay<'_, D, T> {
        TreeDisplay::new(self, identifier)
    }
}

impl<const D: usize, T> Default for Tree<D, T> {
    fn default() -> Self {
        Self::new(0)
    }
}
