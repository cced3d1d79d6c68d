//! Parent, child and ancestor computation from coordinates alone
//!
//! Quadrants are `Copy`, so any output may alias any input: `make_parent`
//! and `make_child` transform in place, and
//! `a = a.nearest_common_ancestor(&b)` is always sound.

use super::{quadrant_len, ChildId, Level, Quadrant, MAX_LEVEL};

impl<const D: usize> Quadrant<D> {
    /// Clear the bit group that distinguishes this level from the one above.
    ///
    /// # Panics
    /// On the root quadrant.
    #[inline]
    pub fn parent(&self) -> Self {
        assert!(self.level > 0, "the root quadrant has no parent");
        let mask = !quadrant_len(self.level);
        Self::from_raw(self.coords.map(|c| c & mask), self.level - 1)
    }

    /// Parent, or `None` for the root.
    #[inline]
    pub fn checked_parent(&self) -> Option<Self> {
        (self.level > 0).then(|| self.parent())
    }

    /// Replace this quadrant by its parent.
    #[inline]
    pub fn make_parent(&mut self) {
        *self = self.parent();
    }

    /// Child number `id`, setting the bit group of the next level to the
    /// id's bit pattern.
    ///
    /// # Panics
    /// If `id >= 2^D` or the quadrant is already at `MAX_LEVEL`.
    #[inline]
    pub fn child(&self, id: ChildId) -> Self {
        assert!((id as usize) < Self::CHILDREN, "child id {} out of range", id);
        assert!(self.level < MAX_LEVEL, "quadrant at maximum level has no children");
        let level = self.level + 1;
        let len = quadrant_len(level);
        let mut coords = self.coords;
        for (axis, coord) in coords.iter_mut().enumerate() {
            if (id >> axis) & 1 == 1 {
                *coord |= len;
            }
        }
        Self::from_raw(coords, level)
    }

    /// Replace this quadrant by its child number `id`.
    #[inline]
    pub fn make_child(&mut self, id: ChildId) {
        *self = self.child(id);
    }

    /// All `2^D` children in child-id order, which is Morton order.
    ///
    /// # Panics
    /// If the quadrant is already at `MAX_LEVEL`.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator {
        assert!(self.level < MAX_LEVEL, "quadrant at maximum level has no children");
        let parent = *self;
        (0..Self::CHILDREN as ChildId).map(move |id| parent.child(id))
    }

    /// Ancestor at `level` (the quadrant itself if `level` equals its own).
    ///
    /// # Panics
    /// If `level` is finer than the quadrant's level.
    #[inline]
    pub fn ancestor(&self, level: Level) -> Self {
        assert!(level <= self.level, "ancestor level {} below quadrant level {}", level, self.level);
        let mask = !(quadrant_len(level) - 1);
        Self::from_raw(self.coords.map(|c| c & mask), level)
    }

    /// Descendant at `level` sharing this quadrant's origin.
    pub fn first_descendant(&self, level: Level) -> Self {
        assert!(self.level <= level && level <= MAX_LEVEL);
        Self::from_raw(self.coords, level)
    }

    /// Descendant at `level` in the far corner of this quadrant.
    pub fn last_descendant(&self, level: Level) -> Self {
        assert!(self.level <= level && level <= MAX_LEVEL);
        let offset = quadrant_len(self.level) - quadrant_len(level);
        Self::from_raw(self.coords.map(|c| c | offset), level)
    }

    /// Smallest quadrant containing both inputs.
    ///
    /// XOR exposes the highest coordinate bit where the two disagree; the
    /// ancestor lives on the level just above that bit.
    pub fn nearest_common_ancestor(&self, other: &Self) -> Self {
        let diff = self
            .coords
            .iter()
            .zip(&other.coords)
            .fold(0u32, |acc, (&a, &b)| acc | (a ^ b) as u32);
        let bits = u32::BITS - diff.leading_zeros();
        let level = (MAX_LEVEL as u32)
            .saturating_sub(bits)
            .min(self.level as u32)
            .min(other.level as u32) as Level;
        self.ancestor_unchecked(level)
    }

    #[inline]
    fn ancestor_unchecked(&self, level: Level) -> Self {
        let mask = !(quadrant_len(level) - 1);
        Self::from_raw(self.coords.map(|c| c & mask), level)
    }
}
