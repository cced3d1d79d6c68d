//! Morton order and position predicates
//!
//! All predicates compare positions only and assume valid quadrants.
//! Results for malformed input are meaningless.

use std::cmp::Ordering;

use super::{quadrant_len, ChildId, Quadrant, MAX_LEVEL};

impl<const D: usize> Quadrant<D> {
    /// Compare in Morton (Z-curve) order.
    ///
    /// The axis whose coordinates differ in the highest bit decides; on a
    /// tie in bit position the higher axis wins, since it sits higher in the
    /// interleaved key. Quadrants with the same origin are ordered coarser
    /// first, so an ancestor always precedes its descendants.
    pub fn compare(&self, other: &Self) -> Ordering {
        let mut top_axis = 0;
        let mut top_zeros = u32::MAX;
        for axis in (0..D).rev() {
            let diff = (self.coords[axis] ^ other.coords[axis]) as u32;
            if diff != 0 && diff.leading_zeros() < top_zeros {
                top_zeros = diff.leading_zeros();
                top_axis = axis;
            }
        }

        if top_zeros == u32::MAX {
            self.level.cmp(&other.level)
        } else {
            self.coords[top_axis].cmp(&other.coords[top_axis])
        }
    }

    /// Position of this quadrant among its siblings. The root reports 0.
    #[inline]
    pub fn child_id(&self) -> ChildId {
        if self.level == 0 {
            return 0;
        }
        let len = quadrant_len(self.level);
        self.coords
            .iter()
            .enumerate()
            .fold(0, |id, (axis, &c)| if c & len != 0 { id | 1 << axis } else { id })
    }

    /// Whether `other` is a different quadrant with the same parent.
    pub fn is_sibling(&self, other: &Self) -> bool {
        if self.level == 0 || self.level != other.level {
            return false;
        }
        let mask = !quadrant_len(self.level);
        let mut differ = false;
        for (&a, &b) in self.coords.iter().zip(&other.coords) {
            if (a ^ b) & mask != 0 {
                return false;
            }
            differ |= a != b;
        }
        differ
    }

    /// Whether this quadrant is the parent of `r`.
    pub fn is_parent(&self, r: &Self) -> bool {
        if r.level.checked_sub(1) != Some(self.level) {
            return false;
        }
        let mask = !quadrant_len(r.level);
        self.coords
            .iter()
            .zip(&r.coords)
            .all(|(&q, &c)| q == c & mask)
    }

    /// Whether this quadrant strictly contains `r`.
    pub fn is_ancestor(&self, r: &Self) -> bool {
        if self.level >= r.level {
            return false;
        }
        let shift = MAX_LEVEL - self.level;
        self.coords
            .iter()
            .zip(&r.coords)
            .all(|(&q, &c)| (q ^ c) >> shift == 0)
    }

    /// Whether this quadrant contains `r` or equals it.
    #[inline]
    pub fn is_ancestor_or_equal(&self, r: &Self) -> bool {
        self == r || self.is_ancestor(r)
    }

    /// Whether the two quadrants share any area, i.e. one contains the other.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.is_ancestor_or_equal(other) || other.is_ancestor(self)
    }

    /// Whether `r` begins exactly where this quadrant ends in Morton order,
    /// so the pair leaves no hole in a linear tree.
    pub fn is_next(&self, r: &Self) -> bool {
        self.morton_key() + self.morton_extent() == r.morton_key()
    }
}

impl<const D: usize> Ord for Quadrant<D> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<const D: usize> PartialOrd for Quadrant<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
