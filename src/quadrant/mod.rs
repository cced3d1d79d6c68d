//! Quadrant encoding
//!
//! A quadrant (an octant in 3D) is a plain value: `D` fixed-point
//! coordinates plus a refinement level. Of the `MAX_LEVEL` coordinate bits,
//! the `level` highest ones locate the cell in the uniform grid of that
//! level and the remaining low bits are zero (canonical form).
//!
//! Nothing here points into a tree. Parents, children, ancestors and the
//! Morton order are all computed from the coordinates alone:
//!
//! ```text
//!   level 1, 2D          child ids          Morton key bits (per level group)
//!  +-----+-----+        +-----+-----+
//!  | 2   | 3   |   y    | 10  | 11  |       ... z_i y_i x_i ... z_0 y_0 x_0
//!  +-----+-----+   ^    +-----+-----+
//!  | 0   | 1   |   |    | 00  | 01  |
//!  +-----+-----+   +--> x
//! ```

mod relations;
mod transforms;

/// Slow reference implementations used to cross-check the bit-level ones.
#[cfg(any(test, feature = "descriptive"))]
pub mod descriptive;

use std::fmt;

use thiserror::Error;

/// Integer type of a single quadrant coordinate.
pub type Coord = i32;

/// Refinement level; 0 is the root.
pub type Level = u8;

/// Position of a quadrant among its siblings, in `0..2^D`.
pub type ChildId = u8;

/// Deepest refinement level representable with 32-bit coordinates.
pub const MAX_LEVEL: Level = 30;

/// Edge length of the root quadrant in coordinate units.
pub const ROOT_LEN: Coord = 1 << MAX_LEVEL;

/// Edge length of a quadrant at `level`.
#[inline]
pub const fn quadrant_len(level: Level) -> Coord {
    1 << (MAX_LEVEL - level)
}

/// Deepest level at which a uniform-grid linear index fits in 63 bits.
///
/// 30 in 2D (60 index bits), 21 in 3D (63 index bits).
pub const fn max_linear_level(dim: usize) -> Level {
    let bound = 63 / dim;
    if bound < MAX_LEVEL as usize {
        bound as Level
    } else {
        MAX_LEVEL
    }
}

/// Errors raised at the numeric boundary of the quadrant encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadrantError {
    /// Coordinates out of range or not aligned to the level.
    #[error("invalid quadrant: coordinates {coords:?} at level {level}")]
    InvalidQuadrant {
        /// Offending coordinates.
        coords: Vec<Coord>,
        /// Offending level.
        level: Level,
    },

    /// Requested level is deeper than the operation can represent.
    #[error("level {level} exceeds the ceiling {max} for this operation")]
    LevelOutOfRange {
        /// Requested level.
        level: Level,
        /// Deepest admissible level.
        max: Level,
    },

    /// Linear index does not address a cell of the uniform grid.
    #[error("linear index {index} out of range for level {level} (limit {limit})")]
    IndexOutOfRange {
        /// Requested index.
        index: u64,
        /// Level of the uniform grid.
        level: Level,
        /// Number of cells at that level.
        limit: u64,
    },
}

/// A quadtree (`D = 2`) or octree (`D = 3`) cell in Morton coordinates.
///
/// Equality and ordering look only at position and level. Per-quadrant
/// payloads live next to the quadrant in a [`Tree`](crate::tree::Tree),
/// never inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quadrant<const D: usize> {
    coords: [Coord; D],
    level: Level,
}

/// A quadtree cell.
pub type Quadrant2 = Quadrant<2>;

/// An octree cell.
pub type Octant = Quadrant<3>;

impl<const D: usize> Quadrant<D> {
    const DIM_CHECK: () = assert!(D == 2 || D == 3, "quadrants exist in 2 or 3 dimensions");

    /// Number of children of a quadrant, `2^D`.
    pub const CHILDREN: usize = 1 << D;

    /// Build a quadrant without checking it. Use [`is_valid`](Self::is_valid)
    /// when the values come from an untrusted source.
    #[inline]
    pub fn from_raw(coords: [Coord; D], level: Level) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::DIM_CHECK;
        Self { coords, level }
    }

    /// Build a quadrant, rejecting non-canonical or out-of-range input.
    pub fn new(coords: [Coord; D], level: Level) -> Result<Self, QuadrantError> {
        Self::from_raw(coords, level).validated()
    }

    /// The level-0 quadrant covering the whole tree.
    #[inline]
    pub fn root() -> Self {
        Self::from_raw([0; D], 0)
    }

    /// Set Morton coordinates from a linear index into the uniform grid of
    /// `level`.
    ///
    /// The index carries `D` bits per level, so `level` may not exceed
    /// [`max_linear_level`]`(D)` and `index` must be below `2^(D * level)`.
    pub fn from_linear_index(level: Level, index: u64) -> Result<Self, QuadrantError> {
        let max = max_linear_level(D);
        if level > max {
            return Err(QuadrantError::LevelOutOfRange { level, max });
        }
        let limit = 1u64 << (D as u32 * level as u32);
        if index >= limit {
            return Err(QuadrantError::IndexOutOfRange { index, level, limit });
        }

        let mut coords = [0; D];
        for bit in 0..level as u32 {
            for (axis, coord) in coords.iter_mut().enumerate() {
                let b = (index >> (D as u32 * bit + axis as u32)) & 1;
                *coord |= (b as Coord) << bit;
            }
        }
        let shift = MAX_LEVEL - level;
        for coord in &mut coords {
            *coord <<= shift;
        }

        Ok(Self::from_raw(coords, level))
    }

    /// Linear index of this quadrant's ancestor at `level` in the uniform
    /// grid of that level. Inverse of [`from_linear_index`](Self::from_linear_index).
    pub fn linear_id(&self, level: Level) -> Result<u64, QuadrantError> {
        let max = max_linear_level(D).min(self.level);
        if level > max {
            return Err(QuadrantError::LevelOutOfRange { level, max });
        }

        let shift = MAX_LEVEL - level;
        let mut id = 0u64;
        for bit in 0..level as u32 {
            for (axis, &coord) in self.coords.iter().enumerate() {
                let b = ((coord >> shift) >> bit) & 1;
                id |= (b as u64) << (D as u32 * bit + axis as u32);
            }
        }
        Ok(id)
    }

    /// Coordinates, one per axis (x, y\[, z\]).
    #[inline]
    pub fn coords(&self) -> [Coord; D] {
        self.coords
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn coord(&self, axis: usize) -> Coord {
        self.coords[axis]
    }

    /// Refinement level.
    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Edge length in coordinate units.
    #[inline]
    pub fn side_len(&self) -> Coord {
        quadrant_len(self.level)
    }

    /// Whether the level is in range and every coordinate lies inside the
    /// root and is aligned to the quadrant's edge length.
    pub fn is_valid(&self) -> bool {
        if self.level > MAX_LEVEL {
            return false;
        }
        let mask = quadrant_len(self.level) - 1;
        self.coords
            .iter()
            .all(|&c| (0..ROOT_LEN).contains(&c) && c & mask == 0)
    }

    /// Full-depth Morton key: coordinate bits interleaved with x lowest.
    ///
    /// Only meaningful for valid quadrants. 3D keys need 90 bits.
    pub fn morton_key(&self) -> u128 {
        let mut key = 0u128;
        for bit in 0..MAX_LEVEL as u32 {
            for (axis, &coord) in self.coords.iter().enumerate() {
                let b = (coord >> bit) & 1;
                key |= (b as u128) << (D as u32 * bit + axis as u32);
            }
        }
        key
    }

    /// Number of `MAX_LEVEL` cells this quadrant covers, i.e. the length of
    /// its Morton key range starting at [`morton_key`](Self::morton_key).
    #[inline]
    pub fn morton_extent(&self) -> u128 {
        1u128 << (D as u32 * (MAX_LEVEL - self.level) as u32)
    }

    fn invalid(&self) -> QuadrantError {
        QuadrantError::InvalidQuadrant {
            coords: self.coords.to_vec(),
            level: self.level,
        }
    }

    /// Validate, turning a malformed quadrant into an error.
    pub fn validated(self) -> Result<Self, QuadrantError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(self.invalid())
        }
    }
}

impl<const D: usize> fmt::Display for Quadrant<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, coord) in self.coords.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:#x}", coord)?;
        }
        write!(f, "; level {})", self.level)
    }
}

#[cfg(feature = "serialize")]
impl<const D: usize> serde::Serialize for Quadrant<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Quadrant", 2)?;
        state.serialize_field("coords", &self.coords[..])?;
        state.serialize_field("level", &self.level)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ceiling() {
        assert_eq!(max_linear_level(2), 30);
        assert_eq!(max_linear_level(3), 21);
    }

    #[test]
    fn test_linear_index_layout() {
        // index 5 = 0b01_01: child 1 of child 1
        let q = Quadrant2::from_linear_index(2, 5).unwrap();
        assert_eq!(q.coords(), [3 * quadrant_len(2), 0]);
        assert_eq!(q.level(), 2);
        assert!(q.is_valid());

        let o = Octant::from_linear_index(1, 6).unwrap();
        assert_eq!(o.coords(), [0, quadrant_len(1), quadrant_len(1)]);
    }

    #[test]
    fn test_linear_index_rejects_overflow() {
        assert_eq!(
            Quadrant2::from_linear_index(2, 16),
            Err(QuadrantError::IndexOutOfRange {
                index: 16,
                level: 2,
                limit: 16
            })
        );
        assert_eq!(
            Octant::from_linear_index(22, 0),
            Err(QuadrantError::LevelOutOfRange { level: 22, max: 21 })
        );
        assert!(Quadrant2::from_linear_index(31, 0).is_err());
    }

    #[test]
    fn test_linear_id_inverts_index() {
        for index in [0u64, 1, 77, 4095] {
            let q = Quadrant2::from_linear_index(6, index).unwrap();
            assert_eq!(q.linear_id(6), Ok(index));
        }
        let deep = Octant::from_linear_index(21, (1 << 63) - 1).unwrap();
        assert_eq!(deep.linear_id(21), Ok((1 << 63) - 1));
        assert_eq!(deep.linear_id(0), Ok(0));
    }

    #[test]
    fn test_validity() {
        assert!(Quadrant2::root().is_valid());
        // misaligned for level 1
        assert!(!Quadrant2::from_raw([1, 0], 1).is_valid());
        assert!(!Quadrant2::from_raw([-quadrant_len(1), 0], 1).is_valid());
        assert!(!Quadrant2::from_raw([ROOT_LEN, 0], 1).is_valid());
        assert!(!Octant::from_raw([0, 0, 0], MAX_LEVEL + 1).is_valid());
        assert!(Octant::new([0, 0, 1], MAX_LEVEL).is_ok());
        assert!(matches!(
            Quadrant2::new([3, 0], 2),
            Err(QuadrantError::InvalidQuadrant { level: 2, .. })
        ));
    }

    #[test]
    fn test_morton_key_interleaves_x_lowest() {
        let q = Quadrant2::from_raw([1, 0], MAX_LEVEL);
        let r = Quadrant2::from_raw([0, 1], MAX_LEVEL);
        assert_eq!(q.morton_key(), 1);
        assert_eq!(r.morton_key(), 2);
        assert_eq!(Quadrant2::root().morton_extent(), 1 << 60);
        assert_eq!(Octant::root().morton_extent(), 1 << 90);
    }

    #[test]
    fn test_display() {
        let q = Quadrant2::from_linear_index(1, 3).unwrap();
        assert_eq!(q.to_string(), "(0x20000000, 0x20000000; level 1)");
    }
}
