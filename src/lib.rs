//! # Morton-Order Quadrant Algebra
//!
//! Primitives for forests of adaptive quadtrees (2D) and octrees (3D) kept
//! as linear arrays of leaves instead of pointer trees.
//!
//! ## Core Ideas
//!
//! 1. **Morton coordinates**: a cell is `D` fixed-point coordinates plus a
//!    level. Parent, children, ancestors and child ids are bit operations.
//! 2. **Z-order**: quadrants sort by their interleaved coordinate bits,
//!    coarser first on a shared origin. Sorting gives a linear tree.
//! 3. **Minimal regions**: the gap between two leaves is filled with the
//!    fewest quadrants that tile it exactly, in O(output) work.
//! 4. **Opaque payloads**: per-quadrant data is created and released only
//!    through caller-supplied [`DataHooks`].
//!
//! ## Usage Example
//!
//! ```
//! use quadforest::{complete_region, CompletionConfig, NoData, Quadrant2, Tree};
//!
//! let first = Quadrant2::from_linear_index(2, 0)?;
//! let last = Quadrant2::from_linear_index(2, 15)?;
//!
//! let mut tree = Tree::new(0);
//! complete_region(&first, &last, &CompletionConfig::new(), &mut tree, &mut NoData)?;
//!
//! assert!(tree.is_complete());
//! assert_eq!(tree.len(), 10);
//! assert_eq!(tree.quadrants_per_level(1), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod hooks; // User data init/free callbacks
pub mod quadrant; // Encoding, relations, transforms
pub mod region; // Minimal complete region construction
pub mod tree; // Linear trees and ordering checks

pub use hooks::{DataHooks, FnHooks, InitFn, NoData};
pub use quadrant::{
    max_linear_level, quadrant_len, ChildId, Coord, Level, Octant, Quadrant, Quadrant2,
    QuadrantError, MAX_LEVEL, ROOT_LEN,
};
pub use region::{complete_region, region_quadrants, CompletionConfig, Endpoint, RegionError};
pub use tree::{Leaf, Relation, Tree, TreeIndex};
