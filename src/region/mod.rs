//! Minimal complete region construction
//!
//! Fills the Morton-order gap between two quadrants with the fewest,
//! coarsest quadrants that tile it exactly (Sundar, Sampath and Biros,
//! Algorithm 2). Used to complete a partition between two known leaves.
//!
//! ```text
//!   q1 = child 0, q2 = child 3 of the root, both included:
//!   +----+----+
//!   | c2 | q2 |      output: q1, c1, c2, q2
//!   +----+----+      no refinement below level 1 is needed
//!   | q1 | c1 |
//!   +----+----+
//! ```

mod fill;

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::hooks::DataHooks;
use crate::quadrant::{Quadrant, QuadrantError};
use crate::tree::{Tree, TreeIndex};

/// Which endpoint of a region an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The lower endpoint `q1`.
    First,
    /// The upper endpoint `q2`.
    Last,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::First => write!(f, "first"),
            Endpoint::Last => write!(f, "last"),
        }
    }
}

/// Reasons a region cannot be constructed. The output tree is untouched
/// whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// An endpoint is not a valid quadrant.
    #[error("{endpoint} endpoint is invalid: {source}")]
    InvalidEndpoint {
        /// Offending endpoint.
        endpoint: Endpoint,
        /// Validation failure.
        source: QuadrantError,
    },

    /// The first endpoint does not strictly precede the last.
    #[error("region endpoints are not in ascending Morton order")]
    NotAscending,

    /// The first endpoint contains the last, so it cannot be part of the
    /// output without overlapping it.
    #[error("first endpoint contains the last and cannot be included")]
    EndpointOverlap,

    /// The output tree must be empty on entry.
    #[error("output tree {which_tree} already holds {len} quadrants")]
    TreeNotEmpty {
        /// Index of the offending tree.
        which_tree: TreeIndex,
        /// Number of quadrants it holds.
        len: usize,
    },
}

/// Options for region construction.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Emit `q1` itself as the first quadrant.
    pub include_first: bool,
    /// Emit `q2` itself as the last quadrant.
    pub include_last: bool,
    /// Reject malformed endpoints instead of trusting the caller.
    pub validate_inputs: bool,
}

impl CompletionConfig {
    /// Both endpoints included, inputs validated.
    pub fn new() -> Self {
        Self {
            include_first: true,
            include_last: true,
            validate_inputs: true,
        }
    }

    /// Neither endpoint included: only the open gap between them.
    pub fn open() -> Self {
        Self::new().with_include_first(false).with_include_last(false)
    }

    /// Set whether `q1` is emitted.
    pub fn with_include_first(mut self, include: bool) -> Self {
        self.include_first = include;
        self
    }

    /// Set whether `q2` is emitted.
    pub fn with_include_last(mut self, include: bool) -> Self {
        self.include_last = include;
        self
    }

    /// Set whether endpoints are validated.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_inputs = enabled;
        self
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal sorted quadrant sequence tiling the gap between `q1` and `q2`,
/// with the endpoints added as `config` asks.
///
/// When `q1` contains `q2` the gap is the part of `q1` preceding `q2`.
pub fn region_quadrants<const D: usize>(
    q1: &Quadrant<D>,
    q2: &Quadrant<D>,
    config: &CompletionConfig,
) -> Result<Vec<Quadrant<D>>, RegionError> {
    if config.validate_inputs {
        q1.validated().map_err(|source| RegionError::InvalidEndpoint {
            endpoint: Endpoint::First,
            source,
        })?;
        q2.validated().map_err(|source| RegionError::InvalidEndpoint {
            endpoint: Endpoint::Last,
            source,
        })?;
    }
    if q1 >= q2 {
        return Err(RegionError::NotAscending);
    }
    let nested = q1.is_ancestor(q2);
    if nested && config.include_first {
        return Err(RegionError::EndpointOverlap);
    }

    let mut out = Vec::new();
    if config.include_first {
        out.push(*q1);
    }
    if nested {
        trace!(level = q1.level(), "first endpoint contains the last");
        fill::fill_before(q1, q2, &mut out);
    } else {
        fill::fill_between(q1, q2, &mut out);
    }
    if config.include_last {
        out.push(*q2);
    }
    Ok(out)
}

/// Build the minimal region between `q1` and `q2` into `tree`, creating
/// every payload through `hooks.init`.
///
/// `tree` must be empty. On error nothing is inserted and no hook runs.
pub fn complete_region<const D: usize, H>(
    q1: &Quadrant<D>,
    q2: &Quadrant<D>,
    config: &CompletionConfig,
    tree: &mut Tree<D, H::Data>,
    hooks: &mut H,
) -> Result<(), RegionError>
where
    H: DataHooks<D>,
{
    if !tree.is_empty() {
        return Err(RegionError::TreeNotEmpty {
            which_tree: tree.which_tree(),
            len: tree.len(),
        });
    }

    let quadrants = region_quadrants(q1, q2, config)?;
    for quadrant in quadrants {
        tree.insert_with(quadrant, hooks);
    }

    debug!(
        which_tree = tree.which_tree(),
        quadrants = tree.len(),
        maxlevel = tree.maxlevel(),
        "completed region"
    );
    Ok(())
}
