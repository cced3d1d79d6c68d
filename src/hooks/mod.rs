//! Per-quadrant user data hooks
//!
//! The algebra never interprets payloads. Operations that materialize or
//! discard quadrants take a [`DataHooks`] value and call it once per
//! quadrant; nothing is registered globally.

use std::fmt;

use crate::quadrant::Quadrant;
use crate::tree::TreeIndex;

/// Allocation and release of the payload stored next to each quadrant.
///
/// Hooks must not call back into the operation that invoked them.
pub trait DataHooks<const D: usize> {
    /// Payload type attached to every quadrant of a tree.
    type Data;

    /// Produce the payload of a quadrant about to be inserted into tree
    /// `which_tree`.
    fn init(&mut self, which_tree: TreeIndex, quadrant: &Quadrant<D>) -> Self::Data;

    /// Release a payload whose quadrant is being discarded.
    fn free(&mut self, quadrant: &Quadrant<D>, data: Self::Data) {
        let _ = quadrant;
        drop(data);
    }
}

/// Hooks for trees that carry no payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoData;

impl<const D: usize> DataHooks<D> for NoData {
    type Data = ();

    #[inline]
    fn init(&mut self, _which_tree: TreeIndex, _quadrant: &Quadrant<D>) {}
}

/// Hooks from an init closure; payloads are dropped on free.
pub struct InitFn<I>(pub I);

impl<const D: usize, I, T> DataHooks<D> for InitFn<I>
where
    I: FnMut(TreeIndex, &Quadrant<D>) -> T,
{
    type Data = T;

    fn init(&mut self, which_tree: TreeIndex, quadrant: &Quadrant<D>) -> T {
        (self.0)(which_tree, quadrant)
    }
}

impl<I> fmt::Debug for InitFn<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitFn").finish_non_exhaustive()
    }
}

/// Hooks from an init and a free closure.
pub struct FnHooks<I, F> {
    init: I,
    free: F,
}

impl<I, F> FnHooks<I, F> {
    /// Pair an init closure with a free closure.
    pub fn new(init: I, free: F) -> Self {
        Self { init, free }
    }
}

impl<const D: usize, I, F, T> DataHooks<D> for FnHooks<I, F>
where
    I: FnMut(TreeIndex, &Quadrant<D>) -> T,
    F: FnMut(&Quadrant<D>, T),
{
    type Data = T;

    fn init(&mut self, which_tree: TreeIndex, quadrant: &Quadrant<D>) -> T {
        (self.init)(which_tree, quadrant)
    }

    fn free(&mut self, quadrant: &Quadrant<D>, data: T) {
        (self.free)(quadrant, data)
    }
}

impl<I, F> fmt::Debug for FnHooks<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHooks").finish_non_exhaustive()
    }
}
