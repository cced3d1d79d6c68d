//! Divide and conquer on the nearest common ancestor
//!
//! Below the ancestor `a` of two disjoint endpoints, the child of `a`
//! holding `q1` needs its part after `q1`, the child holding `q2` needs its
//! part before `q2`, and every child strictly between them is covered
//! whole. The two partial children recurse one level at a time down to
//! their endpoint, so the depth is bounded by the endpoint levels and the
//! work by the output size.

use crate::quadrant::{ChildId, Quadrant};

/// Tile the gap between two disjoint quadrants with `q1 < q2`.
pub(super) fn fill_between<const D: usize>(
    q1: &Quadrant<D>,
    q2: &Quadrant<D>,
    out: &mut Vec<Quadrant<D>>,
) {
    let ancestor = q1.nearest_common_ancestor(q2);
    debug_assert!(ancestor != *q1 && ancestor != *q2);

    let level = ancestor.level() + 1;
    let holds_first = q1.ancestor(level);
    let holds_last = q2.ancestor(level);

    fill_after(&holds_first, q1, out);
    for id in holds_first.child_id() + 1..holds_last.child_id() {
        out.push(ancestor.child(id));
    }
    fill_before(&holds_last, q2, out);
}

/// Tile the part of `cell` that follows its descendant `q`.
pub(super) fn fill_after<const D: usize>(
    cell: &Quadrant<D>,
    q: &Quadrant<D>,
    out: &mut Vec<Quadrant<D>>,
) {
    if cell == q {
        return;
    }
    let holds = q.ancestor(cell.level() + 1);
    fill_after(&holds, q, out);
    for id in holds.child_id() + 1..Quadrant::<D>::CHILDREN as ChildId {
        out.push(cell.child(id));
    }
}

/// Tile the part of `cell` that precedes its descendant `q`.
pub(super) fn fill_before<const D: usize>(
    cell: &Quadrant<D>,
    q: &Quadrant<D>,
    out: &mut Vec<Quadrant<D>>,
) {
    if cell == q {
        return;
    }
    let holds = q.ancestor(cell.level() + 1);
    for id in 0..holds.child_id() {
        out.push(cell.child(id));
    }
    fill_before(&holds, q, out);
}
