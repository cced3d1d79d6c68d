//! Descriptive versions of the relation predicates
//!
//! Each function here walks parent links instead of masking bits. They are
//! slow and exist to cross-check the production versions.

use super::Quadrant;

/// Siblings: different quadrants whose parents are equal.
pub fn is_sibling_d<const D: usize>(q1: &Quadrant<D>, q2: &Quadrant<D>) -> bool {
    if q1.level() == 0 || q2.level() == 0 || q1 == q2 {
        return false;
    }
    q1.parent() == q2.parent()
}

/// Parent: `r`'s parent equals `q`.
pub fn is_parent_d<const D: usize>(q: &Quadrant<D>, r: &Quadrant<D>) -> bool {
    r.level() > 0 && r.parent() == *q
}

/// Ancestor: walking up from `r` reaches `q`.
pub fn is_ancestor_d<const D: usize>(q: &Quadrant<D>, r: &Quadrant<D>) -> bool {
    if q.level() >= r.level() {
        return false;
    }
    let mut s = *r;
    while s.level() > q.level() {
        s.make_parent();
    }
    s == *q
}

/// Nearest common ancestor: lift the finer quadrant to the coarser level,
/// then lift both until they meet.
pub fn nearest_common_ancestor_d<const D: usize>(
    q1: &Quadrant<D>,
    q2: &Quadrant<D>,
) -> Quadrant<D> {
    let mut s1 = *q1;
    let mut s2 = *q2;
    while s1.level() > s2.level() {
        s1.make_parent();
    }
    while s2.level() > s1.level() {
        s2.make_parent();
    }
    while s1 != s2 {
        s1.make_parent();
        s2.make_parent();
    }
    s1
}

/// Minimal linear octree between two quadrants, as a worklist.
///
/// Algorithm 2 of H. Sundar, R. S. Sampath and G. Biros: start from the
/// children of the nearest common ancestor, keep every cell strictly
/// between the endpoints that is not an ancestor of `q2`, and refine the
/// ancestors of either endpoint.
pub fn complete_region_d<const D: usize>(
    q1: &Quadrant<D>,
    include_q1: bool,
    q2: &Quadrant<D>,
    include_q2: bool,
) -> Vec<Quadrant<D>> {
    let mut out = Vec::new();
    if include_q1 {
        out.push(*q1);
    }

    let ancestor = nearest_common_ancestor_d(q1, q2);
    let mut work: Vec<Quadrant<D>> = ancestor.children().rev().collect();
    while let Some(w) = work.pop() {
        if *q1 < w && w < *q2 && !is_ancestor_d(&w, q2) {
            out.push(w);
        } else if is_ancestor_d(&w, q1) || is_ancestor_d(&w, q2) {
            work.extend(w.children().rev());
        }
    }

    if include_q2 {
        out.push(*q2);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrant::{Level, Octant, Quadrant2, MAX_LEVEL};
    use proptest::prelude::*;

    fn quadrant<const D: usize>(max_level: Level) -> impl Strategy<Value = Quadrant<D>> {
        (0..=max_level).prop_flat_map(|level| {
            proptest::collection::vec(0..(1i32 << level), D).prop_map(move |cells| {
                let mut coords = [0; D];
                for (coord, cell) in coords.iter_mut().zip(cells) {
                    *coord = cell << (MAX_LEVEL - level);
                }
                Quadrant::from_raw(coords, level)
            })
        })
    }

    /// Pair where the second is often related to the first.
    fn related_pair<const D: usize>(max_level: Level) -> impl Strategy<Value = (Quadrant<D>, Quadrant<D>)> {
        (quadrant::<D>(max_level), any::<u8>(), quadrant::<D>(4)).prop_map(|(q, pick, other)| {
            let r = match pick % 4 {
                0 => q.ancestor(q.level() / 2),
                1 if q.level() > 0 => q.parent().child(pick % Quadrant::<D>::CHILDREN as u8),
                2 if q.level() < MAX_LEVEL => q.child(pick % Quadrant::<D>::CHILDREN as u8),
                _ => other,
            };
            (q, r)
        })
    }

    proptest! {
        #[test]
        fn fast_relations_match_descriptive_2d((a, b) in related_pair::<2>(8)) {
            prop_assert_eq!(a.is_sibling(&b), is_sibling_d(&a, &b));
            prop_assert_eq!(a.is_parent(&b), is_parent_d(&a, &b));
            prop_assert_eq!(b.is_parent(&a), is_parent_d(&b, &a));
            prop_assert_eq!(a.is_ancestor(&b), is_ancestor_d(&a, &b));
            prop_assert_eq!(b.is_ancestor(&a), is_ancestor_d(&b, &a));
            prop_assert_eq!(a.nearest_common_ancestor(&b), nearest_common_ancestor_d(&a, &b));
        }

        #[test]
        fn fast_relations_match_descriptive_3d((a, b) in related_pair::<3>(MAX_LEVEL)) {
            prop_assert_eq!(a.is_sibling(&b), is_sibling_d(&a, &b));
            prop_assert_eq!(a.is_parent(&b), is_parent_d(&a, &b));
            prop_assert_eq!(a.is_ancestor(&b), is_ancestor_d(&a, &b));
            prop_assert_eq!(b.is_ancestor(&a), is_ancestor_d(&b, &a));
            prop_assert_eq!(a.nearest_common_ancestor(&b), nearest_common_ancestor_d(&a, &b));
        }
    }

    #[test]
    fn test_worklist_region_root_children() {
        let q1 = Quadrant2::root().child(0);
        let q2 = Quadrant2::root().child(3);
        let region = complete_region_d(&q1, true, &q2, true);
        let expected: Vec<_> = Quadrant2::root().children().collect();
        assert_eq!(region, expected);
    }

    #[test]
    fn test_nca_of_octants() {
        let a = Octant::from_linear_index(3, 0o123).unwrap();
        let b = Octant::from_linear_index(3, 0o177).unwrap();
        assert_eq!(nearest_common_ancestor_d(&a, &b), Octant::from_linear_index(1, 1).unwrap());
    }
}
