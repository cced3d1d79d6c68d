#![allow(dead_code)]

use proptest::prelude::*;
use quadforest::{Level, Quadrant, MAX_LEVEL};

/// Valid quadrant with level in `0..=max_level`.
pub fn quadrant<const D: usize>(max_level: Level) -> impl Strategy<Value = Quadrant<D>> {
    (0..=max_level).prop_flat_map(|level| {
        proptest::collection::vec(0..(1i32 << level), D).prop_map(move |cells| {
            let mut coords = [0; D];
            for (coord, cell) in coords.iter_mut().zip(cells) {
                *coord = cell << (MAX_LEVEL - level);
            }
            Quadrant::new(coords, level).expect("generated quadrant is valid")
        })
    })
}

/// Valid quadrant at level 1 or deeper.
pub fn non_root<const D: usize>(max_level: Level) -> impl Strategy<Value = Quadrant<D>> {
    quadrant::<D>(max_level).prop_filter("root has no parent", |q| q.level() > 0)
}

/// Two distinct quadrants in ascending Morton order.
pub fn ascending_pair<const D: usize>(
    max_level: Level,
) -> impl Strategy<Value = (Quadrant<D>, Quadrant<D>)> {
    (quadrant::<D>(max_level), quadrant::<D>(max_level))
        .prop_filter("endpoints must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| if a < b { (a, b) } else { (b, a) })
}

/// Morton key range `[start, end)` strictly between two endpoints.
pub fn gap<const D: usize>(q1: &Quadrant<D>, q2: &Quadrant<D>) -> (u128, u128) {
    let start = if q1.is_ancestor(q2) {
        q1.morton_key()
    } else {
        q1.morton_key() + q1.morton_extent()
    };
    (start, q2.morton_key())
}

/// Shorthand for a quadtree cell by level and linear index.
pub fn quad(level: Level, index: u64) -> quadforest::Quadrant2 {
    quadforest::Quadrant2::from_linear_index(level, index).expect("valid linear index")
}
