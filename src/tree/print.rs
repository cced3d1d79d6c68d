//! Line-per-quadrant rendering of a tree
//!
//! Each line shows the coordinates in hex, the level, and a label relating
//! the quadrant to the one printed before it.

use std::fmt;

use super::Tree;
use crate::quadrant::{ChildId, Quadrant};

/// How a quadrant relates to its predecessor in a printed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// First quadrant, nothing to relate to.
    First,
    /// Same quadrant as the previous one.
    Identical,
    /// Smaller than the previous one in Morton order.
    Reverse,
    /// Child of the previous quadrant, with its child id.
    Child(ChildId),
    /// Sibling of the previous quadrant, with its child id.
    Sibling(ChildId),
    /// Deeper descendant of the previous quadrant.
    Descendant,
    /// Any other successor, with its child id.
    Other(ChildId),
}

impl Relation {
    /// Classify `q` against the quadrant printed before it.
    pub fn between<const D: usize>(previous: Option<&Quadrant<D>>, q: &Quadrant<D>) -> Self {
        let Some(previous) = previous else {
            return Relation::First;
        };
        let child_id = q.child_id();
        if previous == q {
            Relation::Identical
        } else if previous > q {
            Relation::Reverse
        } else if previous.is_parent(q) {
            Relation::Child(child_id)
        } else if previous.is_sibling(q) {
            Relation::Sibling(child_id)
        } else if previous.is_ancestor(q) {
            Relation::Descendant
        } else {
            Relation::Other(child_id)
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::First => write!(f, "F"),
            Relation::Identical => write!(f, "I"),
            Relation::Reverse => write!(f, "R"),
            Relation::Child(id) => write!(f, "C{}", id),
            Relation::Sibling(id) => write!(f, "S{}", id),
            Relation::Descendant => write!(f, "D"),
            Relation::Other(id) => write!(f, "Q{}", id),
        }
    }
}

/// Borrowing [`Display`](fmt::Display) adapter returned by [`Tree::display`].
#[derive(Debug)]
pub struct TreeDisplay<'a, const D: usize, T> {
    tree: &'a Tree<D, T>,
    identifier: Option<i32>,
}

impl<'a, const D: usize, T> TreeDisplay<'a, D, T> {
    pub(super) fn new(tree: &'a Tree<D, T>, identifier: Option<i32>) -> Self {
        Self { tree, identifier }
    }
}

impl<const D: usize, T> fmt::Display for TreeDisplay<'_, D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous = None;
        for leaf in self.tree.leaves() {
            let q = &leaf.quadrant;
            if let Some(identifier) = self.identifier {
                write!(f, "[{}] ", identifier)?;
            }
            for coord in q.coords() {
                write!(f, "{:#x} ", coord)?;
            }
            writeln!(f, "{} {}", q.level(), Relation::between(previous, q))?;
            previous = Some(q);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NoData;
    use crate::quadrant::Quadrant2;

    fn quad(level: u8, index: u64) -> Quadrant2 {
        Quadrant2::from_linear_index(level, index).unwrap()
    }

    #[test]
    fn test_relation_labels() {
        let sequence = [
            quad(1, 0),
            quad(2, 1),
            quad(2, 3),
            quad(2, 3),
            quad(2, 2),
            quad(1, 3),
            quad(3, 60),
        ];
        let mut tree = Tree::new(0);
        for q in sequence {
            tree.insert_with(q, &mut NoData);
        }

        let labels: Vec<String> = tree
            .display(None)
            .to_string()
            .lines()
            .map(|line| line.rsplit(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["F", "C1", "S3", "I", "R", "Q3", "D"]);
    }

    #[test]
    fn test_descendant_label_and_prefix() {
        let mut tree = Tree::new(0);
        tree.insert_with(Quadrant2::root(), &mut NoData);
        tree.insert_with(quad(2, 6), &mut NoData);
        let text = tree.display(Some(5)).to_string();
        assert_eq!(text, "[5] 0x0 0x0 0 F\n[5] 0x20000000 0x10000000 2 D\n");
    }
}
