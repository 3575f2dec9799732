//! Flat disjoint equivalence classes
//!
//! Plain union-by-insertion classes, used for equal lengths and equal
//! circle radii. Unlike the bipartite partition there is no "opposite"
//! relation, so two existing classes may be merged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Disjoint classes over elements of type `T`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqClasses<T: Ord> {
    classes: Vec<BTreeSet<T>>,
}

impl<T: Ord> Default for EqClasses<T> {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
        }
    }
}

impl<T: Copy + Ord + Debug> EqClasses<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert equality of `x` and `y`, merging classes when both exist
    pub fn add_equal(&mut self, x: T, y: T) {
        if x == y {
            return;
        }
        let ix = self.class_index(x);
        let iy = self.class_index(y);

        match (ix, iy) {
            (Some(i), Some(j)) if i == j => {}
            (Some(i), Some(j)) => {
                // Merge the later class into the earlier one.
                let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                let moved = self.classes.remove(hi);
                self.classes[lo].extend(moved);
            }
            (Some(i), None) => {
                self.classes[i].insert(y);
            }
            (None, Some(j)) => {
                self.classes[j].insert(x);
            }
            (None, None) => {
                let mut class = BTreeSet::new();
                class.insert(x);
                class.insert(y);
                self.classes.push(class);
            }
        }
    }

    /// True when both elements belong to one class (trivially for `x == y`)
    pub fn are_equal(&self, x: T, y: T) -> bool {
        if x == y {
            return true;
        }
        self.classes
            .iter()
            .any(|c| c.contains(&x) && c.contains(&y))
    }

    /// All elements equal to `x`, including `x` itself if registered
    pub fn class_of(&self, x: T) -> Vec<T> {
        self.class_index(x)
            .map(|i| self.classes[i].iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, x: T) -> bool {
        self.class_index(x).is_some()
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    fn class_index(&self, x: T) -> Option<usize> {
        self.classes.iter().position(|c| c.contains(&x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitive_equality() {
        let mut c = EqClasses::new();
        c.add_equal(1u32, 2);
        c.add_equal(2, 3);

        assert!(c.are_equal(1, 3));
        assert_eq!(c.num_classes(), 1);
    }

    #[test]
    fn test_merge_two_classes() {
        let mut c = EqClasses::new();
        c.add_equal(1u32, 2);
        c.add_equal(10, 11);
        assert_eq!(c.num_classes(), 2);

        c.add_equal(2, 10);
        assert_eq!(c.num_classes(), 1);
        assert!(c.are_equal(1, 11));
    }

    #[test]
    fn test_reflexive_without_registration() {
        let c: EqClasses<u32> = EqClasses::new();
        assert!(c.are_equal(5, 5));
        assert!(!c.contains(5));
    }

    #[test]
    fn test_class_of() {
        let mut c = EqClasses::new();
        c.add_equal(4u32, 7);
        c.add_equal(7, 2);

        assert_eq!(c.class_of(4), vec![2, 4, 7]);
        assert!(c.class_of(99).is_empty());
    }

    #[test]
    fn test_repeated_add_is_noop() {
        let mut c = EqClasses::new();
        c.add_equal(1u32, 2);
        c.add_equal(1, 2);
        c.add_equal(2, 1);

        assert_eq!(c.num_classes(), 1);
        assert_eq!(c.class_of(1).len(), 2);
    }
}
