//! Triangle correspondence groups
//!
//! Congruent and similar triangles are stored as groups of ordered point
//! triples: `points[i]` of one member corresponds to `points[i]` of every
//! other member of the same group. Registering a triangle whose point set
//! already appears in a group under a different vertex order is a fatal
//! inconsistency; the engine never relabels which vertex corresponds to
//! which.

use crate::ir::{same_point_set3, PointId};
use serde::{Deserialize, Serialize};

/// Groups of positionally-corresponding triangles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceGroups {
    groups: Vec<Vec<[PointId; 3]>>,
}

impl CorrespondenceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a corresponding pair
    ///
    /// Panics when either triangle's point set is already present in some
    /// group under a non-identity vertex permutation.
    pub fn add(&mut self, t1: [PointId; 3], t2: [PointId; 3]) {
        let g1 = self.find_member(t1);
        let g2 = self.find_member(t2);

        match (g1, g2) {
            (Some(i), Some(j)) if i == j => {}
            (Some(i), Some(j)) => {
                // Consistent orderings in two groups: union them.
                let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                let moved = self.groups.remove(hi);
                self.groups[lo].extend(moved);
            }
            (Some(i), None) => self.groups[i].push(t2),
            (None, Some(j)) => self.groups[j].push(t1),
            (None, None) => self.groups.push(vec![t1, t2]),
        }
    }

    /// True when both orderings appear, exactly as given, in one group
    pub fn contains_pair(&self, t1: [PointId; 3], t2: [PointId; 3]) -> bool {
        self.groups
            .iter()
            .any(|g| g.contains(&t1) && g.contains(&t2))
    }

    /// All groups, for rule-library iteration
    pub fn groups(&self) -> &[Vec<[PointId; 3]>] {
        &self.groups
    }

    /// Ordered pairs `(m1, m2)` of distinct members of one group
    pub fn member_pairs(&self) -> impl Iterator<Item = ([PointId; 3], [PointId; 3])> + '_ {
        self.groups.iter().flat_map(|g| {
            g.iter().flat_map(move |m1| {
                g.iter()
                    .filter(move |m2| *m2 != m1)
                    .map(move |m2| (*m1, *m2))
            })
        })
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Locate the group holding a triangle with this point set
    ///
    /// Panics on a set-equal member whose vertex order differs from the
    /// query: that would silently change an established correspondence.
    fn find_member(&self, t: [PointId; 3]) -> Option<usize> {
        for (i, g) in self.groups.iter().enumerate() {
            for m in g {
                if same_point_set3(*m, t) {
                    assert!(
                        *m == t,
                        "triangle {t:?} conflicts with recorded correspondence {m:?}: \
                         vertex permutation must be the identity"
                    );
                    return Some(i);
                }
            }
        }
        None
    }
}
