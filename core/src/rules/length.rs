//! Equal-length derivation rules

use super::angle::triangle_refs;
use crate::fact::{Conclusion, Fact, Reason};
use crate::ir::{EntityRef, LengthId, Scene};
use crate::relations::RelationStore;

/// Corresponding sides of registered congruent triangles
///
/// Both segments must occupy the same index pair in their triangles' point
/// order; the correspondence is positional, never re-matched by geometry.
pub fn congruent_triangle_sides(
    scene: &Scene,
    store: &RelationStore,
    l1: LengthId,
    l2: LengthId,
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    let s1 = scene.length(l1).point_set();
    let s2 = scene.length(l2).point_set();

    for (m1, m2) in store.congruent_groups().member_pairs() {
        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            let side1 = crate::ir::same_point_set2([m1[i], m1[j]], s1);
            let side2 = crate::ir::same_point_set2([m2[i], m2[j]], s2);
            if side1 && side2 {
                return Some(Fact::new(
                    Conclusion::EqualLengths(l1, l2),
                    Reason::CongruentTriangleSides,
                    triangle_refs(m1).chain(triangle_refs(m2)).collect(),
                ));
            }
        }
    }
    None
}

/// Two radii of one circle, or of two circles known equal
pub fn equal_radius_lengths(
    scene: &Scene,
    store: &RelationStore,
    l1: LengthId,
    l2: LengthId,
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    let c1 = scene.length(l1).on_circle?;
    let c2 = scene.length(l2).on_circle?;

    if c1 != c2 && !store.are_equal_circle_arcs(c1, c2) {
        return None;
    }
    Some(Fact::new(
        Conclusion::EqualLengths(l1, l2),
        Reason::EqualRadii,
        vec![EntityRef::Circle(c1), EntityRef::Circle(c2)],
    ))
}
