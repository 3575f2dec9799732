//! Parallel-line detection rules

use super::angle::{ray_sign, shared_line};
use crate::fact::{Conclusion, Fact, Reason};
use crate::ir::{EntityRef, LineId, Scene};
use crate::relations::{IncidenceIndex, RelationStore};

/// Two lines carrying opposite sides of a committed parallelogram
pub fn parallel_from_parallelogram(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    l1: LineId,
    l2: LineId,
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    for record in store.parallelograms() {
        let cycle = scene.clockwise4(record.points);
        for k in 0..2 {
            let Some(a) = incidence.common_line(cycle[k], cycle[(k + 1) % 4]) else {
                continue;
            };
            let Some(b) = incidence.common_line(cycle[k + 2], cycle[(k + 3) % 4]) else {
                continue;
            };
            if (a, b) == (l1, l2) || (a, b) == (l2, l1) {
                return Some(Fact::new(
                    Conclusion::ParallelLines(l1, l2),
                    Reason::ParallelogramSides,
                    cycle.into_iter().map(EntityRef::Point).collect(),
                ));
            }
        }
    }
    None
}

/// Two lines cut by a transversal with equal corresponding angles
///
/// Searches the registry for an equal angle pair at distinct vertices whose
/// line pairs share exactly one line (the transversal), with the other two
/// lines being the candidates and the ray sign product +1.
pub fn parallel_from_transversal_angles(
    scene: &Scene,
    store: &RelationStore,
    l1: LineId,
    l2: LineId,
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    for (a1, ang1) in scene.angles() {
        for (a2, ang2) in scene.angles() {
            if a1 >= a2 || ang1.vertex == ang2.vertex {
                continue;
            }
            if !store.is_equal_angle(a1, a2) {
                continue;
            }
            let Some(cross) = shared_line(ang1.lines(), ang2.lines()) else {
                continue;
            };
            let (Some(m1), Some(m2)) = (ang1.other_line(cross), ang2.other_line(cross)) else {
                continue;
            };
            if (m1, m2) != (l1, l2) && (m1, m2) != (l2, l1) {
                continue;
            }

            let (Some(d1), Some(d2)) = (ang1.dir_on(cross), ang2.dir_on(cross)) else {
                continue;
            };
            let s_cross = ray_sign(scene, cross, d1, cross, d2);
            let (Some(e1), Some(e2)) = (ang1.dir_on(m1), ang2.dir_on(m2)) else {
                continue;
            };
            let s_par = ray_sign(scene, m1, e1, m2, e2);
            if s_cross * s_par != 1 {
                continue;
            }

            return Some(Fact::new(
                Conclusion::ParallelLines(l1, l2),
                Reason::TransversalAngles,
                vec![
                    EntityRef::Angle(a1),
                    EntityRef::Angle(a2),
                    EntityRef::Line(cross),
                ],
            ));
        }
    }
    None
}
