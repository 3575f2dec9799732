//! Equal-angle derivation rules
//!
//! Every rule is a pure function over the scene, the incidence index, and
//! the relation store. A rule returns `Some(Fact)` when its theorem applies
//! and `None` otherwise; it never mutates anything.
//!
//! Ray comparisons use the sign algebra: each angle side is a line's unit
//! vector times a ±1 flag, and `sign(dot(..))` of two such rays is +1 for
//! the same direction, -1 for opposite rays.

use crate::fact::{Conclusion, Fact, Reason};
use crate::ir::{sign, AngleId, EntityRef, LineId, PointId, Scene};
use crate::relations::groups::CorrespondenceGroups;
use crate::relations::lookup::polygon_angle_at;
use crate::relations::{IncidenceIndex, RelationStore};

/// Vertical angles: same vertex, same line pair, opposite rays on both sides
pub fn vertical_angles(scene: &Scene, a1: AngleId, a2: AngleId) -> Option<Fact> {
    if a1 == a2 {
        return None;
    }
    let ang1 = scene.angle(a1);
    let ang2 = scene.angle(a2);

    if ang1.vertex != ang2.vertex {
        return None;
    }
    // Canonical clockwise ordering preserves which line comes first, so
    // the vertical angle has identical line assignment with flipped flags.
    if ang1.line_a != ang2.line_a || ang1.line_b != ang2.line_b {
        return None;
    }

    let e_a = scene.line(ang1.line_a).e;
    let e_b = scene.line(ang1.line_b).e;
    let s_a = sign((e_a * f64::from(ang1.dir_a)).dot(e_a * f64::from(ang2.dir_a)));
    let s_b = sign((e_b * f64::from(ang1.dir_b)).dot(e_b * f64::from(ang2.dir_b)));
    if s_a != -1 || s_b != -1 {
        return None;
    }

    Some(Fact::new(
        Conclusion::EqualAngles(a1, a2),
        Reason::VerticalAngles,
        vec![EntityRef::Line(ang1.line_a), EntityRef::Line(ang1.line_b)],
    ))
}

/// Corresponding/alternate angles at two parallel lines cut by a transversal
///
/// The two angles must share exactly one line (the transversal), the other
/// two lines must be known parallel, and the product of the ray signs over
/// both pairings must be +1.
pub fn parallel_line_angles(
    scene: &Scene,
    store: &RelationStore,
    a1: AngleId,
    a2: AngleId,
) -> Option<Fact> {
    let ang1 = scene.angle(a1);
    let ang2 = scene.angle(a2);
    if a1 == a2 || ang1.vertex == ang2.vertex {
        return None;
    }

    let cross = shared_line(ang1.lines(), ang2.lines())?;
    let m1 = ang1.other_line(cross)?;
    let m2 = ang2.other_line(cross)?;
    if m1 == m2 || !store.is_parallel(m1, m2) {
        return None;
    }

    let s_cross = ray_sign(scene, cross, ang1.dir_on(cross)?, cross, ang2.dir_on(cross)?);
    let s_par = ray_sign(scene, m1, ang1.dir_on(m1)?, m2, ang2.dir_on(m2)?);
    if s_cross * s_par != 1 {
        return None;
    }

    Some(Fact::new(
        Conclusion::EqualAngles(a1, a2),
        Reason::ParallelLineAngles,
        vec![
            EntityRef::Line(m1),
            EntityRef::Line(m2),
            EntityRef::Line(cross),
        ],
    ))
}

/// Two half-angles on either side of a caller-supplied bisector line
pub fn angle_bisector(
    scene: &Scene,
    a1: AngleId,
    a2: AngleId,
    bisector: LineId,
) -> Option<Fact> {
    if a1 == a2 {
        return None;
    }
    let ang1 = scene.angle(a1);
    let ang2 = scene.angle(a2);

    if ang1.vertex != ang2.vertex {
        return None;
    }
    let other1 = ang1.other_line(bisector)?;
    let other2 = ang2.other_line(bisector)?;

    // Both halves lean on the same ray of the bisector.
    if ray_sign(
        scene,
        bisector,
        ang1.dir_on(bisector)?,
        bisector,
        ang2.dir_on(bisector)?,
    ) != 1
    {
        return None;
    }

    Some(Fact::new(
        Conclusion::EqualAngles(a1, a2),
        Reason::AngleBisector,
        vec![
            EntityRef::Line(bisector),
            EntityRef::Line(other1),
            EntityRef::Line(other2),
        ],
    ))
}

/// Corresponding angles of registered congruent triangles
pub fn congruent_triangle_angles(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    a1: AngleId,
    a2: AngleId,
) -> Option<Fact> {
    triangle_angle_transfer(
        scene,
        incidence,
        store,
        store.congruent_groups(),
        Reason::CongruentTriangleAngles,
        a1,
        a2,
    )
}

/// Corresponding angles of registered similar triangles
pub fn similar_triangle_angles(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    a1: AngleId,
    a2: AngleId,
) -> Option<Fact> {
    triangle_angle_transfer(
        scene,
        incidence,
        store,
        store.similar_groups(),
        Reason::SimilarTriangleAngles,
        a1,
        a2,
    )
}

fn triangle_angle_transfer(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    groups: &CorrespondenceGroups,
    reason: Reason,
    a1: AngleId,
    a2: AngleId,
) -> Option<Fact> {
    if a1 == a2 {
        return None;
    }
    let v1 = scene.angle(a1).vertex;
    let v2 = scene.angle(a2).vertex;

    for (m1, m2) in groups.member_pairs() {
        for i in 0..3 {
            // The correspondence is positional: only the same index counts.
            if m1[i] != v1 || m2[i] != v2 {
                continue;
            }
            let at1 = polygon_angle_at(scene, incidence, store, &m1, v1);
            let at2 = polygon_angle_at(scene, incidence, store, &m2, v2);
            if at1 == Some(a1) && at2 == Some(a2) {
                return Some(Fact::new(
                    Conclusion::EqualAngles(a1, a2),
                    reason,
                    triangle_refs(m1).chain(triangle_refs(m2)).collect(),
                ));
            }
        }
    }
    None
}

/// Base angles of a registered isosceles triangle
///
/// The two angle vertices must be the base vertices, and each angle's line
/// pair must be the base line plus that vertex's leg.
pub fn isosceles_base_angles(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    a1: AngleId,
    a2: AngleId,
) -> Option<Fact> {
    if a1 == a2 {
        return None;
    }
    let v1 = scene.angle(a1).vertex;
    let v2 = scene.angle(a2).vertex;

    for t in store.isosceles_list() {
        let [apex, b1, b2] = *t;
        let (leg1, leg2) = if v1 == b1 && v2 == b2 {
            (b1, b2)
        } else if v1 == b2 && v2 == b1 {
            (b2, b1)
        } else {
            continue;
        };

        let base = match incidence.common_line(b1, b2) {
            Some(l) => l,
            None => continue,
        };
        let leg_of_v1 = match incidence.common_line(apex, leg1) {
            Some(l) => l,
            None => continue,
        };
        let leg_of_v2 = match incidence.common_line(apex, leg2) {
            Some(l) => l,
            None => continue,
        };

        let ang1 = scene.angle(a1);
        let ang2 = scene.angle(a2);
        if line_set(ang1.lines()) == line_set([base, leg_of_v1])
            && line_set(ang2.lines()) == line_set([base, leg_of_v2])
        {
            return Some(Fact::new(
                Conclusion::EqualAngles(a1, a2),
                Reason::IsoscelesBaseAngles,
                triangle_refs(*t).collect(),
            ));
        }
    }
    None
}

/// Any two right angles are equal
pub fn right_angles_equal(store: &RelationStore, a1: AngleId, a2: AngleId) -> Option<Fact> {
    if a1 == a2 || !store.is_right_angle(a1) || !store.is_right_angle(a2) {
        return None;
    }
    Some(Fact::new(
        Conclusion::EqualAngles(a1, a2),
        Reason::RightAngles,
        vec![],
    ))
}

/// Sign of the dot product of two (line, ±1) rays
pub(crate) fn ray_sign(scene: &Scene, l1: LineId, d1: i8, l2: LineId, d2: i8) -> i8 {
    let r1 = scene.line(l1).e * f64::from(d1);
    let r2 = scene.line(l2).e * f64::from(d2);
    sign(r1.dot(r2))
}

/// The unique line shared by two angle line pairs, if exactly one
pub(crate) fn shared_line(a: [LineId; 2], b: [LineId; 2]) -> Option<LineId> {
    let shared: Vec<LineId> = a.iter().filter(|l| b.contains(l)).copied().collect();
    if shared.len() == 1 {
        Some(shared[0])
    } else {
        None
    }
}

pub(crate) fn line_set(lines: [LineId; 2]) -> [LineId; 2] {
    if lines[0] <= lines[1] {
        lines
    } else {
        [lines[1], lines[0]]
    }
}

pub(crate) fn triangle_refs(t: [PointId; 3]) -> impl Iterator<Item = EntityRef> {
    t.into_iter().map(EntityRef::Point)
}
