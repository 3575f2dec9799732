//! Triangle congruence, similarity, and isosceles detection
//!
//! Congruence counts equal corresponding sides through the equal-length
//! classes and falls through SSS, SAS, ASA in that order: three equal sides
//! need no angle, two equal sides need the included angle (the one opposite
//! the unmatched side), one equal side needs both adjacent angles.

use crate::fact::{Conclusion, Fact, Reason};
use crate::ir::{AngleId, EntityRef, LengthId, PointId, Scene};
use crate::relations::lookup::polygon_angle_at;
use crate::relations::{IncidenceIndex, RelationStore};

/// Derive congruence of two triangles from registered sides and angles
///
/// Correspondence is positional: side k of `t1` is only ever compared to
/// side k of `t2`, and likewise for angles. Sides without a registered
/// length symbol on both triangles are treated as unmatched.
pub fn triangle_congruence(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    t1: [PointId; 3],
    t2: [PointId; 3],
) -> Option<Fact> {
    if t1 == t2 {
        return None;
    }

    let mut matched: Vec<(usize, LengthId, LengthId)> = Vec::new();
    for k in 0..3 {
        if let Some((l1, l2)) = side_pair(store, t1, t2, k) {
            if store.is_equal_length(l1, l2) {
                matched.push((k, l1, l2));
            }
        }
    }

    match matched.len() {
        3 => {
            let mut aux = Vec::with_capacity(6);
            for (_, l1, l2) in &matched {
                aux.push(EntityRef::Length(*l1));
                aux.push(EntityRef::Length(*l2));
            }
            Some(Fact::new(
                Conclusion::CongruentTriangles(t1, t2),
                Reason::SideSideSide,
                aux,
            ))
        }
        2 => {
            let unmatched = (0..3).find(|k| !matched.iter().any(|(m, _, _)| m == k))?;
            // The angle included between the two matched sides sits at the
            // vertex not on the unmatched side.
            let apex = (unmatched + 2) % 3;
            let (a1, a2) = angle_pair(scene, incidence, store, t1, t2, apex)?;
            if !store.is_equal_angle(a1, a2) {
                return None;
            }
            let mut aux = Vec::with_capacity(6);
            for (_, l1, l2) in &matched {
                aux.push(EntityRef::Length(*l1));
                aux.push(EntityRef::Length(*l2));
            }
            aux.push(EntityRef::Angle(a1));
            aux.push(EntityRef::Angle(a2));
            Some(Fact::new(
                Conclusion::CongruentTriangles(t1, t2),
                Reason::SideAngleSide,
                aux,
            ))
        }
        1 => {
            let (k, l1, l2) = matched[0];
            let (a1, a2) = angle_pair(scene, incidence, store, t1, t2, k)?;
            let (b1, b2) = angle_pair(scene, incidence, store, t1, t2, (k + 1) % 3)?;
            if !store.is_equal_angle(a1, a2) || !store.is_equal_angle(b1, b2) {
                return None;
            }
            Some(Fact::new(
                Conclusion::CongruentTriangles(t1, t2),
                Reason::AngleSideAngle,
                vec![
                    EntityRef::Length(l1),
                    EntityRef::Length(l2),
                    EntityRef::Angle(a1),
                    EntityRef::Angle(a2),
                    EntityRef::Angle(b1),
                    EntityRef::Angle(b2),
                ],
            ))
        }
        _ => None,
    }
}

/// Derive similarity of two triangles from two equal corresponding angles
pub fn triangle_similarity(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    t1: [PointId; 3],
    t2: [PointId; 3],
) -> Option<Fact> {
    if t1 == t2 {
        return None;
    }

    let mut equal_pairs: Vec<(AngleId, AngleId)> = Vec::new();
    for k in 0..3 {
        if let Some((a1, a2)) = angle_pair(scene, incidence, store, t1, t2, k) {
            if store.is_equal_angle(a1, a2) {
                equal_pairs.push((a1, a2));
            }
        }
    }
    if equal_pairs.len() < 2 {
        return None;
    }

    let aux = equal_pairs[..2]
        .iter()
        .flat_map(|(a1, a2)| [EntityRef::Angle(*a1), EntityRef::Angle(*a2)])
        .collect();
    Some(Fact::new(
        Conclusion::SimilarTriangles(t1, t2),
        Reason::AngleAngle,
        aux,
    ))
}

/// Detect an isosceles triangle from two equal legs
///
/// The conclusion lists the apex first, then the two base vertices in the
/// triangle's own order.
pub fn isosceles_from_equal_legs(store: &RelationStore, points: [PointId; 3]) -> Option<Fact> {
    for a in 0..3 {
        let b1 = points[(a + 1) % 3];
        let b2 = points[(a + 2) % 3];
        let leg1 = store.find_length(points[a], b1);
        let leg2 = store.find_length(points[a], b2);
        if let (Some(l1), Some(l2)) = (leg1, leg2) {
            if store.is_equal_length(l1, l2) {
                return Some(Fact::new(
                    Conclusion::IsoscelesTriangle([points[a], b1, b2]),
                    Reason::EqualLegs,
                    vec![EntityRef::Length(l1), EntityRef::Length(l2)],
                ));
            }
        }
    }
    None
}

/// Length symbols for side k (vertices k and k+1) of both triangles
fn side_pair(
    store: &RelationStore,
    t1: [PointId; 3],
    t2: [PointId; 3],
    k: usize,
) -> Option<(LengthId, LengthId)> {
    let l1 = store.find_length(t1[k], t1[(k + 1) % 3])?;
    let l2 = store.find_length(t2[k], t2[(k + 1) % 3])?;
    Some((l1, l2))
}

/// Registered interior angles at vertex index k of both triangles
fn angle_pair(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    t1: [PointId; 3],
    t2: [PointId; 3],
    k: usize,
) -> Option<(AngleId, AngleId)> {
    let a1 = polygon_angle_at(scene, incidence, store, &t1, t1[k])?;
    let a2 = polygon_angle_at(scene, incidence, store, &t2, t2[k])?;
    Some((a1, a2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Angle, LengthSymbol};
    use crate::relations::lookup::angle_key_of;

    /// Two congruent right triangles with every side length symbol and every
    /// interior angle constructed, but no equalities asserted yet.
    struct Twins {
        scene: Scene,
        incidence: IncidenceIndex,
        store: RelationStore,
        t1: [PointId; 3],
        t2: [PointId; 3],
        sides: [[LengthId; 3]; 2],
        angles: [[AngleId; 3]; 2],
    }

    fn twins() -> Twins {
        let mut scene = Scene::new();
        let mut incidence = IncidenceIndex::new();

        let coords = [
            [(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)],
            [(10.0, 0.0), (14.0, 0.0), (10.0, 3.0)],
        ];
        let mut tris: Vec<[PointId; 3]> = Vec::new();
        for (t, pts) in coords.iter().enumerate() {
            let ids: Vec<PointId> = pts
                .iter()
                .enumerate()
                .map(|(i, (x, y))| scene.add_point(format!("P{}", t * 3 + i), *x, *y))
                .collect();
            let tri = [ids[0], ids[1], ids[2]];
            for k in 0..3 {
                let line = scene.add_line(tri[k], tri[(k + 1) % 3]);
                incidence.add_point_on_line(tri[k], line);
                incidence.add_point_on_line(tri[(k + 1) % 3], line);
            }
            tris.push(tri);
        }
        let (t1, t2) = (tris[0], tris[1]);

        let mut sides = [[LengthId(0); 3]; 2];
        for (t, tri) in [t1, t2].into_iter().enumerate() {
            for k in 0..3 {
                sides[t][k] = scene.add_length(LengthSymbol {
                    p1: tri[k],
                    p2: tri[(k + 1) % 3],
                    kind: 0,
                    on_line: None,
                    on_circle: None,
                });
            }
        }

        let mut angles = [[AngleId(0); 3]; 2];
        let mut mark = 1;
        for (t, tri) in [t1, t2].into_iter().enumerate() {
            for k in 0..3 {
                let triple = [tri[(k + 2) % 3], tri[k], tri[(k + 1) % 3]];
                let key = angle_key_of(&scene, &incidence, triple).unwrap();
                angles[t][k] = scene.add_angle(Angle {
                    line_a: key.line_a,
                    dir_a: key.dir_a,
                    line_b: key.line_b,
                    dir_b: key.dir_b,
                    vertex: key.vertex,
                    mark,
                });
                mark += 1;
            }
        }

        let mut store = RelationStore::new();
        store.register_scene(&scene);

        Twins {
            scene,
            incidence,
            store,
            t1,
            t2,
            sides,
            angles,
        }
    }

    #[test]
    fn test_sss_congruence() {
        let mut f = twins();
        for k in 0..3 {
            f.store.add_equal_lengths(f.sides[0][k], f.sides[1][k]);
        }

        let fact = triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2)
            .expect("three equal sides");
        assert_eq!(fact.reason, Reason::SideSideSide);

        let expected: Vec<EntityRef> = (0..3)
            .flat_map(|k| {
                [
                    EntityRef::Length(f.sides[0][k]),
                    EntityRef::Length(f.sides[1][k]),
                ]
            })
            .collect();
        assert_eq!(fact.auxiliary, expected);
    }

    #[test]
    fn test_sas_congruence() {
        let mut f = twins();
        // Sides 0 and 2 meet at vertex 0; side 1 stays unmatched.
        f.store.add_equal_lengths(f.sides[0][0], f.sides[1][0]);
        f.store.add_equal_lengths(f.sides[0][2], f.sides[1][2]);

        assert!(
            triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2).is_none(),
            "included angle not yet known equal"
        );

        f.store.add_equal_angles(f.angles[0][0], f.angles[1][0]);
        let fact = triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2)
            .expect("two sides and included angle");
        assert_eq!(fact.reason, Reason::SideAngleSide);
        assert!(fact.auxiliary.contains(&EntityRef::Angle(f.angles[0][0])));
    }

    #[test]
    fn test_sas_rejects_non_included_angle() {
        let mut f = twins();
        f.store.add_equal_lengths(f.sides[0][0], f.sides[1][0]);
        f.store.add_equal_lengths(f.sides[0][2], f.sides[1][2]);
        // Equal angle at vertex 1 is not the included one.
        f.store.add_equal_angles(f.angles[0][1], f.angles[1][1]);

        assert!(triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2).is_none());
    }

    #[test]
    fn test_asa_congruence() {
        let mut f = twins();
        f.store.add_equal_lengths(f.sides[0][0], f.sides[1][0]);
        f.store.add_equal_angles(f.angles[0][0], f.angles[1][0]);
        f.store.add_equal_angles(f.angles[0][1], f.angles[1][1]);

        let fact = triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2)
            .expect("one side and both adjacent angles");
        assert_eq!(fact.reason, Reason::AngleSideAngle);
    }

    #[test]
    fn test_no_sides_no_congruence() {
        let f = twins();
        assert!(triangle_congruence(&f.scene, &f.incidence, &f.store, f.t1, f.t2).is_none());
    }

    #[test]
    fn test_aa_similarity() {
        let mut f = twins();
        f.store.add_equal_angles(f.angles[0][0], f.angles[1][0]);
        assert!(
            triangle_similarity(&f.scene, &f.incidence, &f.store, f.t1, f.t2).is_none(),
            "one angle pair is not enough"
        );

        f.store.add_equal_angles(f.angles[0][2], f.angles[1][2]);
        let fact = triangle_similarity(&f.scene, &f.incidence, &f.store, f.t1, f.t2)
            .expect("two equal angle pairs");
        assert_eq!(fact.reason, Reason::AngleAngle);
        assert_eq!(fact.auxiliary.len(), 4);
    }

    #[test]
    fn test_isosceles_from_equal_legs() {
        let mut scene = Scene::new();
        let apex = scene.add_point("A", 2.0, 0.0);
        let b1 = scene.add_point("B", 0.0, 3.0);
        let b2 = scene.add_point("C", 4.0, 3.0);

        let leg1 = scene.add_length(LengthSymbol {
            p1: apex,
            p2: b1,
            kind: 0,
            on_line: None,
            on_circle: None,
        });
        let leg2 = scene.add_length(LengthSymbol {
            p1: apex,
            p2: b2,
            kind: 0,
            on_line: None,
            on_circle: None,
        });

        let mut store = RelationStore::new();
        store.register_scene(&scene);

        assert!(isosceles_from_equal_legs(&store, [b1, b2, apex]).is_none());

        store.add_equal_lengths(leg1, leg2);
        let fact =
            isosceles_from_equal_legs(&store, [b1, b2, apex]).expect("legs now equal");
        assert_eq!(fact.reason, Reason::EqualLegs);
        assert_eq!(
            fact.conclusion,
            Conclusion::IsoscelesTriangle([apex, b1, b2])
        );
    }
}
