//! Parallelogram classification and parallelogram-based transfers
//!
//! The classifier canonicalizes the quadrilateral to clockwise cycle order
//! and tries five criteria in a fixed order; the first that holds wins. The
//! transfer rules accept either a committed parallelogram record or a fresh
//! classification as their evidence.

use crate::fact::{Conclusion, Fact, QuadClass, Reason};
use crate::ir::{same_point_set2, AngleId, EntityRef, LengthId, LineId, PointId, Scene};
use crate::relations::lookup::polygon_angle_at;
use crate::relations::{IncidenceIndex, RelationStore};

/// Classify a quadrilateral as a parallelogram (or rhombus)
///
/// Criteria, in order: both opposite side pairs equal; both opposite side
/// pairs parallel; both opposite angle pairs equal; one side pair parallel
/// and equal; diagonals bisect each other. The class upgrades to rhombus
/// when all four sides fall in one equal-length class.
pub fn classify_parallelogram(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    points: [PointId; 4],
) -> Option<Fact> {
    let c = scene.clockwise4(points);
    let sides: [Option<LengthId>; 4] =
        std::array::from_fn(|k| store.find_length(c[k], c[(k + 1) % 4]));

    let (reason, aux) = opposite_sides_equal(store, &sides)
        .or_else(|| opposite_sides_parallel(incidence, store, c))
        .or_else(|| opposite_angles_equal(scene, incidence, store, c))
        .or_else(|| one_pair_parallel_and_equal(incidence, store, c, &sides))
        .or_else(|| diagonals_bisect(incidence, store, c))?;

    let class = if all_sides_one_class(store, &sides) {
        QuadClass::Rhombus
    } else {
        QuadClass::Parallelogram
    };
    Some(Fact::new(Conclusion::Parallelogram(c, class), reason, aux))
}

/// The parallelogram evidence for a point set: a committed record if one
/// exists, otherwise a fresh classification
pub fn parallelogram_evidence(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    points: [PointId; 4],
) -> Option<([PointId; 4], QuadClass)> {
    if let Some(record) = store.parallelogram_record(points) {
        return Some((scene.clockwise4(record.points), record.class));
    }
    let fact = classify_parallelogram(scene, incidence, store, points)?;
    match fact.conclusion {
        Conclusion::Parallelogram(cycle, class) => Some((cycle, class)),
        _ => unreachable!(),
    }
}

/// Opposite angles of a parallelogram are equal
pub fn parallelogram_opposite_angles(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    a1: AngleId,
    a2: AngleId,
    points: [PointId; 4],
) -> Option<Fact> {
    if a1 == a2 {
        return None;
    }
    let (cycle, _) = parallelogram_evidence(scene, incidence, store, points)?;

    let v1 = scene.angle(a1).vertex;
    let v2 = scene.angle(a2).vertex;
    let i = cycle.iter().position(|p| *p == v1)?;
    if cycle[(i + 2) % 4] != v2 {
        return None;
    }
    // Both ids must be the registered interior angles, not a coincidental
    // angle at the same vertex.
    if polygon_angle_at(scene, incidence, store, &cycle, v1) != Some(a1)
        || polygon_angle_at(scene, incidence, store, &cycle, v2) != Some(a2)
    {
        return None;
    }

    Some(Fact::new(
        Conclusion::EqualAngles(a1, a2),
        Reason::ParallelogramOppositeAngles,
        quad_refs(cycle),
    ))
}

/// Opposite sides of a parallelogram are equal
pub fn parallelogram_opposite_sides(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    l1: LengthId,
    l2: LengthId,
    points: [PointId; 4],
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    let (cycle, _) = parallelogram_evidence(scene, incidence, store, points)?;

    let s1 = scene.length(l1).point_set();
    let s2 = scene.length(l2).point_set();
    for k in 0..2 {
        let side = [cycle[k], cycle[k + 1]];
        let opposite = [cycle[k + 2], cycle[(k + 3) % 4]];
        let direct = same_point_set2(side, s1) && same_point_set2(opposite, s2);
        let swapped = same_point_set2(side, s2) && same_point_set2(opposite, s1);
        if direct || swapped {
            return Some(Fact::new(
                Conclusion::EqualLengths(l1, l2),
                Reason::ParallelogramOppositeSides,
                quad_refs(cycle),
            ));
        }
    }
    None
}

/// Diagonals of a parallelogram bisect each other
///
/// The two length symbols must be the two halves of one diagonal, split at
/// the diagonals' registered intersection point.
pub fn parallelogram_diagonal_lengths(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    l1: LengthId,
    l2: LengthId,
    points: [PointId; 4],
) -> Option<Fact> {
    if l1 == l2 {
        return None;
    }
    let (cycle, _) = parallelogram_evidence(scene, incidence, store, points)?;
    let m = diagonal_intersection(incidence, cycle)?;

    let s1 = scene.length(l1).point_set();
    let s2 = scene.length(l2).point_set();
    for (a, b) in [(cycle[0], cycle[2]), (cycle[1], cycle[3])] {
        let half1 = [a, m];
        let half2 = [m, b];
        let direct = same_point_set2(half1, s1) && same_point_set2(half2, s2);
        let swapped = same_point_set2(half1, s2) && same_point_set2(half2, s1);
        if direct || swapped {
            let mut aux = quad_refs(cycle);
            aux.push(EntityRef::Point(m));
            return Some(Fact::new(
                Conclusion::EqualLengths(l1, l2),
                Reason::ParallelogramDiagonalBisection,
                aux,
            ));
        }
    }
    None
}

fn opposite_sides_equal(
    store: &RelationStore,
    sides: &[Option<LengthId>; 4],
) -> Option<(Reason, Vec<EntityRef>)> {
    let (Some(s0), Some(s1), Some(s2), Some(s3)) = (sides[0], sides[1], sides[2], sides[3])
    else {
        return None;
    };
    if store.is_equal_length(s0, s2) && store.is_equal_length(s1, s3) {
        Some((
            Reason::OppositeSidesEqual,
            vec![s0, s1, s2, s3].into_iter().map(EntityRef::Length).collect(),
        ))
    } else {
        None
    }
}

fn opposite_sides_parallel(
    incidence: &IncidenceIndex,
    store: &RelationStore,
    c: [PointId; 4],
) -> Option<(Reason, Vec<EntityRef>)> {
    let lines: [_; 4] = side_lines(incidence, c)?;
    if store.is_parallel(lines[0], lines[2]) && store.is_parallel(lines[1], lines[3]) {
        Some((
            Reason::OppositeSidesParallel,
            lines.into_iter().map(EntityRef::Line).collect(),
        ))
    } else {
        None
    }
}

fn opposite_angles_equal(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    c: [PointId; 4],
) -> Option<(Reason, Vec<EntityRef>)> {
    let angles: [AngleId; 4] = {
        let mut out = [AngleId(0); 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = polygon_angle_at(scene, incidence, store, &c, c[i])?;
        }
        out
    };
    if store.is_equal_angle(angles[0], angles[2]) && store.is_equal_angle(angles[1], angles[3]) {
        Some((
            Reason::OppositeAnglesEqual,
            angles.into_iter().map(EntityRef::Angle).collect(),
        ))
    } else {
        None
    }
}

fn one_pair_parallel_and_equal(
    incidence: &IncidenceIndex,
    store: &RelationStore,
    c: [PointId; 4],
    sides: &[Option<LengthId>; 4],
) -> Option<(Reason, Vec<EntityRef>)> {
    for k in 0..2 {
        let opp = k + 2;
        let line_a = incidence.common_line(c[k], c[(k + 1) % 4]);
        let line_b = incidence.common_line(c[opp], c[(opp + 1) % 4]);
        let (Some(la), Some(lb)) = (line_a, line_b) else {
            continue;
        };
        let (Some(sa), Some(sb)) = (sides[k], sides[opp]) else {
            continue;
        };
        if store.is_parallel(la, lb) && store.is_equal_length(sa, sb) {
            return Some((
                Reason::OnePairParallelAndEqual,
                vec![
                    EntityRef::Line(la),
                    EntityRef::Line(lb),
                    EntityRef::Length(sa),
                    EntityRef::Length(sb),
                ],
            ));
        }
    }
    None
}

fn diagonals_bisect(
    incidence: &IncidenceIndex,
    store: &RelationStore,
    c: [PointId; 4],
) -> Option<(Reason, Vec<EntityRef>)> {
    let m = diagonal_intersection(incidence, c)?;

    let mut halves = Vec::with_capacity(4);
    for (a, b) in [(c[0], c[2]), (c[1], c[3])] {
        let h1 = store.find_length(a, m)?;
        let h2 = store.find_length(m, b)?;
        if !store.is_equal_length(h1, h2) {
            return None;
        }
        halves.push(EntityRef::Length(h1));
        halves.push(EntityRef::Length(h2));
    }
    halves.push(EntityRef::Point(m));
    Some((Reason::DiagonalsBisect, halves))
}

/// The registered intersection point of the two diagonals
fn diagonal_intersection(incidence: &IncidenceIndex, c: [PointId; 4]) -> Option<PointId> {
    let d1 = incidence.common_line(c[0], c[2])?;
    let d2 = incidence.common_line(c[1], c[3])?;
    incidence.common_point(d1, d2)
}

fn side_lines(incidence: &IncidenceIndex, c: [PointId; 4]) -> Option<[LineId; 4]> {
    let mut out = [LineId(0); 4];
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = incidence.common_line(c[k], c[(k + 1) % 4])?;
    }
    Some(out)
}

fn all_sides_one_class(store: &RelationStore, sides: &[Option<LengthId>; 4]) -> bool {
    let (Some(s0), Some(s1), Some(s2), Some(s3)) = (sides[0], sides[1], sides[2], sides[3])
    else {
        return false;
    };
    store.is_equal_length(s0, s1)
        && store.is_equal_length(s1, s2)
        && store.is_equal_length(s2, s3)
}

fn quad_refs(cycle: [PointId; 4]) -> Vec<EntityRef> {
    cycle.into_iter().map(EntityRef::Point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::LengthSymbol;

    /// Parallelogram ABCD in clockwise screen order, with all four side
    /// length symbols constructed but no relations asserted.
    struct Para {
        scene: Scene,
        incidence: IncidenceIndex,
        store: RelationStore,
        cycle: [PointId; 4],
        sides: [LengthId; 4],
        side_lines: [LineId; 4],
    }

    fn para() -> Para {
        let mut scene = Scene::new();
        let a = scene.add_point("A", 0.0, 0.0);
        let b = scene.add_point("B", 4.0, 0.0);
        let c = scene.add_point("C", 6.0, 3.0);
        let d = scene.add_point("D", 2.0, 3.0);
        let cycle = [a, b, c, d];

        let mut incidence = IncidenceIndex::new();
        let mut side_lines = [LineId(0); 4];
        let mut sides = [LengthId(0); 4];
        for k in 0..4 {
            let (p, q) = (cycle[k], cycle[(k + 1) % 4]);
            let line = scene.add_line(p, q);
            incidence.add_point_on_line(p, line);
            incidence.add_point_on_line(q, line);
            side_lines[k] = line;
            sides[k] = scene.add_length(LengthSymbol {
                p1: p,
                p2: q,
                kind: 0,
                on_line: Some(line),
                on_circle: None,
            });
        }

        let mut store = RelationStore::new();
        store.register_scene(&scene);

        Para {
            scene,
            incidence,
            store,
            cycle,
            sides,
            side_lines,
        }
    }

    #[test]
    fn test_opposite_sides_equal_classifies() {
        let mut f = para();
        assert!(
            classify_parallelogram(&f.scene, &f.incidence, &f.store, f.cycle).is_none(),
            "no relations asserted yet"
        );

        f.store.add_equal_lengths(f.sides[0], f.sides[2]);
        f.store.add_equal_lengths(f.sides[1], f.sides[3]);

        let fact = classify_parallelogram(&f.scene, &f.incidence, &f.store, f.cycle)
            .expect("both opposite side pairs equal");
        assert_eq!(fact.reason, Reason::OppositeSidesEqual);
        assert_eq!(
            fact.conclusion,
            Conclusion::Parallelogram(f.cycle, QuadClass::Parallelogram)
        );
    }

    #[test]
    fn test_rhombus_upgrade() {
        let mut f = para();
        for k in 0..3 {
            f.store.add_equal_lengths(f.sides[k], f.sides[k + 1]);
        }

        let fact = classify_parallelogram(&f.scene, &f.incidence, &f.store, f.cycle)
            .expect("all sides equal");
        assert_eq!(
            fact.conclusion,
            Conclusion::Parallelogram(f.cycle, QuadClass::Rhombus)
        );
    }

    #[test]
    fn test_one_pair_parallel_and_equal() {
        let mut f = para();
        f.store.add_parallel_lines(f.side_lines[0], f.side_lines[2]);
        f.store.add_equal_lengths(f.sides[0], f.sides[2]);

        let fact = classify_parallelogram(&f.scene, &f.incidence, &f.store, f.cycle)
            .expect("one pair parallel and equal");
        assert_eq!(fact.reason, Reason::OnePairParallelAndEqual);
    }

    #[test]
    fn test_opposite_sides_parallel_classifies() {
        let mut f = para();
        f.store.add_parallel_lines(f.side_lines[0], f.side_lines[2]);
        f.store.add_parallel_lines(f.side_lines[1], f.side_lines[3]);

        let fact = classify_parallelogram(&f.scene, &f.incidence, &f.store, f.cycle)
            .expect("both opposite side pairs parallel");
        assert_eq!(fact.reason, Reason::OppositeSidesParallel);
    }

    #[test]
    fn test_diagonals_bisect() {
        let mut f = para();
        let m = f.scene.add_point("M", 3.0, 1.5);
        let d1 = f.scene.add_line(f.cycle[0], f.cycle[2]);
        let d2 = f.scene.add_line(f.cycle[1], f.cycle[3]);
        for p in [f.cycle[0], f.cycle[2], m] {
            f.incidence.add_point_on_line(p, d1);
        }
        for p in [f.cycle[1], f.cycle[3], m] {
            f.incidence.add_point_on_line(p, d2);
        }

        let mut halves = Vec::new();
        for (a, b) in [(f.cycle[0], f.cycle[2]), (f.cycle[1], f.cycle[3])] {
            for (p, q) in [(a, m), (m, b)] {
                halves.push(f.scene.add_length(LengthSymbol {
                    p1: p,
                    p2: q,
                    kind: 0,
                    on_line: None,
                    on_circle: None,
                }));
            }
        }
        let mut store = RelationStore::new();
        store.register_scene(&f.scene);
        store.add_equal_lengths(halves[0], halves[1]);
        store.add_equal_lengths(halves[2], halves[3]);

        let fact = classify_parallelogram(&f.scene, &f.incidence, &store, f.cycle)
            .expect("diagonals bisect each other");
        assert_eq!(fact.reason, Reason::DiagonalsBisect);
        assert!(fact.auxiliary.contains(&EntityRef::Point(m)));
    }

    #[test]
    fn test_opposite_side_transfer_uses_committed_record() {
        let mut f = para();
        f.store
            .add_parallelogram(f.cycle, QuadClass::Parallelogram, None);

        let fact = parallelogram_opposite_sides(
            &f.scene,
            &f.incidence,
            &f.store,
            f.sides[1],
            f.sides[3],
            f.cycle,
        )
        .expect("opposite side pair");
        assert_eq!(fact.reason, Reason::ParallelogramOppositeSides);

        assert!(
            parallelogram_opposite_sides(
                &f.scene,
                &f.incidence,
                &f.store,
                f.sides[0],
                f.sides[1],
                f.cycle,
            )
            .is_none(),
            "adjacent sides are not an opposite pair"
        );
    }

    #[test]
    fn test_diagonal_bisection_transfer() {
        let mut f = para();
        let m = f.scene.add_point("M", 3.0, 1.5);
        let d1 = f.scene.add_line(f.cycle[0], f.cycle[2]);
        let d2 = f.scene.add_line(f.cycle[1], f.cycle[3]);
        for p in [f.cycle[0], f.cycle[2], m] {
            f.incidence.add_point_on_line(p, d1);
        }
        for p in [f.cycle[1], f.cycle[3], m] {
            f.incidence.add_point_on_line(p, d2);
        }
        let h1 = f.scene.add_length(LengthSymbol {
            p1: f.cycle[0],
            p2: m,
            kind: 0,
            on_line: None,
            on_circle: None,
        });
        let h2 = f.scene.add_length(LengthSymbol {
            p1: m,
            p2: f.cycle[2],
            kind: 0,
            on_line: None,
            on_circle: None,
        });
        let mut store = RelationStore::new();
        store.register_scene(&f.scene);
        store.add_parallelogram(f.cycle, QuadClass::Parallelogram, None);

        let fact = parallelogram_diagonal_lengths(
            &f.scene,
            &f.incidence,
            &store,
            h1,
            h2,
            f.cycle,
        )
        .expect("halves of one diagonal");
        assert_eq!(fact.reason, Reason::ParallelogramDiagonalBisection);
    }
}
