//! Canonical angle lookup
//!
//! [`find_angle`] resolves three points to a registered angle. It is a
//! lookup, not a constructor: the triple is canonicalized to clockwise ray
//! order, the two connecting lines come from the incidence index, the ±1
//! ray flags from the sign of each ray against the line's unit vector, and
//! the resulting key is searched in the registry.

use super::incidence::IncidenceIndex;
use super::store::RelationStore;
use crate::ir::{sign, AngleId, AngleKey, PointId, Scene};

/// Canonicalize an angle triple `(first, vertex, second)` to clockwise order
///
/// Returns `None` for degenerate input (repeated points or collinear rays).
pub fn clockwise_angle_points(
    scene: &Scene,
    points: [PointId; 3],
) -> Option<(PointId, PointId, PointId)> {
    let [b, v, a] = points;
    if b == a || b == v || a == v {
        return None;
    }
    let rb = scene.pos(b) - scene.pos(v);
    let ra = scene.pos(a) - scene.pos(v);
    match sign(rb.cross_z(ra)) {
        1 => Some((b, v, a)),
        -1 => Some((a, v, b)),
        _ => None,
    }
}

/// Compute the canonical key for the angle described by three points
///
/// `None` when the triple is degenerate or either connecting line is
/// missing from the incidence index.
pub fn angle_key_of(
    scene: &Scene,
    incidence: &IncidenceIndex,
    points: [PointId; 3],
) -> Option<AngleKey> {
    let (first, vertex, second) = clockwise_angle_points(scene, points)?;

    let line_a = incidence.common_line(vertex, first)?;
    let line_b = incidence.common_line(vertex, second)?;

    let dir_a = sign(scene.line(line_a).e.dot(scene.pos(first) - scene.pos(vertex)));
    let dir_b = sign(scene.line(line_b).e.dot(scene.pos(second) - scene.pos(vertex)));
    if dir_a == 0 || dir_b == 0 {
        return None;
    }

    Some(AngleKey {
        line_a,
        dir_a,
        line_b,
        dir_b,
        vertex,
    })
}

/// Look up the registered angle described by three points, in any order
pub fn find_angle(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    points: [PointId; 3],
) -> Option<AngleId> {
    let key = angle_key_of(scene, incidence, points)?;
    store.lookup_angle(&key)
}

/// The registered interior angle of a polygon at one of its vertices
///
/// Neighbors are taken from the cycle as given; `find_angle` removes any
/// orientation dependence.
pub fn polygon_angle_at(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    cycle: &[PointId],
    vertex: PointId,
) -> Option<AngleId> {
    let n = cycle.len();
    let i = cycle.iter().position(|p| *p == vertex)?;
    let prev = cycle[(i + n - 1) % n];
    let next = cycle[(i + 1) % n];
    find_angle(scene, incidence, store, [prev, vertex, next])
}

/// Interior angles of a polygon, one per vertex, in clockwise cycle order
///
/// Panics when any interior angle is missing from the registry: a
/// well-formed polygon has all of its interior angles constructed.
pub fn find_angles_in_polygon(
    scene: &Scene,
    incidence: &IncidenceIndex,
    store: &RelationStore,
    points: &[PointId],
) -> Vec<(PointId, AngleId)> {
    let cycle = scene.clockwise(points);
    let n = cycle.len();

    (0..n)
        .map(|i| {
            let vertex = cycle[i];
            let angle = polygon_angle_at(scene, incidence, store, &cycle, vertex)
                .unwrap_or_else(|| {
                    panic!(
                        "polygon is missing its interior angle at {}",
                        scene.label(vertex)
                    )
                });
            (vertex, angle)
        })
        .collect()
}
