//! The relation store
//!
//! Central mutable state of the engine, scoped to the active scene. Holds
//! the bipartite partitions (parallel/perpendicular lines, equal/
//! supplementary angles), the flat equivalence classes (lengths, circle
//! radii), triangle correspondence groups, the isosceles list, committed
//! parallelogram classifications, and the canonical angle registry plus the
//! point-pair → length-symbol index.
//!
//! All writes go through the `add_*` entry points; nothing else mutates the
//! underlying sets. The store is cleared and fully rebuilt from the scene
//! (plus a statement replay) whenever a full recompute is needed.

use super::classes::EqClasses;
use super::groups::CorrespondenceGroups;
use super::pairset::PairSets;
use crate::fact::{QuadClass, Reason};
use crate::ir::{
    same_point_set3, AngleId, AngleKey, CircleId, LengthId, LineId, PointId, Scene,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// A committed quadrilateral classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelogramRecord {
    /// Canonical clockwise point cycle
    pub points: [PointId; 4],
    pub class: QuadClass,
    /// The criterion that justified the classification; `None` for a direct
    /// user assertion.
    pub reason: Option<Reason>,
}

/// Process-wide store of derived equivalence relations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationStore {
    lines: PairSets<LineId>,
    angles: PairSets<AngleId>,
    right_angles: BTreeSet<AngleId>,
    lengths: EqClasses<LengthId>,
    circles: EqClasses<CircleId>,
    congruent: CorrespondenceGroups,
    similar: CorrespondenceGroups,
    isosceles: Vec<[PointId; 3]>,
    parallelograms: Vec<ParallelogramRecord>,
    angle_registry: FxHashMap<AngleKey, AngleId>,
    length_index: FxHashMap<(PointId, PointId), LengthId>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every relation and registry entry
    pub fn clear(&mut self) {
        self.lines.clear();
        self.angles.clear();
        self.right_angles.clear();
        self.lengths.clear();
        self.circles.clear();
        self.congruent.clear();
        self.similar.clear();
        self.isosceles.clear();
        self.parallelograms.clear();
        self.angle_registry.clear();
        self.length_index.clear();
    }

    // ---- structural registration -------------------------------------

    /// Register one angle's canonical key and tick-mark assertions
    ///
    /// Equal nonzero marks assert equal angles; mark 0 joins the dedicated
    /// right-angle set. Re-registering the same id is a no-op; a second id
    /// under the same key panics.
    pub fn register_angle(&mut self, scene: &Scene, id: AngleId) {
        let angle = scene.angle(id);
        let key = angle.key();
        if let Some(prev) = self.angle_registry.insert(key, id) {
            assert!(
                prev == id,
                "angle key {key:?} registered twice: {prev} and {id}"
            );
            return;
        }
        debug!(%id, vertex = %angle.vertex, "registered angle");

        if angle.mark == 0 {
            self.right_angles.insert(id);
        } else {
            // Tie to the first earlier angle carrying the same tick group.
            let mark = angle.mark;
            let earlier = scene
                .angles()
                .find(|(other, a)| *other != id && a.mark == mark && self.is_registered(*other));
            if let Some((other, _)) = earlier {
                self.angles.add_same(other, id);
            }
        }
    }

    /// Register one length symbol's point-pair index and tick assertions
    ///
    /// Equal nonzero kinds assert equal lengths; two radii of one circle
    /// are equal regardless of kind.
    pub fn register_length(&mut self, scene: &Scene, id: LengthId) {
        let length = scene.length(id);
        let key = pair_key(length.p1, length.p2);
        if let Some(prev) = self.length_index.insert(key, id) {
            assert!(
                prev == id,
                "point pair {key:?} carries two length symbols: {prev} and {id}"
            );
            return;
        }
        debug!(%id, "registered length symbol");

        if length.kind > 0 {
            let kind = length.kind;
            let earlier = scene.lengths().find(|(other, l)| {
                *other != id && l.kind == kind && self.length_index.values().any(|v| v == other)
            });
            if let Some((other, _)) = earlier {
                self.lengths.add_equal(other, id);
            }
        }
        if let Some(circle) = length.on_circle {
            let earlier = scene.lengths().find(|(other, l)| {
                *other != id
                    && l.on_circle == Some(circle)
                    && self.length_index.values().any(|v| v == other)
            });
            if let Some((other, _)) = earlier {
                self.lengths.add_equal(other, id);
            }
        }
    }

    /// Seed the store from every shape in the scene, in construction order
    ///
    /// This is the structural half of a full rebuild; the caller then
    /// replays every committed statement.
    pub fn register_scene(&mut self, scene: &Scene) {
        for (id, _) in scene.angles() {
            self.register_angle(scene, id);
        }
        for (id, _) in scene.lengths() {
            self.register_length(scene, id);
        }
    }

    fn is_registered(&self, id: AngleId) -> bool {
        self.angle_registry.values().any(|v| *v == id)
    }

    /// Look up an angle by its canonical key
    pub fn lookup_angle(&self, key: &AngleKey) -> Option<AngleId> {
        self.angle_registry.get(key).copied()
    }

    /// Look up the length symbol between two points, in either order
    pub fn find_length(&self, a: PointId, b: PointId) -> Option<LengthId> {
        self.length_index.get(&pair_key(a, b)).copied()
    }

    // ---- registration (statement commits) ----------------------------

    pub fn add_parallel_lines(&mut self, a: LineId, b: LineId) {
        debug!(%a, %b, "add parallel");
        self.lines.add_same(a, b);
    }

    pub fn add_perpendicular_lines(&mut self, a: LineId, b: LineId) {
        debug!(%a, %b, "add perpendicular");
        self.lines.add_opposite(a, b);
    }

    pub fn add_equal_angles(&mut self, a: AngleId, b: AngleId) {
        debug!(%a, %b, "add equal angles");
        self.angles.add_same(a, b);
        // Equality with a right angle makes both right.
        if self.right_angles.contains(&a) || self.right_angles.contains(&b) {
            self.right_angles.insert(a);
            self.right_angles.insert(b);
        }
    }

    pub fn add_supplementary_angles(&mut self, a: AngleId, b: AngleId) {
        debug!(%a, %b, "add supplementary angles");
        self.angles.add_opposite(a, b);
    }

    pub fn add_equal_lengths(&mut self, a: LengthId, b: LengthId) {
        debug!(%a, %b, "add equal lengths");
        self.lengths.add_equal(a, b);
    }

    pub fn add_equal_circles(&mut self, a: CircleId, b: CircleId) {
        debug!(%a, %b, "add equal circles");
        self.circles.add_equal(a, b);
    }

    pub fn add_congruent_triangles(&mut self, t1: [PointId; 3], t2: [PointId; 3]) {
        debug!(?t1, ?t2, "add congruent triangles");
        self.congruent.add(t1, t2);
    }

    pub fn add_similar_triangles(&mut self, t1: [PointId; 3], t2: [PointId; 3]) {
        debug!(?t1, ?t2, "add similar triangles");
        self.similar.add(t1, t2);
    }

    /// Record a triangle known isosceles, apex at `points[0]`
    pub fn add_isosceles_triangle(&mut self, points: [PointId; 3]) {
        if !self.isosceles.contains(&points) {
            debug!(?points, "add isosceles triangle");
            self.isosceles.push(points);
        }
    }

    /// Record a committed quadrilateral classification
    ///
    /// A later, stronger classification (rhombus over parallelogram)
    /// upgrades the existing record for the same point set.
    pub fn add_parallelogram(
        &mut self,
        points: [PointId; 4],
        class: QuadClass,
        reason: Option<Reason>,
    ) {
        if let Some(rec) = self
            .parallelograms
            .iter_mut()
            .find(|r| same_point_set4(r.points, points))
        {
            if class > rec.class {
                rec.class = class;
                rec.reason = reason;
            }
            return;
        }
        debug!(?points, ?class, "add parallelogram");
        self.parallelograms.push(ParallelogramRecord {
            points,
            class,
            reason,
        });
    }

    // ---- queries ------------------------------------------------------

    pub fn is_parallel(&self, a: LineId, b: LineId) -> bool {
        self.lines.are_same(a, b)
    }

    pub fn is_perpendicular(&self, a: LineId, b: LineId) -> bool {
        self.lines.are_opposite(a, b)
    }

    /// True when the angles are provably equal
    ///
    /// Two right angles are equal even without a partition link.
    pub fn is_equal_angle(&self, a: AngleId, b: AngleId) -> bool {
        a == b
            || self.angles.are_same(a, b)
            || (self.is_right_angle(a) && self.is_right_angle(b))
    }

    pub fn is_supplementary(&self, a: AngleId, b: AngleId) -> bool {
        self.angles.are_opposite(a, b)
    }

    /// True when the angle is right, directly or via equality closure
    pub fn is_right_angle(&self, a: AngleId) -> bool {
        self.right_angles.contains(&a)
            || self
                .right_angles
                .iter()
                .any(|r| self.angles.are_same(a, *r))
    }

    pub fn is_equal_length(&self, a: LengthId, b: LengthId) -> bool {
        self.lengths.are_equal(a, b)
    }

    pub fn are_equal_circle_arcs(&self, a: CircleId, b: CircleId) -> bool {
        self.circles.are_equal(a, b)
    }

    pub fn are_congruent_triangles(&self, t1: [PointId; 3], t2: [PointId; 3]) -> bool {
        self.congruent.contains_pair(t1, t2)
    }

    pub fn are_similar_triangles(&self, t1: [PointId; 3], t2: [PointId; 3]) -> bool {
        self.similar.contains_pair(t1, t2)
    }

    /// The recorded isosceles ordering for this point set, if any
    pub fn isosceles_record(&self, points: [PointId; 3]) -> Option<[PointId; 3]> {
        self.isosceles
            .iter()
            .find(|t| same_point_set3(**t, points))
            .copied()
    }

    /// The committed classification covering this point set, if any
    pub fn parallelogram_record(&self, points: [PointId; 4]) -> Option<&ParallelogramRecord> {
        self.parallelograms
            .iter()
            .find(|r| same_point_set4(r.points, points))
    }

    /// True when the four points form a committed parallelogram
    pub fn is_parallelogram_points(&self, points: [PointId; 4]) -> bool {
        self.parallelogram_record(points).is_some()
    }

    /// All committed parallelogram classifications
    pub fn parallelograms(&self) -> &[ParallelogramRecord] {
        &self.parallelograms
    }

    /// All recorded isosceles triangles, apex first
    pub fn isosceles_list(&self) -> &[[PointId; 3]] {
        &self.isosceles
    }

    /// Congruent-triangle correspondence groups
    pub fn congruent_groups(&self) -> &CorrespondenceGroups {
        &self.congruent
    }

    /// Similar-triangle correspondence groups
    pub fn similar_groups(&self) -> &CorrespondenceGroups {
        &self.similar
    }
}

fn pair_key(a: PointId, b: PointId) -> (PointId, PointId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn same_point_set4(a: [PointId; 4], b: [PointId; 4]) -> bool {
    let mut a = a;
    let mut b = b;
    a.sort();
    b.sort();
    a == b
}
