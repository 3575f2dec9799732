//! Incidence index
//!
//! Bidirectional lookup between points and the lines/circles they lie on.
//! Registration is idempotent (add-to-set); the derived queries are
//! "common line of two points" and "common point of two lines". More than
//! one match violates the invariant that a line is identified by its two
//! incidence sets, and panics.

use crate::ir::{CircleId, LineId, PointId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Point ↔ line/circle incidence registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidenceIndex {
    point_lines: FxHashMap<PointId, BTreeSet<LineId>>,
    point_circles: FxHashMap<PointId, BTreeSet<CircleId>>,
    circle_centers: FxHashMap<CircleId, PointId>,
}

impl IncidenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point as lying on a line (idempotent)
    pub fn add_point_on_line(&mut self, point: PointId, line: LineId) {
        self.point_lines.entry(point).or_default().insert(line);
    }

    /// Register a point as lying on a circle (idempotent)
    pub fn add_point_on_circle(&mut self, point: PointId, circle: CircleId) {
        self.point_circles.entry(point).or_default().insert(circle);
    }

    /// Register the center of a circle
    ///
    /// Panics when the circle already has a different center.
    pub fn add_center_of_circle(&mut self, circle: CircleId, center: PointId) {
        if let Some(prev) = self.circle_centers.insert(circle, center) {
            assert!(
                prev == center,
                "circle {circle} registered with two centers: {prev} and {center}"
            );
        }
    }

    /// The unique line through both points, if any
    ///
    /// Panics on more than one match: two distinct lines through the same
    /// two points break the incidence invariant.
    pub fn common_line(&self, a: PointId, b: PointId) -> Option<LineId> {
        let la = self.point_lines.get(&a)?;
        let lb = self.point_lines.get(&b)?;
        let mut common = la.intersection(lb);

        let first = common.next()?;
        assert!(
            common.next().is_none(),
            "points {a} and {b} lie on more than one common line"
        );
        Some(*first)
    }

    /// The unique registered point on both lines, if any
    pub fn common_point(&self, l1: LineId, l2: LineId) -> Option<PointId> {
        let mut found: Option<PointId> = None;
        // Deterministic scan order: FxHashMap iteration order is arbitrary.
        let mut points: Vec<PointId> = self.point_lines.keys().copied().collect();
        points.sort();

        for p in points {
            let lines = &self.point_lines[&p];
            if lines.contains(&l1) && lines.contains(&l2) {
                assert!(
                    found.is_none(),
                    "lines {l1} and {l2} share more than one registered point"
                );
                found = Some(p);
            }
        }
        found
    }

    /// All registered points on a line, in id order
    pub fn points_on_line(&self, line: LineId) -> Vec<PointId> {
        let mut out: Vec<PointId> = self
            .point_lines
            .iter()
            .filter(|(_, lines)| lines.contains(&line))
            .map(|(p, _)| *p)
            .collect();
        out.sort();
        out
    }

    pub fn is_point_on_line(&self, point: PointId, line: LineId) -> bool {
        self.point_lines
            .get(&point)
            .is_some_and(|s| s.contains(&line))
    }

    pub fn is_point_on_circle(&self, point: PointId, circle: CircleId) -> bool {
        self.point_circles
            .get(&point)
            .is_some_and(|s| s.contains(&circle))
    }

    /// The registered center of a circle
    pub fn center_of(&self, circle: CircleId) -> Option<PointId> {
        self.circle_centers.get(&circle).copied()
    }

    pub fn clear(&mut self) {
        self.point_lines.clear();
        self.point_circles.clear();
        self.circle_centers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_line() {
        let mut idx = IncidenceIndex::new();
        let (a, b, c) = (PointId(0), PointId(1), PointId(2));
        let (l1, l2) = (LineId(0), LineId(1));

        idx.add_point_on_line(a, l1);
        idx.add_point_on_line(b, l1);
        idx.add_point_on_line(b, l2);
        idx.add_point_on_line(c, l2);

        assert_eq!(idx.common_line(a, b), Some(l1));
        assert_eq!(idx.common_line(b, c), Some(l2));
        assert_eq!(idx.common_line(a, c), None);
    }

    #[test]
    #[should_panic(expected = "more than one common line")]
    fn test_two_common_lines_panic() {
        let mut idx = IncidenceIndex::new();
        let (a, b) = (PointId(0), PointId(1));

        for l in [LineId(0), LineId(1)] {
            idx.add_point_on_line(a, l);
            idx.add_point_on_line(b, l);
        }
        idx.common_line(a, b);
    }

    #[test]
    fn test_common_point() {
        let mut idx = IncidenceIndex::new();
        let v = PointId(5);
        let (l1, l2) = (LineId(0), LineId(1));

        idx.add_point_on_line(v, l1);
        idx.add_point_on_line(v, l2);
        idx.add_point_on_line(PointId(6), l1);

        assert_eq!(idx.common_point(l1, l2), Some(v));
        assert_eq!(idx.common_point(l1, LineId(9)), None);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut idx = IncidenceIndex::new();
        let p = PointId(0);
        let l = LineId(0);

        idx.add_point_on_line(p, l);
        idx.add_point_on_line(p, l);

        assert_eq!(idx.points_on_line(l), vec![p]);
    }

    #[test]
    fn test_circle_registration() {
        let mut idx = IncidenceIndex::new();
        let c = CircleId(0);
        let center = PointId(0);
        let rim = PointId(1);

        idx.add_center_of_circle(c, center);
        idx.add_center_of_circle(c, center); // no-op
        idx.add_point_on_circle(rim, c);

        assert_eq!(idx.center_of(c), Some(center));
        assert!(idx.is_point_on_circle(rim, c));
        assert!(!idx.is_point_on_circle(center, c));
    }

    #[test]
    #[should_panic(expected = "two centers")]
    fn test_conflicting_center_panics() {
        let mut idx = IncidenceIndex::new();
        idx.add_center_of_circle(CircleId(0), PointId(0));
        idx.add_center_of_circle(CircleId(0), PointId(1));
    }
}
