//! Shape arena
//!
//! The scene owns every shape of the active construction. Ids are arena
//! indices; the relation store only ever holds ids, never shape copies.

use super::coords::{sign, Vec2};
use super::shapes::{AbstractLine, Angle, CircleArc, LengthSymbol, Point, Quadrilateral, Triangle};
use super::symbols::{AngleId, CircleId, LengthId, LineId, PointId, QuadId, TriangleId};
use serde::{Deserialize, Serialize};

/// Arena of all shapes in the active construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    points: Vec<Point>,
    lines: Vec<AbstractLine>,
    circles: Vec<CircleArc>,
    angles: Vec<Angle>,
    lengths: Vec<LengthSymbol>,
    triangles: Vec<Triangle>,
    quads: Vec<Quadrilateral>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled point at a position
    pub fn add_point(&mut self, label: impl Into<String>, x: f64, y: f64) -> PointId {
        let id = PointId(self.points.len() as u32);
        self.points.push(Point {
            pos: Vec2::new(x, y),
            label: label.into(),
        });
        id
    }

    /// Add a line through two existing points
    ///
    /// The unit direction runs from `p1` towards `p2`. Panics if the points
    /// coincide.
    pub fn add_line(&mut self, p1: PointId, p2: PointId) -> LineId {
        let e = (self.pos(p2) - self.pos(p1)).unit();
        let id = LineId(self.lines.len() as u32);
        self.lines.push(AbstractLine { p1, p2, e });
        id
    }

    /// Add a circle centered at an existing point
    pub fn add_circle(&mut self, center: PointId, radius: f64) -> CircleId {
        let id = CircleId(self.circles.len() as u32);
        self.circles.push(CircleArc { center, radius });
        id
    }

    /// Add an already-canonicalized angle record
    ///
    /// Construction code should go through
    /// [`ProofSession::add_angle`](crate::session::ProofSession::add_angle),
    /// which computes the canonical key from three points.
    pub fn add_angle(&mut self, angle: Angle) -> AngleId {
        let id = AngleId(self.angles.len() as u32);
        self.angles.push(angle);
        id
    }

    /// Add a length symbol
    pub fn add_length(&mut self, length: LengthSymbol) -> LengthId {
        let id = LengthId(self.lengths.len() as u32);
        self.lengths.push(length);
        id
    }

    /// Add an ordered triangle
    pub fn add_triangle(&mut self, points: [PointId; 3]) -> TriangleId {
        let id = TriangleId(self.triangles.len() as u32);
        self.triangles.push(Triangle { points });
        id
    }

    /// Add an ordered quadrilateral
    pub fn add_quad(&mut self, points: [PointId; 4]) -> QuadId {
        let id = QuadId(self.quads.len() as u32);
        self.quads.push(Quadrilateral { points });
        id
    }

    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.0 as usize]
    }

    pub fn line(&self, id: LineId) -> &AbstractLine {
        &self.lines[id.0 as usize]
    }

    pub fn circle(&self, id: CircleId) -> &CircleArc {
        &self.circles[id.0 as usize]
    }

    pub fn angle(&self, id: AngleId) -> &Angle {
        &self.angles[id.0 as usize]
    }

    pub fn length(&self, id: LengthId) -> &LengthSymbol {
        &self.lengths[id.0 as usize]
    }

    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.0 as usize]
    }

    pub fn quad(&self, id: QuadId) -> &Quadrilateral {
        &self.quads[id.0 as usize]
    }

    /// Position of a point
    pub fn pos(&self, id: PointId) -> Vec2 {
        self.points[id.0 as usize].pos
    }

    /// Display label of a point
    pub fn label(&self, id: PointId) -> &str {
        &self.points[id.0 as usize].label
    }

    /// Move a point (identity is unchanged)
    pub fn set_pos(&mut self, id: PointId, pos: Vec2) {
        self.points[id.0 as usize].pos = pos;
    }

    pub fn angles(&self) -> impl Iterator<Item = (AngleId, &Angle)> {
        self.angles
            .iter()
            .enumerate()
            .map(|(i, a)| (AngleId(i as u32), a))
    }

    pub fn lengths(&self) -> impl Iterator<Item = (LengthId, &LengthSymbol)> {
        self.lengths
            .iter()
            .enumerate()
            .map(|(i, l)| (LengthId(i as u32), l))
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Twice the signed area of a point cycle (shoelace)
    ///
    /// In screen coordinates a visually clockwise cycle has positive sign.
    pub fn signed_area(&self, points: &[PointId]) -> f64 {
        let n = points.len();
        let mut sum = 0.0;
        for i in 0..n {
            let p = self.pos(points[i]);
            let q = self.pos(points[(i + 1) % n]);
            sum += p.cross_z(q);
        }
        sum
    }

    /// Reorder a point cycle to canonical clockwise orientation
    ///
    /// The first point stays first; a counterclockwise cycle is reversed.
    /// A degenerate (zero-area) cycle is returned unchanged.
    pub fn clockwise(&self, points: &[PointId]) -> Vec<PointId> {
        if sign(self.signed_area(points)) >= 0 {
            return points.to_vec();
        }
        let mut out = Vec::with_capacity(points.len());
        out.push(points[0]);
        out.extend(points[1..].iter().rev().copied());
        out
    }

    /// Clockwise canonicalization of a triangle
    pub fn clockwise3(&self, points: [PointId; 3]) -> [PointId; 3] {
        let v = self.clockwise(&points);
        [v[0], v[1], v[2]]
    }

    /// Clockwise canonicalization of a quadrilateral
    pub fn clockwise4(&self, points: [PointId; 4]) -> [PointId; 4] {
        let v = self.clockwise(&points);
        [v[0], v[1], v[2], v[3]]
    }
}
