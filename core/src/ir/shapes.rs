//! Geometric shape records
//!
//! These are the values the engine reasons about. Positions and direction
//! vectors are computed by the construction layer; the relation store and
//! the rule library only ever read them.

use super::coords::Vec2;
use super::symbols::{CircleId, LineId, PointId};
use serde::{Deserialize, Serialize};

/// A named point with a mutable position and immutable identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub pos: Vec2,
    pub label: String,
}

/// An infinite line through two defining points
///
/// `e` is the unit direction from `p1` towards `p2`. Two lines are the same
/// line only when their ids are equal; geometric collinearity never merges
/// two `AbstractLine`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractLine {
    pub p1: PointId,
    pub p2: PointId,
    pub e: Vec2,
}

/// A circle (or arc of one) with a center point and radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleArc {
    pub center: PointId,
    pub radius: f64,
}

/// Canonical key of an angle: two (line, direction) rays and a vertex
///
/// The direction flags are ±1 multipliers on the line's unit vector. A key
/// is always stored in clockwise-canonical ray order, so equal geometric
/// angles built from the same lines produce equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AngleKey {
    pub line_a: LineId,
    pub dir_a: i8,
    pub line_b: LineId,
    pub dir_b: i8,
    pub vertex: PointId,
}

/// An angle at the unique common point of two lines
///
/// `mark` is the tick-mark group drawn on the arc: 0 means a right angle,
/// any value ≥ 1 groups angles the user asserted equal. The arc's drawing
/// direction is a rendering concern and deliberately absent here; only the
/// ±1 ray flags enter the sign algebra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub line_a: LineId,
    pub dir_a: i8,
    pub line_b: LineId,
    pub dir_b: i8,
    pub vertex: PointId,
    pub mark: u32,
}

impl Angle {
    /// The registry key for this angle
    pub fn key(&self) -> AngleKey {
        AngleKey {
            line_a: self.line_a,
            dir_a: self.dir_a,
            line_b: self.line_b,
            dir_b: self.dir_b,
            vertex: self.vertex,
        }
    }

    /// The two lines forming this angle
    pub fn lines(&self) -> [LineId; 2] {
        [self.line_a, self.line_b]
    }

    /// Whether the angle is drawn with the right-angle mark
    pub fn is_right(&self) -> bool {
        self.mark == 0
    }

    /// Whether `line` is one of the two lines of this angle
    pub fn uses_line(&self, line: LineId) -> bool {
        self.line_a == line || self.line_b == line
    }

    /// Given one of the two lines, return its ±1 ray flag
    pub fn dir_on(&self, line: LineId) -> Option<i8> {
        if self.line_a == line {
            Some(self.dir_a)
        } else if self.line_b == line {
            Some(self.dir_b)
        } else {
            None
        }
    }

    /// Given one of the two lines, return the other one
    pub fn other_line(&self, line: LineId) -> Option<LineId> {
        if self.line_a == line {
            Some(self.line_b)
        } else if self.line_b == line {
            Some(self.line_a)
        } else {
            None
        }
    }
}

/// A tick-marked segment between two points
///
/// The symbol, not the numeric distance, is the unit of length-equality
/// reasoning. `kind` is the tick style; equal nonzero kinds assert equal
/// lengths. `on_line` is set when the endpoints are collinear with a known
/// line, `on_circle` when the segment is a radius of that circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthSymbol {
    pub p1: PointId,
    pub p2: PointId,
    pub kind: u32,
    pub on_line: Option<LineId>,
    pub on_circle: Option<CircleId>,
}

impl LengthSymbol {
    /// Endpoints in construction order
    pub fn points(&self) -> [PointId; 2] {
        [self.p1, self.p2]
    }

    /// Endpoints as an order-independent (sorted) pair
    pub fn point_set(&self) -> [PointId; 2] {
        if self.p1 <= self.p2 {
            [self.p1, self.p2]
        } else {
            [self.p2, self.p1]
        }
    }
}

/// An ordered triangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [PointId; 3],
}

/// An ordered quadrilateral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub points: [PointId; 4],
}

/// True when two triangles cover the same three points, in any order
pub fn same_point_set3(a: [PointId; 3], b: [PointId; 3]) -> bool {
    let mut a = a;
    let mut b = b;
    a.sort();
    b.sort();
    a == b
}

/// True when two point pairs cover the same two points, in any order
pub fn same_point_set2(a: [PointId; 2], b: [PointId; 2]) -> bool {
    (a[0] == b[0] && a[1] == b[1]) || (a[0] == b[1] && a[1] == b[0])
}
