//! Typed identifiers for geometric entities
//!
//! Every shape owned by a [`Scene`](crate::ir::Scene) is referred to by a
//! newtype id (its index in the scene's arena). Identity is always by id:
//! two `AbstractLine`s through the same two points are still distinct lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// Identifier for an abstract (infinite) line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u32);

/// Identifier for a circle arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircleId(pub u32);

/// Identifier for an angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AngleId(pub u32);

/// Identifier for a length symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LengthId(pub u32);

/// Identifier for a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

/// Identifier for a quadrilateral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuadId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl fmt::Display for AngleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

impl fmt::Display for LengthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Display for QuadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Closed reference to any geometric entity
///
/// Used for the evidence lists attached to derived facts. Rules match on
/// this exhaustively; there is no open-ended dynamic dispatch on shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityRef {
    Point(PointId),
    Line(LineId),
    Circle(CircleId),
    Angle(AngleId),
    Length(LengthId),
    Triangle(TriangleId),
    Quad(QuadId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Point(id) => write!(f, "{id}"),
            EntityRef::Line(id) => write!(f, "{id}"),
            EntityRef::Circle(id) => write!(f, "{id}"),
            EntityRef::Angle(id) => write!(f, "{id}"),
            EntityRef::Length(id) => write!(f, "{id}"),
            EntityRef::Triangle(id) => write!(f, "{id}"),
            EntityRef::Quad(id) => write!(f, "{id}"),
        }
    }
}

impl From<PointId> for EntityRef {
    fn from(id: PointId) -> Self {
        EntityRef::Point(id)
    }
}

impl From<LineId> for EntityRef {
    fn from(id: LineId) -> Self {
        EntityRef::Line(id)
    }
}

impl From<CircleId> for EntityRef {
    fn from(id: CircleId) -> Self {
        EntityRef::Circle(id)
    }
}

impl From<AngleId> for EntityRef {
    fn from(id: AngleId) -> Self {
        EntityRef::Angle(id)
    }
}

impl From<LengthId> for EntityRef {
    fn from(id: LengthId) -> Self {
        EntityRef::Length(id)
    }
}
