//! Facts, reason codes, and narration
//!
//! A [`Fact`] is a conclusion (what is now known), a [`Reason`] (which
//! theorem justifies it), and the auxiliary shapes cited as evidence. Rules
//! produce facts; the statement layer persists them and writes their
//! conclusions back into the relation store.

use crate::ir::{
    AngleId, CircleId, EntityRef, LengthId, LineId, PointId, Scene,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification levels for quadrilaterals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuadClass {
    Parallelogram,
    Rhombus,
}

impl QuadClass {
    /// True when `self` implies `other` (a rhombus is a parallelogram)
    pub fn implies(&self, other: QuadClass) -> bool {
        *self >= other
    }
}

impl fmt::Display for QuadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadClass::Parallelogram => write!(f, "parallelogram"),
            QuadClass::Rhombus => write!(f, "rhombus"),
        }
    }
}

/// Theorem tag justifying a derived fact
///
/// Discriminants are stable integer codes, grouped by the kind of fact they
/// justify; they appear in serialized documents and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Reason {
    // Equal angles
    VerticalAngles = 10,
    ParallelLineAngles = 11,
    AngleBisector = 12,
    CongruentTriangleAngles = 13,
    SimilarTriangleAngles = 14,
    IsoscelesBaseAngles = 15,
    ParallelogramOppositeAngles = 16,
    RightAngles = 17,

    // Equal lengths
    CongruentTriangleSides = 30,
    ParallelogramOppositeSides = 31,
    ParallelogramDiagonalBisection = 32,
    EqualRadii = 33,

    // Triangle congruence
    SideSideSide = 50,
    SideAngleSide = 51,
    AngleSideAngle = 52,

    // Triangle similarity
    AngleAngle = 60,

    // Parallelogram classification criteria
    OppositeSidesEqual = 70,
    OppositeSidesParallel = 71,
    OppositeAnglesEqual = 72,
    OnePairParallelAndEqual = 73,
    DiagonalsBisect = 74,

    // Parallel lines
    ParallelogramSides = 80,
    TransversalAngles = 81,

    // Isosceles
    EqualLegs = 90,
}

/// Kind of conclusion a reason can justify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonFamily {
    EqualAngles,
    EqualLengths,
    Congruence,
    Similarity,
    QuadClassification,
    ParallelLines,
    Isosceles,
}

impl Reason {
    /// Stable integer code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// The kind of conclusion this reason justifies
    pub fn family(&self) -> ReasonFamily {
        use Reason::*;
        match self {
            VerticalAngles | ParallelLineAngles | AngleBisector | CongruentTriangleAngles
            | SimilarTriangleAngles | IsoscelesBaseAngles | ParallelogramOppositeAngles
            | RightAngles => ReasonFamily::EqualAngles,
            CongruentTriangleSides | ParallelogramOppositeSides
            | ParallelogramDiagonalBisection | EqualRadii => ReasonFamily::EqualLengths,
            SideSideSide | SideAngleSide | AngleSideAngle => ReasonFamily::Congruence,
            AngleAngle => ReasonFamily::Similarity,
            OppositeSidesEqual | OppositeSidesParallel | OppositeAnglesEqual
            | OnePairParallelAndEqual | DiagonalsBisect => ReasonFamily::QuadClassification,
            ParallelogramSides | TransversalAngles => ReasonFamily::ParallelLines,
            EqualLegs => ReasonFamily::Isosceles,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::VerticalAngles => "vertical angles",
            Reason::ParallelLineAngles => "angles at parallel lines",
            Reason::AngleBisector => "angle bisector",
            Reason::CongruentTriangleAngles => "corresponding angles of congruent triangles",
            Reason::SimilarTriangleAngles => "corresponding angles of similar triangles",
            Reason::IsoscelesBaseAngles => "base angles of an isosceles triangle",
            Reason::ParallelogramOppositeAngles => "opposite angles of a parallelogram",
            Reason::RightAngles => "both are right angles",
            Reason::CongruentTriangleSides => "corresponding sides of congruent triangles",
            Reason::ParallelogramOppositeSides => "opposite sides of a parallelogram",
            Reason::ParallelogramDiagonalBisection => {
                "diagonals of a parallelogram bisect each other"
            }
            Reason::EqualRadii => "radii of equal circles",
            Reason::SideSideSide => "three pairs of equal sides",
            Reason::SideAngleSide => "two sides and the included angle",
            Reason::AngleSideAngle => "two angles and the included side",
            Reason::AngleAngle => "two pairs of equal angles",
            Reason::OppositeSidesEqual => "both pairs of opposite sides are equal",
            Reason::OppositeSidesParallel => "both pairs of opposite sides are parallel",
            Reason::OppositeAnglesEqual => "both pairs of opposite angles are equal",
            Reason::OnePairParallelAndEqual => "one pair of sides is parallel and equal",
            Reason::DiagonalsBisect => "the diagonals bisect each other",
            Reason::ParallelogramSides => "opposite sides of a parallelogram",
            Reason::TransversalAngles => "equal angles at a transversal",
            Reason::EqualLegs => "two legs are equal",
        };
        f.write_str(text)
    }
}

/// The conclusion of a fact: what is being asserted about which entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    EqualAngles(AngleId, AngleId),
    SupplementaryAngles(AngleId, AngleId),
    EqualLengths(LengthId, LengthId),
    EqualCircles(CircleId, CircleId),
    ParallelLines(LineId, LineId),
    PerpendicularLines(LineId, LineId),
    CongruentTriangles([PointId; 3], [PointId; 3]),
    SimilarTriangles([PointId; 3], [PointId; 3]),
    IsoscelesTriangle([PointId; 3]),
    Parallelogram([PointId; 4], QuadClass),
}

impl Conclusion {
    /// Canonical form for equality comparison
    ///
    /// Symmetric pairs are sorted. Parallelogram points are sorted as well:
    /// the canonical clockwise cycle is recomputed by whoever needs it, so
    /// only set identity matters for comparisons.
    pub fn normalize(self) -> Self {
        use Conclusion::*;
        match self {
            EqualAngles(a, b) if a > b => EqualAngles(b, a),
            SupplementaryAngles(a, b) if a > b => SupplementaryAngles(b, a),
            EqualLengths(a, b) if a > b => EqualLengths(b, a),
            EqualCircles(a, b) if a > b => EqualCircles(b, a),
            ParallelLines(a, b) if a > b => ParallelLines(b, a),
            PerpendicularLines(a, b) if a > b => PerpendicularLines(b, a),
            CongruentTriangles(a, b) if a > b => CongruentTriangles(b, a),
            SimilarTriangles(a, b) if a > b => SimilarTriangles(b, a),
            Parallelogram(mut pts, class) => {
                pts.sort();
                Parallelogram(pts, class)
            }
            other => other,
        }
    }

    /// The entities this conclusion is about
    pub fn selected_shapes(&self) -> Vec<EntityRef> {
        use Conclusion::*;
        match self {
            EqualAngles(a, b) | SupplementaryAngles(a, b) => {
                vec![EntityRef::Angle(*a), EntityRef::Angle(*b)]
            }
            EqualLengths(a, b) => vec![EntityRef::Length(*a), EntityRef::Length(*b)],
            EqualCircles(a, b) => vec![EntityRef::Circle(*a), EntityRef::Circle(*b)],
            ParallelLines(a, b) | PerpendicularLines(a, b) => {
                vec![EntityRef::Line(*a), EntityRef::Line(*b)]
            }
            CongruentTriangles(t1, t2) | SimilarTriangles(t1, t2) => t1
                .iter()
                .chain(t2.iter())
                .map(|p| EntityRef::Point(*p))
                .collect(),
            IsoscelesTriangle(t) => t.iter().map(|p| EntityRef::Point(*p)).collect(),
            Parallelogram(pts, _) => pts.iter().map(|p| EntityRef::Point(*p)).collect(),
        }
    }
}

/// A justified geometric fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub conclusion: Conclusion,
    pub reason: Reason,
    /// Evidence entities cited by the justification, distinct from the
    /// conclusion's own subject entities.
    pub auxiliary: Vec<EntityRef>,
}

impl Fact {
    pub fn new(conclusion: Conclusion, reason: Reason, auxiliary: Vec<EntityRef>) -> Self {
        Self {
            conclusion,
            reason,
            auxiliary,
        }
    }

    /// The entities the fact is about
    pub fn selected_shapes(&self) -> Vec<EntityRef> {
        self.conclusion.selected_shapes()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable proof-playback line
    pub fn narration(&self, scene: &Scene) -> String {
        let subject = match &self.conclusion {
            Conclusion::EqualAngles(a, b) => format!(
                "∠{} = ∠{}",
                scene.label(scene.angle(*a).vertex),
                scene.label(scene.angle(*b).vertex)
            ),
            Conclusion::SupplementaryAngles(a, b) => format!(
                "∠{} + ∠{} = π",
                scene.label(scene.angle(*a).vertex),
                scene.label(scene.angle(*b).vertex)
            ),
            Conclusion::EqualLengths(a, b) => {
                let la = scene.length(*a);
                let lb = scene.length(*b);
                format!(
                    "{}{} = {}{}",
                    scene.label(la.p1),
                    scene.label(la.p2),
                    scene.label(lb.p1),
                    scene.label(lb.p2)
                )
            }
            Conclusion::EqualCircles(a, b) => format!("circle {a} = circle {b}"),
            Conclusion::ParallelLines(a, b) => format!("{a} ∥ {b}"),
            Conclusion::PerpendicularLines(a, b) => format!("{a} ⊥ {b}"),
            Conclusion::CongruentTriangles(t1, t2) => format!(
                "△{} ≅ △{}",
                triangle_name(scene, t1),
                triangle_name(scene, t2)
            ),
            Conclusion::SimilarTriangles(t1, t2) => format!(
                "△{} ∼ △{}",
                triangle_name(scene, t1),
                triangle_name(scene, t2)
            ),
            Conclusion::IsoscelesTriangle(t) => {
                format!("△{} is isosceles", triangle_name(scene, t))
            }
            Conclusion::Parallelogram(pts, class) => {
                let name: String = pts.iter().map(|p| scene.label(*p)).collect();
                format!("{name} is a {class}")
            }
        };
        format!("{subject} ({})", self.reason)
    }
}

fn triangle_name(scene: &Scene, t: &[PointId; 3]) -> String {
    t.iter().map(|p| scene.label(*p)).collect()
}
