//! Proof session: one scene plus its relation state and statements
//!
//! The session owns the scene arena, the incidence index, the relation
//! store, and the committed statement list, and keeps them consistent: the
//! construction helpers register incidence and the angle/length registries
//! as shapes are added, and [`ProofSession::rebuild`] restores the store
//! from scratch by replaying every statement in construction order.

use crate::error::VerifyError;
use crate::fact::Fact;
use crate::ir::{
    Angle, AngleId, CircleId, LengthId, LengthSymbol, LineId, PointId, QuadId, Scene, TriangleId,
};
use crate::relations::lookup::angle_key_of;
use crate::relations::{IncidenceIndex, RelationStore};
use crate::statement::Statement;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProofSession {
    pub scene: Scene,
    pub incidence: IncidenceIndex,
    pub store: RelationStore,
    statements: Vec<Statement>,
}

impl ProofSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- construction -------------------------------------------------

    pub fn add_point(&mut self, label: impl Into<String>, x: f64, y: f64) -> PointId {
        self.scene.add_point(label, x, y)
    }

    /// Add a line through two points and register their incidence
    pub fn add_line(&mut self, p1: PointId, p2: PointId) -> LineId {
        let line = self.scene.add_line(p1, p2);
        self.incidence.add_point_on_line(p1, line);
        self.incidence.add_point_on_line(p2, line);
        line
    }

    pub fn put_point_on_line(&mut self, point: PointId, line: LineId) {
        self.incidence.add_point_on_line(point, line);
    }

    pub fn add_circle(&mut self, center: PointId, radius: f64) -> CircleId {
        let circle = self.scene.add_circle(center, radius);
        self.incidence.add_center_of_circle(circle, center);
        circle
    }

    pub fn put_point_on_circle(&mut self, point: PointId, circle: CircleId) {
        self.incidence.add_point_on_circle(point, circle);
    }

    /// Construct the angle described by `(first, vertex, second)`
    ///
    /// Mark 0 flags a right angle; equal nonzero marks tie angles into one
    /// user-asserted equality group. Panics when the three points are
    /// degenerate or not connected by registered lines, which is a
    /// construction order bug.
    pub fn add_angle(&mut self, points: [PointId; 3], mark: u32) -> AngleId {
        let key = angle_key_of(&self.scene, &self.incidence, points)
            .unwrap_or_else(|| panic!("cannot construct an angle from {points:?}"));
        let id = self.scene.add_angle(Angle {
            line_a: key.line_a,
            dir_a: key.dir_a,
            line_b: key.line_b,
            dir_b: key.dir_b,
            vertex: key.vertex,
            mark,
        });
        self.store.register_angle(&self.scene, id);
        id
    }

    /// Construct a length symbol over a point pair
    ///
    /// A nonzero kind ties symbols of that kind into one user-asserted
    /// equality group; symbols on the same circle are equal as radii.
    pub fn add_length(
        &mut self,
        p1: PointId,
        p2: PointId,
        kind: u32,
        on_line: Option<LineId>,
        on_circle: Option<CircleId>,
    ) -> LengthId {
        let id = self.scene.add_length(LengthSymbol {
            p1,
            p2,
            kind,
            on_line,
            on_circle,
        });
        self.store.register_length(&self.scene, id);
        id
    }

    pub fn add_triangle(&mut self, points: [PointId; 3]) -> TriangleId {
        self.scene.add_triangle(points)
    }

    pub fn add_quad(&mut self, points: [PointId; 4]) -> QuadId {
        self.scene.add_quad(points)
    }

    // ---- statements ---------------------------------------------------

    /// Commit a statement: write its conclusion into the store and append
    /// it to the replay log
    pub fn commit(&mut self, mut statement: Statement) -> usize {
        statement.set_relations(&mut self.store);
        self.statements.push(statement);
        self.statements.len() - 1
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Re-derive one committed statement against current geometry
    ///
    /// `Ok(None)` means the statement is a bare assertion with no proof
    /// step to reconstruct.
    pub fn verify_statement(&mut self, index: usize) -> Result<Option<Fact>, VerifyError> {
        self.statements[index].verify(&self.scene, &self.incidence, &self.store)
    }

    /// Verify every committed statement, in commit order
    pub fn verify_all(&mut self) -> Vec<Result<Option<Fact>, VerifyError>> {
        (0..self.statements.len())
            .map(|i| self.statements[i].verify(&self.scene, &self.incidence, &self.store))
            .collect()
    }

    /// Rebuild the relation store from scratch
    ///
    /// Clears the store, re-registers the scene's angle and length symbols,
    /// and replays every statement in construction order. The incremental
    /// registration path must always agree with this one.
    pub fn rebuild(&mut self) {
        debug!(statements = self.statements.len(), "rebuild relation store");
        self.store.clear();
        self.store.register_scene(&self.scene);
        for statement in &self.statements {
            statement.apply(&mut self.store);
        }
    }
}
