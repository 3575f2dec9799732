//! Proof statements
//!
//! A [`Statement`] wraps one conclusion with its lifecycle: constructed,
//! committed into the relation store (`set_relations`, once), and then
//! verified against current geometry. Verification re-dispatches the stored
//! reason to the matching derivation rule with the statement's auxiliary
//! shapes as evidence; a rule that no longer applies marks the statement
//! failed and surfaces a [`VerifyError`].

use crate::error::VerifyError;
use crate::fact::{Conclusion, Fact, Reason, ReasonFamily};
use crate::ir::{EntityRef, LineId, PointId, Scene};
use crate::relations::{IncidenceIndex, RelationStore};
use crate::rules;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementState {
    Constructed,
    Committed,
    Verified,
    VerificationFailed,
}

/// One proof step: a conclusion, its justifying reason, and evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub conclusion: Conclusion,
    pub reason: Option<Reason>,
    pub auxiliary: Vec<EntityRef>,
    state: StatementState,
}

impl Statement {
    /// A bare assertion without a derivation
    pub fn asserted(conclusion: Conclusion) -> Self {
        Self {
            conclusion,
            reason: None,
            auxiliary: Vec::new(),
            state: StatementState::Constructed,
        }
    }

    /// A statement carrying a derived fact
    pub fn derived(fact: Fact) -> Self {
        Self {
            conclusion: fact.conclusion,
            reason: Some(fact.reason),
            auxiliary: fact.auxiliary,
            state: StatementState::Constructed,
        }
    }

    pub fn state(&self) -> StatementState {
        self.state
    }

    /// Commit this statement's conclusion into the relation store
    ///
    /// May be called once per statement; committing twice is a construction
    /// order bug and panics.
    pub fn set_relations(&mut self, store: &mut RelationStore) {
        assert!(
            self.state == StatementState::Constructed,
            "set_relations called twice on the same statement"
        );
        self.apply(store);
        self.state = StatementState::Committed;
    }

    /// Write the conclusion into the store without a state transition
    ///
    /// Used by the rebuild path, which replays every committed statement
    /// into a cleared store.
    pub fn apply(&self, store: &mut RelationStore) {
        debug!(conclusion = ?self.conclusion, "apply statement");
        match self.conclusion {
            Conclusion::EqualAngles(a, b) => store.add_equal_angles(a, b),
            Conclusion::SupplementaryAngles(a, b) => store.add_supplementary_angles(a, b),
            Conclusion::EqualLengths(a, b) => store.add_equal_lengths(a, b),
            Conclusion::EqualCircles(a, b) => store.add_equal_circles(a, b),
            Conclusion::ParallelLines(a, b) => store.add_parallel_lines(a, b),
            Conclusion::PerpendicularLines(a, b) => store.add_perpendicular_lines(a, b),
            Conclusion::CongruentTriangles(t1, t2) => store.add_congruent_triangles(t1, t2),
            Conclusion::SimilarTriangles(t1, t2) => store.add_similar_triangles(t1, t2),
            Conclusion::IsoscelesTriangle(t) => store.add_isosceles_triangle(t),
            Conclusion::Parallelogram(points, class) => {
                store.add_parallelogram(points, class, self.reason)
            }
        }
    }

    /// Re-derive this statement's fact from current geometry
    ///
    /// Dispatches the stored reason to its rule. The reconstructed fact may
    /// carry a different reason of the same family (an SSS commit may
    /// re-verify as SAS after geometry edits that preserve congruence), and
    /// a committed parallelogram is satisfied by a rhombus classification.
    /// A bare assertion has no proof step to reconstruct and verifies
    /// vacuously as `Ok(None)`.
    pub fn verify(
        &mut self,
        scene: &Scene,
        incidence: &IncidenceIndex,
        store: &RelationStore,
    ) -> Result<Option<Fact>, VerifyError> {
        let result = match self.reason {
            None => Ok(None),
            Some(reason) => self.run_rule(reason, scene, incidence, store).map(Some),
        };
        self.state = match result {
            Ok(_) => StatementState::Verified,
            Err(_) => StatementState::VerificationFailed,
        };
        result
    }

    fn run_rule(
        &self,
        reason: Reason,
        scene: &Scene,
        incidence: &IncidenceIndex,
        store: &RelationStore,
    ) -> Result<Fact, VerifyError> {
        let cannot = || VerifyError::CannotDerive { reason };

        let fact = match (reason, &self.conclusion) {
            (Reason::VerticalAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::vertical_angles(scene, *a, *b)
            }
            (Reason::ParallelLineAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::parallel_line_angles(scene, store, *a, *b)
            }
            (Reason::AngleBisector, Conclusion::EqualAngles(a, b)) => {
                let bisector = self.aux_line().ok_or_else(cannot)?;
                rules::angle::angle_bisector(scene, *a, *b, bisector)
            }
            (Reason::CongruentTriangleAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::congruent_triangle_angles(scene, incidence, store, *a, *b)
            }
            (Reason::SimilarTriangleAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::similar_triangle_angles(scene, incidence, store, *a, *b)
            }
            (Reason::IsoscelesBaseAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::isosceles_base_angles(scene, incidence, store, *a, *b)
            }
            (Reason::ParallelogramOppositeAngles, Conclusion::EqualAngles(a, b)) => {
                let quad = self.aux_quad().ok_or_else(cannot)?;
                rules::quadrilateral::parallelogram_opposite_angles(
                    scene, incidence, store, *a, *b, quad,
                )
            }
            (Reason::RightAngles, Conclusion::EqualAngles(a, b)) => {
                rules::angle::right_angles_equal(store, *a, *b)
            }

            (Reason::CongruentTriangleSides, Conclusion::EqualLengths(a, b)) => {
                rules::length::congruent_triangle_sides(scene, store, *a, *b)
            }
            (Reason::ParallelogramOppositeSides, Conclusion::EqualLengths(a, b)) => {
                let quad = self.aux_quad().ok_or_else(cannot)?;
                rules::quadrilateral::parallelogram_opposite_sides(
                    scene, incidence, store, *a, *b, quad,
                )
            }
            (Reason::ParallelogramDiagonalBisection, Conclusion::EqualLengths(a, b)) => {
                let quad = self.aux_quad().ok_or_else(cannot)?;
                rules::quadrilateral::parallelogram_diagonal_lengths(
                    scene, incidence, store, *a, *b, quad,
                )
            }
            (Reason::EqualRadii, Conclusion::EqualLengths(a, b)) => {
                rules::length::equal_radius_lengths(scene, store, *a, *b)
            }

            (
                Reason::SideSideSide | Reason::SideAngleSide | Reason::AngleSideAngle,
                Conclusion::CongruentTriangles(t1, t2),
            ) => rules::triangle::triangle_congruence(scene, incidence, store, *t1, *t2),
            (Reason::AngleAngle, Conclusion::SimilarTriangles(t1, t2)) => {
                rules::triangle::triangle_similarity(scene, incidence, store, *t1, *t2)
            }
            (Reason::EqualLegs, Conclusion::IsoscelesTriangle(t)) => {
                rules::triangle::isosceles_from_equal_legs(store, *t)
            }

            (
                Reason::OppositeSidesEqual
                | Reason::OppositeSidesParallel
                | Reason::OppositeAnglesEqual
                | Reason::OnePairParallelAndEqual
                | Reason::DiagonalsBisect,
                Conclusion::Parallelogram(points, _),
            ) => rules::quadrilateral::classify_parallelogram(scene, incidence, store, *points),

            (Reason::ParallelogramSides, Conclusion::ParallelLines(a, b)) => {
                rules::parallel::parallel_from_parallelogram(scene, incidence, store, *a, *b)
            }
            (Reason::TransversalAngles, Conclusion::ParallelLines(a, b)) => {
                rules::parallel::parallel_from_transversal_angles(scene, store, *a, *b)
            }

            _ => None,
        };

        let fact = fact.ok_or_else(cannot)?;
        if !conclusions_compatible(&fact.conclusion, &self.conclusion) {
            return Err(VerifyError::ConclusionMismatch);
        }
        if fact.reason.family() != reason.family() {
            return Err(VerifyError::ConclusionMismatch);
        }
        Ok(fact)
    }

    fn aux_line(&self) -> Option<LineId> {
        self.auxiliary.iter().find_map(|e| match e {
            EntityRef::Line(l) => Some(*l),
            _ => None,
        })
    }

    fn aux_quad(&self) -> Option<[PointId; 4]> {
        let points: Vec<PointId> = self
            .auxiliary
            .iter()
            .filter_map(|e| match e {
                EntityRef::Point(p) => Some(*p),
                _ => None,
            })
            .collect();
        if points.len() < 4 {
            return None;
        }
        Some([points[0], points[1], points[2], points[3]])
    }
}

/// A reconstructed conclusion satisfies the committed one when they are
/// equal up to normalization, or when the reconstruction is strictly
/// stronger (rhombus over parallelogram).
fn conclusions_compatible(derived: &Conclusion, committed: &Conclusion) -> bool {
    if let (Conclusion::Parallelogram(pd, cd), Conclusion::Parallelogram(pc, cc)) =
        (derived, committed)
    {
        let mut pd = *pd;
        let mut pc = *pc;
        pd.sort();
        pc.sort();
        return pd == pc && cd.implies(*cc);
    }
    derived.clone().normalize() == committed.clone().normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::QuadClass;
    use crate::ir::{Angle, AngleId};
    use crate::relations::lookup::angle_key_of;

    fn vertical_fixture() -> (Scene, IncidenceIndex, RelationStore, AngleId, AngleId) {
        let mut scene = Scene::new();
        let v = scene.add_point("V", 0.0, 0.0);
        let e = scene.add_point("E", 2.0, 0.0);
        let w = scene.add_point("W", -2.0, 0.0);
        let s = scene.add_point("S", 0.0, 2.0);
        let n = scene.add_point("N", 0.0, -2.0);
        let h = scene.add_line(w, e);
        let vl = scene.add_line(n, s);

        let mut incidence = IncidenceIndex::new();
        for p in [v, e, w] {
            incidence.add_point_on_line(p, h);
        }
        for p in [v, s, n] {
            incidence.add_point_on_line(p, vl);
        }

        let mut mk = |pts: [PointId; 3], mark: u32, scene: &mut Scene| {
            let key = angle_key_of(scene, &incidence, pts).unwrap();
            scene.add_angle(Angle {
                line_a: key.line_a,
                dir_a: key.dir_a,
                line_b: key.line_b,
                dir_b: key.dir_b,
                vertex: key.vertex,
                mark,
            })
        };
        let a1 = mk([e, v, s], 1, &mut scene);
        let a2 = mk([w, v, n], 2, &mut scene);

        let mut store = RelationStore::new();
        store.register_scene(&scene);
        (scene, incidence, store, a1, a2)
    }

    #[test]
    fn test_commit_then_verify_round_trip() {
        let (scene, incidence, mut store, a1, a2) = vertical_fixture();

        let fact = rules::angle::vertical_angles(&scene, a1, a2).unwrap();
        let mut statement = Statement::derived(fact.clone());
        assert_eq!(statement.state(), StatementState::Constructed);

        statement.set_relations(&mut store);
        assert_eq!(statement.state(), StatementState::Committed);
        assert!(store.is_equal_angle(a1, a2));

        let reconstructed = statement
            .verify(&scene, &incidence, &store)
            .unwrap()
            .expect("derived statement reconstructs a fact");
        assert_eq!(statement.state(), StatementState::Verified);
        assert_eq!(reconstructed.selected_shapes(), fact.selected_shapes());
        assert_eq!(reconstructed.reason.family(), fact.reason.family());
    }

    #[test]
    #[should_panic(expected = "set_relations called twice")]
    fn test_double_commit_panics() {
        let (scene, _incidence, mut store, a1, a2) = vertical_fixture();
        let fact = rules::angle::vertical_angles(&scene, a1, a2).unwrap();
        let mut statement = Statement::derived(fact);
        statement.set_relations(&mut store);
        statement.set_relations(&mut store);
    }

    #[test]
    fn test_assertion_verifies_vacuously() {
        let (scene, incidence, store, a1, a2) = vertical_fixture();
        let mut statement = Statement::asserted(Conclusion::EqualAngles(a1, a2));
        assert_eq!(statement.verify(&scene, &incidence, &store), Ok(None));
        assert_eq!(statement.state(), StatementState::Verified);
    }

    #[test]
    fn test_stale_proof_fails_loudly() {
        let (scene, incidence, store, a1, a2) = vertical_fixture();

        // Committed as parallel-line angles, but no parallel assertion
        // exists to support the derivation.
        let mut statement = Statement {
            conclusion: Conclusion::EqualAngles(a1, a2),
            reason: Some(Reason::ParallelLineAngles),
            auxiliary: vec![],
            state: StatementState::Committed,
        };
        assert_eq!(
            statement.verify(&scene, &incidence, &store),
            Err(VerifyError::CannotDerive {
                reason: Reason::ParallelLineAngles
            })
        );
        assert_eq!(statement.state(), StatementState::VerificationFailed);
    }

    #[test]
    fn test_rhombus_satisfies_parallelogram_commit() {
        let p = |i| PointId(i);
        let derived = Conclusion::Parallelogram([p(0), p(1), p(2), p(3)], QuadClass::Rhombus);
        let committed =
            Conclusion::Parallelogram([p(1), p(2), p(3), p(0)], QuadClass::Parallelogram);
        assert!(conclusions_compatible(&derived, &committed));
        assert!(!conclusions_compatible(&committed, &derived));
    }
}
