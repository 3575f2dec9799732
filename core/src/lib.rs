//! GeoProve Core
//!
//! Relation store and derivation rule library for plane-geometry proofs

pub mod error;
pub mod fact;
pub mod ir;
pub mod relations;
pub mod rules;
pub mod session;
pub mod statement;

pub use error::VerifyError;
pub use fact::{Conclusion, Fact, QuadClass, Reason, ReasonFamily};
pub use ir::*;
pub use relations::{
    find_angle, find_angles_in_polygon, CorrespondenceGroups, EqClasses, IncidenceIndex,
    PairSets, RelationStore,
};
pub use session::ProofSession;
pub use statement::{Statement, StatementState};
