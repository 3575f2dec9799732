//! Verification errors

use crate::fact::Reason;
use thiserror::Error;

/// Failure to reconstruct a committed proof step from current geometry
///
/// These are fatal from the statement's perspective: a committed statement
/// that no longer verifies means the geometry was mutated in a way that
/// invalidates an already-asserted step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("cannot reconstruct proof step: {reason} is not derivable from current geometry")]
    CannotDerive { reason: Reason },

    #[error("derived conclusion does not match the committed one")]
    ConclusionMismatch,
}
