//! The derivation rule library
//!
//! Rules are pure: they read the scene, the incidence index, and the
//! relation store, and either produce a justified [`Fact`](crate::fact::Fact)
//! or `None` when their preconditions do not hold. Writing a derived fact
//! back into the store is the statement layer's job.

pub mod angle;
pub mod length;
pub mod parallel;
pub mod quadrilateral;
pub mod triangle;
