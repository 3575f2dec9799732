//! Relation store, incidence index, and the partition primitives

pub mod classes;
pub mod groups;
pub mod incidence;
pub mod lookup;
pub mod pairset;
pub mod store;

pub use classes::EqClasses;
pub use groups::CorrespondenceGroups;
pub use incidence::IncidenceIndex;
pub use lookup::{
    angle_key_of, clockwise_angle_points, find_angle, find_angles_in_polygon, polygon_angle_at,
};
pub use pairset::PairSets;
pub use store::{ParallelogramRecord, RelationStore};
