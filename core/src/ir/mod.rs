//! Entity model: ids, vectors, shapes, and the scene arena

pub mod coords;
pub mod scene;
pub mod shapes;
pub mod symbols;

pub use coords::{sign, Vec2, SIGN_EPS};
pub use scene::Scene;
pub use shapes::{
    same_point_set2, same_point_set3, AbstractLine, Angle, AngleKey, CircleArc, LengthSymbol,
    Point, Quadrilateral, Triangle,
};
pub use symbols::{AngleId, CircleId, EntityRef, LengthId, LineId, PointId, QuadId, TriangleId};
