//! Ray geometry and the wall intersection query.

pub mod intersect;
pub mod ray;

pub use intersect::{WallIndex, WallIntersector};
pub use ray::Ray;
