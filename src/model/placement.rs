use nalgebra::Point3;

use super::{ElementKind, WallRef};

/// One intersection between a ray and a wall face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin along its unit direction.
    pub distance: f64,
    pub wall: WallRef,
}

impl RayHit {
    #[must_use]
    pub const fn new(distance: f64, wall: WallRef) -> Self {
        Self { distance, wall }
    }
}

/// Where and how large an opening must be for one wall crossing.
///
/// The opening is square: `width == height ==` the source element's diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningPlacement {
    pub source_id: u64,
    pub source_kind: ElementKind,
    pub point: Point3<f64>,
    pub host_wall: WallRef,
    pub level_id: u64,
    pub width: f64,
    pub height: f64,
}
