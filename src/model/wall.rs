use nalgebra::{Point3, Unit, Vector3};
use serde::Serialize;
use std::fmt;

/// Identity of a physical wall hit by a ray.
///
/// `link` is `None` for walls that live in the host document itself and
/// `Some(link_id)` for walls coming from a linked model. `None` never equals
/// any real link id, so two references are the same wall only when both the
/// link and the element id match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WallRef {
    pub link: Option<u64>,
    pub element: u64,
}

impl WallRef {
    #[must_use]
    pub const fn local(element: u64) -> Self {
        Self {
            link: None,
            element,
        }
    }

    #[must_use]
    pub const fn linked(link: u64, element: u64) -> Self {
        Self {
            link: Some(link),
            element,
        }
    }
}

impl fmt::Display for WallRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.link {
            Some(link) => write!(f, "#{} (link #{link})", self.element),
            None => write!(f, "#{}", self.element),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub id: u64,
    pub name: String,
    pub elevation: f64,
}

/// A straight wall modelled as an oriented box.
///
/// The base line runs from `base_start` to `base_end` at the elevation of
/// `base_start.z`; the wall extends `thickness / 2` to either side of it and
/// `height` upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGeometry {
    pub base_start: Point3<f64>,
    pub base_end: Point3<f64>,
    pub thickness: f64,
    pub height: f64,
}

impl WallGeometry {
    /// Horizontal length of the base line.
    #[must_use]
    pub fn length(&self) -> f64 {
        let delta = self.base_end - self.base_start;
        delta.x.hypot(delta.y)
    }

    /// Unit axis along the base line, projected onto the horizontal plane.
    ///
    /// Returns `None` for a base line with no horizontal extent.
    #[must_use]
    pub fn axis(&self) -> Option<Unit<Vector3<f64>>> {
        let delta = self.base_end - self.base_start;
        Unit::try_new(Vector3::new(delta.x, delta.y, 0.0), f64::EPSILON)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.axis().is_some()
            && self.thickness.is_finite()
            && self.thickness > 0.0
            && self.height.is_finite()
            && self.height > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Wall {
    pub id: u64,
    pub link: Option<u64>,
    pub level_id: u64,
    pub geometry: WallGeometry,
}

impl Wall {
    #[must_use]
    pub fn reference(&self) -> WallRef {
        WallRef {
            link: self.link,
            element: self.id,
        }
    }
}
