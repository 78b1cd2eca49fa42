use nalgebra::{Point3, Unit, Vector3};
use serde::Serialize;
use std::fmt;

use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Duct,
    Pipe,
}

impl ElementKind {
    /// Plural label used for categories and summaries.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Duct => "Ducts",
            Self::Pipe => "Pipes",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duct => f.write_str("Duct"),
            Self::Pipe => f.write_str("Pipe"),
        }
    }
}

/// Location curve of a duct or pipe as stored in the mechanical model.
#[derive(Debug, Clone, PartialEq)]
pub enum Centerline {
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    Arc {
        start: Point3<f64>,
        end: Point3<f64>,
        center: Point3<f64>,
    },
}

/// A duct or pipe exactly as read from the mechanical model.
#[derive(Debug, Clone, PartialEq)]
pub struct MepCurve {
    pub id: u64,
    pub kind: ElementKind,
    pub centerline: Centerline,
    pub diameter: f64,
}

/// A duct or pipe reduced to a straight centerline.
///
/// `direction` is unit length and `length` is the true centerline length,
/// which doubles as the inclusive upper bound for ray hits.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearElement {
    pub id: u64,
    pub kind: ElementKind,
    pub start: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    pub length: f64,
    pub diameter: f64,
}

impl LinearElement {
    /// Builds an element from a start point, a direction and a length.
    ///
    /// The direction is normalized here; a zero direction or a non-finite
    /// length is rejected.
    pub fn new(
        id: u64,
        kind: ElementKind,
        start: Point3<f64>,
        direction: Vector3<f64>,
        length: f64,
        diameter: f64,
    ) -> Result<Self, GeometryError> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(GeometryError::InvalidDiameter { id, diameter });
        }
        if !length.is_finite() || length < 0.0 {
            return Err(GeometryError::Degenerate { id });
        }
        let direction =
            Unit::try_new(direction, f64::EPSILON).ok_or(GeometryError::Degenerate { id })?;

        Ok(Self {
            id,
            kind,
            start,
            direction,
            length,
            diameter,
        })
    }

    /// Point on the centerline at `distance` from the start.
    #[must_use]
    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.start + self.direction.into_inner() * distance
    }

    #[must_use]
    pub fn end(&self) -> Point3<f64> {
        self.point_at(self.length)
    }
}

impl TryFrom<&MepCurve> for LinearElement {
    type Error = GeometryError;

    fn try_from(curve: &MepCurve) -> Result<Self, Self::Error> {
        match curve.centerline {
            Centerline::Line { start, end } => {
                let delta = end - start;
                let length = delta.norm();
                if length < f64::EPSILON {
                    return Err(GeometryError::Degenerate { id: curve.id });
                }
                Self::new(curve.id, curve.kind, start, delta, length, curve.diameter)
            }
            Centerline::Arc { .. } => Err(GeometryError::NotStraight { id: curve.id }),
        }
    }
}
