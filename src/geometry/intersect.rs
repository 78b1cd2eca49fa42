//! Ray-wall intersection.
//!
//! [`WallIntersector`] is the read-only spatial query the pipeline consumes.
//! [`WallIndex`] answers it for box-shaped walls by intersecting the ray with
//! every face of every wall, so a ray passing through a wall reports one hit
//! on the entry face and one on the exit face, both carrying the same
//! [`WallRef`].

use nalgebra::{Point3, Vector3};

use super::Ray;
use crate::model::{RayHit, Wall, WallRef};

/// Slack for the in-face containment test, in model units.
const FACE_TOLERANCE: f64 = 1e-9;

/// Finds wall-face intersections along a ray.
pub trait WallIntersector {
    /// Returns every intersection with `0 <= distance <= max_distance`,
    /// ordered by increasing distance.
    fn find(&self, ray: &Ray, max_distance: f64) -> Vec<RayHit>;
}

impl<F> WallIntersector for F
where
    F: Fn(&Ray, f64) -> Vec<RayHit>,
{
    fn find(&self, ray: &Ray, max_distance: f64) -> Vec<RayHit> {
        self(ray, max_distance)
    }
}

/// A wall prepared for intersection: its local frame and box extents.
#[derive(Debug, Clone)]
struct IndexedWall {
    reference: WallRef,
    origin: Point3<f64>,
    axis: Vector3<f64>,
    normal: Vector3<f64>,
    extent: [f64; 3],
    half_thickness: f64,
}

impl IndexedWall {
    fn from_wall(wall: &Wall) -> Option<Self> {
        let geometry = &wall.geometry;
        if !geometry.is_valid() {
            return None;
        }
        let axis = geometry.axis()?.into_inner();
        let normal = Vector3::new(-axis.y, axis.x, 0.0);

        Some(Self {
            reference: wall.reference(),
            origin: geometry.base_start,
            axis,
            normal,
            extent: [geometry.length(), geometry.thickness, geometry.height],
            half_thickness: geometry.thickness / 2.0,
        })
    }

    fn lower(&self, k: usize) -> f64 {
        if k == 1 {
            -self.half_thickness
        } else {
            0.0
        }
    }

    fn upper(&self, k: usize) -> f64 {
        if k == 1 {
            self.half_thickness
        } else {
            self.extent[k]
        }
    }

    /// Pushes one hit per box face the ray crosses within `max_distance`.
    fn intersect(&self, ray: &Ray, max_distance: f64, hits: &mut Vec<RayHit>) {
        let rel = ray.origin - self.origin;
        let dir = ray.direction.into_inner();
        let o = [rel.dot(&self.axis), rel.dot(&self.normal), rel.z];
        let d = [dir.dot(&self.axis), dir.dot(&self.normal), dir.z];

        for (k, (&ok, &dk)) in o.iter().zip(&d).enumerate() {
            if dk.abs() < f64::EPSILON {
                continue;
            }
            for bound in [self.lower(k), self.upper(k)] {
                let t = (bound - ok) / dk;
                if !(0.0..=max_distance).contains(&t) {
                    continue;
                }
                let inside = (0..3).filter(|&j| j != k).all(|j| {
                    let p = o[j] + t * d[j];
                    p >= self.lower(j) - FACE_TOLERANCE && p <= self.upper(j) + FACE_TOLERANCE
                });
                if inside {
                    hits.push(RayHit::new(t, self.reference));
                }
            }
        }
    }
}

/// Intersection index over the walls of one document.
#[derive(Debug, Clone, Default)]
pub struct WallIndex {
    walls: Vec<IndexedWall>,
}

impl WallIndex {
    /// Builds the index, skipping walls whose geometry cannot bound a box.
    #[must_use]
    pub fn new(walls: &[Wall]) -> Self {
        let walls = walls
            .iter()
            .filter_map(|wall| {
                let indexed = IndexedWall::from_wall(wall);
                if indexed.is_none() {
                    tracing::warn!(wall = %wall.reference(), "Skipping wall with degenerate geometry");
                }
                indexed
            })
            .collect();

        Self { walls }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl WallIntersector for WallIndex {
    fn find(&self, ray: &Ray, max_distance: f64) -> Vec<RayHit> {
        let mut hits = Vec::new();
        for wall in &self.walls {
            wall.intersect(ray, max_distance, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WallGeometry;
    use approx::assert_relative_eq;

    /// Wall running along +Y whose faces sit at `x = center_x ± thickness / 2`.
    fn wall_across_x(id: u64, center_x: f64, thickness: f64) -> Wall {
        Wall {
            id,
            link: None,
            level_id: 1,
            geometry: WallGeometry {
                base_start: Point3::new(center_x, -5.0, 0.0),
                base_end: Point3::new(center_x, 5.0, 0.0),
                thickness,
                height: 3.0,
            },
        }
    }

    fn ray_along_x() -> Ray {
        Ray::new(Point3::new(0.0, 0.0, 1.5), Vector3::x_axis())
    }

    #[test]
    fn crossing_reports_entry_and_exit_faces() {
        let index = WallIndex::new(&[wall_across_x(10, 1.25, 0.5)]);
        let hits = index.find(&ray_along_x(), 5.0);

        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].distance, 1.0);
        assert_relative_eq!(hits[1].distance, 1.5);
        assert!(hits.iter().all(|h| h.wall == WallRef::local(10)));
    }

    #[test]
    fn hits_are_sorted_across_walls() {
        let index = WallIndex::new(&[wall_across_x(2, 3.25, 0.5), wall_across_x(1, 1.25, 0.5)]);
        let hits = index.find(&ray_along_x(), 10.0);

        assert_eq!(hits.len(), 4);
        for (hit, expected) in hits.iter().zip([1.0, 1.5, 3.0, 3.5]) {
            assert_relative_eq!(hit.distance, expected);
        }
        assert_eq!(hits[0].wall, WallRef::local(1));
        assert_eq!(hits[2].wall, WallRef::local(2));
    }

    #[test]
    fn max_distance_is_inclusive() {
        let index = WallIndex::new(&[wall_across_x(1, 1.25, 0.5)]);

        let at_bound = index.find(&ray_along_x(), 1.0);
        assert_eq!(at_bound.len(), 1);
        assert_relative_eq!(at_bound[0].distance, 1.0);

        assert!(index.find(&ray_along_x(), 0.5).is_empty());
    }

    #[test]
    fn ray_above_wall_misses() {
        let index = WallIndex::new(&[wall_across_x(1, 1.25, 0.5)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 4.0), Vector3::x_axis());

        assert!(index.find(&ray, 10.0).is_empty());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let index = WallIndex::new(&[wall_across_x(1, 1.25, 0.5)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.5), -Vector3::x_axis());

        assert!(index.find(&ray, 10.0).is_empty());
    }

    #[test]
    fn oblique_wall_is_hit() {
        let wall = Wall {
            id: 5,
            link: Some(2),
            level_id: 1,
            geometry: WallGeometry {
                base_start: Point3::new(2.0, -2.0, 0.0),
                base_end: Point3::new(6.0, 2.0, 0.0),
                thickness: 0.2,
                height: 3.0,
            },
        };
        let index = WallIndex::new(&[wall]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::x_axis());
        let hits = index.find(&ray, 10.0);

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.wall == WallRef::linked(2, 5)));
        // The base line crosses y = 0 at x = 4; at 45 degrees each face is 0.1 * sqrt(2) away.
        let offset = 0.1 * std::f64::consts::SQRT_2;
        assert_relative_eq!(hits[0].distance, 4.0 - offset, epsilon = 1e-9);
        assert_relative_eq!(hits[1].distance, 4.0 + offset, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_walls_are_not_indexed() {
        let mut flat = wall_across_x(1, 1.0, 0.5);
        flat.geometry.height = 0.0;
        let index = WallIndex::new(&[flat, wall_across_x(2, 2.0, 0.5)]);

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn closures_act_as_intersectors() {
        let fixed = |_: &Ray, _: f64| vec![RayHit::new(2.0, WallRef::local(4))];

        assert_eq!(fixed.find(&Ray::default(), 1.0).len(), 1);
    }
}
