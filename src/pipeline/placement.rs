use std::collections::HashMap;

use crate::error::ResolutionError;
use crate::model::{Document, Level, LinearElement, OpeningPlacement, RayHit, Wall, WallRef};

/// Resolves references returned by the ray query back into model objects.
pub trait ModelLookup {
    fn wall(&self, reference: &WallRef) -> Option<&Wall>;
    fn level(&self, id: u64) -> Option<&Level>;
}

/// Hash-indexed lookup over the walls and levels of a host document.
#[derive(Debug, Clone)]
pub struct HostLookup<'a> {
    walls: HashMap<WallRef, &'a Wall>,
    levels: HashMap<u64, &'a Level>,
}

impl<'a> HostLookup<'a> {
    #[must_use]
    pub fn new(document: &'a Document) -> Self {
        Self {
            walls: document.walls.iter().map(|w| (w.reference(), w)).collect(),
            levels: document.levels.iter().map(|l| (l.id, l)).collect(),
        }
    }
}

impl ModelLookup for HostLookup<'_> {
    fn wall(&self, reference: &WallRef) -> Option<&Wall> {
        self.walls.get(reference).copied()
    }

    fn level(&self, id: u64) -> Option<&Level> {
        self.levels.get(&id).copied()
    }
}

/// Placements computed for one element, plus the hits that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementOutcome {
    pub placements: Vec<OpeningPlacement>,
    pub unresolved: Vec<ResolutionError>,
}

/// Computes the placement for a single surviving hit.
///
/// The point is `start + direction * distance` with no snapping. The level
/// is always the host wall's own level.
pub fn resolve_placement<L>(
    element: &LinearElement,
    hit: &RayHit,
    lookup: &L,
) -> Result<OpeningPlacement, ResolutionError>
where
    L: ModelLookup + ?Sized,
{
    let wall = lookup
        .wall(&hit.wall)
        .ok_or(ResolutionError::Wall(hit.wall))?;
    let level = lookup
        .level(wall.level_id)
        .ok_or(ResolutionError::Level {
            wall: hit.wall,
            level: wall.level_id,
        })?;

    Ok(OpeningPlacement {
        source_id: element.id,
        source_kind: element.kind,
        point: element.point_at(hit.distance),
        host_wall: wall.reference(),
        level_id: level.id,
        width: element.diameter,
        height: element.diameter,
    })
}

/// Turns deduplicated hits into placements, collecting unresolved hits instead of failing.
#[must_use]
pub fn compute_placements<L>(element: &LinearElement, hits: &[RayHit], lookup: &L) -> PlacementOutcome
where
    L: ModelLookup + ?Sized,
{
    let mut outcome = PlacementOutcome::default();

    for hit in hits {
        match resolve_placement(element, hit, lookup) {
            Ok(placement) => outcome.placements.push(placement),
            Err(err) => {
                tracing::warn!(element = element.id, error = %err, "Dropping unresolved hit");
                outcome.unresolved.push(err);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, WallGeometry};
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use pretty_assertions::assert_eq;

    fn host() -> Document {
        let mut doc = Document::new("Building_AR".to_string());
        doc.levels.push(Level {
            id: 100,
            name: "Level 1".to_string(),
            elevation: 0.0,
        });
        for (id, level_id) in [(1, 100), (2, 100), (3, 999)] {
            doc.walls.push(Wall {
                id,
                link: None,
                level_id,
                geometry: WallGeometry {
                    base_start: Point3::new(0.0, 0.0, 0.0),
                    base_end: Point3::new(1.0, 0.0, 0.0),
                    thickness: 0.2,
                    height: 3.0,
                },
            });
        }
        doc
    }

    fn duct() -> LinearElement {
        LinearElement::new(42, ElementKind::Duct, Point3::origin(), Vector3::x(), 5.0, 0.2).unwrap()
    }

    #[test]
    fn placement_point_and_size_follow_element() {
        let doc = host();
        let lookup = HostLookup::new(&doc);
        let hits = [
            RayHit::new(1.0, WallRef::local(1)),
            RayHit::new(3.0, WallRef::local(2)),
        ];

        let outcome = compute_placements(&duct(), &hits, &lookup);

        assert!(outcome.unresolved.is_empty());
        assert_eq!(outcome.placements.len(), 2);
        assert_relative_eq!(outcome.placements[0].point, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(outcome.placements[1].point, Point3::new(3.0, 0.0, 0.0));
        for placement in &outcome.placements {
            assert_eq!(placement.source_id, 42);
            assert_eq!(placement.level_id, 100);
            assert_relative_eq!(placement.width, 0.2);
            assert_relative_eq!(placement.height, 0.2);
        }
    }

    #[test]
    fn stale_wall_is_skipped_and_reported() {
        let doc = host();
        let lookup = HostLookup::new(&doc);
        let hits = [
            RayHit::new(1.0, WallRef::local(77)),
            RayHit::new(2.0, WallRef::local(1)),
        ];

        let outcome = compute_placements(&duct(), &hits, &lookup);

        assert_eq!(outcome.placements.len(), 1);
        assert_eq!(outcome.placements[0].host_wall, WallRef::local(1));
        assert_eq!(
            outcome.unresolved,
            vec![ResolutionError::Wall(WallRef::local(77))]
        );
    }

    #[test]
    fn missing_level_is_skipped_and_reported() {
        let doc = host();
        let lookup = HostLookup::new(&doc);
        let hits = [RayHit::new(1.0, WallRef::local(3))];

        let outcome = compute_placements(&duct(), &hits, &lookup);

        assert!(outcome.placements.is_empty());
        assert_eq!(
            outcome.unresolved,
            vec![ResolutionError::Level {
                wall: WallRef::local(3),
                level: 999
            }]
        );
    }

    #[test]
    fn linked_reference_does_not_resolve_to_local_wall() {
        let doc = host();
        let lookup = HostLookup::new(&doc);

        assert!(lookup.wall(&WallRef::linked(1, 1)).is_none());
        assert!(lookup.wall(&WallRef::local(1)).is_some());
    }
}
