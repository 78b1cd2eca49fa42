use crate::error::GeometryError;
use crate::geometry::{Ray, WallIntersector};
use crate::model::{LinearElement, MepCurve, RayHit};

/// Casts an element's centerline against the walls of the host model.
pub struct RayCaster<'a, I: ?Sized> {
    intersector: &'a I,
}

impl<I: ?Sized> Clone for RayCaster<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for RayCaster<'_, I> {}

impl<'a, I: WallIntersector + ?Sized> RayCaster<'a, I> {
    #[must_use]
    pub const fn new(intersector: &'a I) -> Self {
        Self { intersector }
    }

    /// Returns every crossing within the element's own length, nearest first.
    ///
    /// The search radius is always `element.length`; hits at exactly that
    /// distance are kept.
    #[must_use]
    pub fn cast(&self, element: &LinearElement) -> Vec<RayHit> {
        let ray = Ray::new(element.start, element.direction);
        let mut hits = self.intersector.find(&ray, element.length);

        hits.retain(|hit| (0.0..=element.length).contains(&hit.distance));
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Reduces a raw curve to a straight element and casts it.
    ///
    /// Arcs and degenerate lines are rejected, never approximated.
    pub fn cast_curve(
        &self,
        curve: &MepCurve,
    ) -> Result<(LinearElement, Vec<RayHit>), GeometryError> {
        let element = LinearElement::try_from(curve)?;
        let hits = self.cast(&element);
        Ok((element, hits))
    }
}
