use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

use super::{compute_placements, dedup_hits, ModelLookup, OpeningSink, PlacementOutcome, RayCaster};
use crate::error::{GeometryError, ResolutionError};
use crate::geometry::WallIntersector;
use crate::model::{ElementKind, FamilySymbol, MepCurve, OpeningPlacement};

/// Read-only planning stage: ray cast, dedup and placement per element.
pub struct Pipeline<'a, I: ?Sized, L: ?Sized> {
    caster: RayCaster<'a, I>,
    lookup: &'a L,
}

impl<'a, I, L> Pipeline<'a, I, L>
where
    I: WallIntersector + ?Sized,
    L: ModelLookup + ?Sized,
{
    #[must_use]
    pub const fn new(intersector: &'a I, lookup: &'a L) -> Self {
        Self {
            caster: RayCaster::new(intersector),
            lookup,
        }
    }

    /// Runs the whole pipeline for one curve.
    pub fn plan_element(&self, curve: &MepCurve) -> Result<PlacementOutcome, GeometryError> {
        let (element, hits) = self.caster.cast_curve(curve)?;
        let total = hits.len();
        let hits = dedup_hits(hits);

        tracing::debug!(
            element = element.id,
            kind = %element.kind,
            hits = total,
            walls = hits.len(),
            "Cast element centerline"
        );

        Ok(compute_placements(&element, &hits, self.lookup))
    }

    /// Plans every curve in order on the calling thread.
    pub fn plan<'c, C>(&self, curves: C) -> BatchPlan
    where
        C: IntoIterator<Item = &'c MepCurve>,
    {
        let mut plan = BatchPlan::default();
        for curve in curves {
            plan.push(self.plan_element(curve));
        }
        plan.log_summary();
        plan
    }

    /// Same result as [`plan`](Self::plan), with elements planned across the rayon pool.
    pub fn plan_parallel<'c, C>(&self, curves: C) -> BatchPlan
    where
        C: IntoIterator<Item = &'c MepCurve>,
        I: Sync,
        L: Sync,
    {
        let curves: Vec<&MepCurve> = curves.into_iter().collect();
        let results: Vec<_> = curves
            .par_iter()
            .map(|curve| self.plan_element(curve))
            .collect();

        let mut plan = BatchPlan::default();
        for result in results {
            plan.push(result);
        }
        plan.log_summary();
        plan
    }
}

/// Everything the planning stage produced for a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlan {
    pub placements: Vec<OpeningPlacement>,
    pub geometry_errors: Vec<GeometryError>,
    pub resolution_errors: Vec<ResolutionError>,
}

impl BatchPlan {
    fn push(&mut self, result: Result<PlacementOutcome, GeometryError>) {
        match result {
            Ok(outcome) => {
                self.placements.extend(outcome.placements);
                self.resolution_errors.extend(outcome.unresolved);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Skipping element");
                self.geometry_errors.push(err);
            }
        }
    }

    fn log_summary(&self) {
        tracing::info!(
            placements = self.placements.len(),
            skipped_elements = self.geometry_errors.len(),
            skipped_hits = self.resolution_errors.len(),
            "Planned openings"
        );
    }

    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.placements
            .iter()
            .filter(|p| p.source_kind == kind)
            .count()
    }
}

/// End-of-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub duct_openings: usize,
    pub pipe_openings: usize,
    pub skipped_elements: usize,
    pub skipped_hits: usize,
    pub failed_openings: usize,
}

impl BatchReport {
    #[must_use]
    pub const fn total_openings(&self) -> usize {
        self.duct_openings + self.pipe_openings
    }

    fn record(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Duct => self.duct_openings += 1,
            ElementKind::Pipe => self.pipe_openings += 1,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Openings created:")?;
        writeln!(f, "  for ducts - {};", self.duct_openings)?;
        write!(f, "  for pipes - {}.", self.pipe_openings)?;
        if self.skipped_elements > 0 {
            write!(f, "\nSkipped elements (invalid centerline): {}", self.skipped_elements)?;
        }
        if self.skipped_hits > 0 {
            write!(f, "\nSkipped crossings (unresolved wall): {}", self.skipped_hits)?;
        }
        if self.failed_openings > 0 {
            write!(f, "\nFailed openings: {}", self.failed_openings)?;
        }
        Ok(())
    }
}

/// Result of the writing stage: counters plus the placements that were actually created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedBatch {
    pub report: BatchReport,
    pub created: Vec<OpeningPlacement>,
}

/// Single-writer stage: creates one instance per planned placement.
///
/// The symbol is activated first if needed. A failed creation is counted
/// and the remaining placements are still applied.
pub fn apply_plan<S>(plan: &BatchPlan, symbol: &FamilySymbol, sink: &mut S) -> AppliedBatch
where
    S: OpeningSink + ?Sized,
{
    let mut applied = AppliedBatch {
        report: BatchReport {
            skipped_elements: plan.geometry_errors.len(),
            skipped_hits: plan.resolution_errors.len(),
            ..BatchReport::default()
        },
        created: Vec::with_capacity(plan.placements.len()),
    };

    if !symbol.active {
        sink.activate(symbol);
    }

    for placement in &plan.placements {
        match sink.create_opening(placement, symbol) {
            Ok(_) => {
                applied.report.record(placement.source_kind);
                applied.created.push(placement.clone());
            }
            Err(err) => {
                tracing::warn!(element = placement.source_id, error = %err, "Failed to create opening");
                applied.report.failed_openings += 1;
            }
        }
    }

    applied
}
