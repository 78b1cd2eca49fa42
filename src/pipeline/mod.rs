//! The per-element placement pipeline.
//!
//! Each duct or pipe flows through the same straight-line sequence:
//! [`RayCaster`] finds the wall crossings along its centerline,
//! [`dedup_hits`] keeps one crossing per physical wall and
//! [`compute_placements`] turns the survivors into [`OpeningPlacement`]s.
//! [`Pipeline`] runs that sequence over a batch, and [`apply_plan`] hands
//! the result to an [`OpeningSink`] one instance at a time.
//!
//! [`OpeningPlacement`]: crate::model::OpeningPlacement

pub mod batch;
pub mod dedup;
pub mod placement;
pub mod raycast;
pub mod sink;

pub use batch::{apply_plan, AppliedBatch, BatchPlan, BatchReport, Pipeline};
pub use dedup::dedup_hits;
pub use placement::{compute_placements, HostLookup, ModelLookup, PlacementOutcome};
pub use raycast::RayCaster;
pub use sink::{FamilyInstance, InstanceLog, OpeningSink};
