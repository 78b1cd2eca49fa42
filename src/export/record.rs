use serde::Serialize;

use crate::model::{Document, ElementKind, OpeningPlacement};
use crate::pipeline::BatchReport;

/// A placement flattened for tabular output, with the level name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRecord {
    pub kind: ElementKind,
    pub element_id: u64,
    pub wall_id: u64,
    pub link_id: Option<u64>,
    pub level_id: u64,
    pub level_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementRecord {
    #[must_use]
    pub fn new(placement: &OpeningPlacement, host: &Document) -> Self {
        let level_name = host
            .level(placement.level_id)
            .map_or_else(|| "-".to_string(), |l| l.name.clone());

        Self {
            kind: placement.source_kind,
            element_id: placement.source_id,
            wall_id: placement.host_wall.element,
            link_id: placement.host_wall.link,
            level_id: placement.level_id,
            level_name,
            x: placement.point.x,
            y: placement.point.y,
            z: placement.point.z,
            width: placement.width,
            height: placement.height,
        }
    }

    #[must_use]
    pub fn collect(placements: &[OpeningPlacement], host: &Document) -> Vec<Self> {
        placements.iter().map(|p| Self::new(p, host)).collect()
    }
}

/// Everything one run produced, as written to JSON and shown in the browser.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementReport {
    pub host: String,
    pub companion: String,
    pub view: String,
    pub summary: BatchReport,
    pub placements: Vec<PlacementRecord>,
}

impl PlacementReport {
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.placements.iter().filter(|p| p.kind == kind).count()
    }
}
