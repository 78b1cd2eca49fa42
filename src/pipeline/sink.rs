use nalgebra::Point3;
use std::collections::{BTreeMap, HashSet};

use crate::error::PlacementError;
use crate::model::{FamilySymbol, OpeningPlacement, WallRef};

/// The mutating side of the run: turns placements into drawable instances.
///
/// Implementations must set both size parameters from the placement before
/// returning. Calls arrive one at a time from a single writer.
pub trait OpeningSink {
    /// Makes `symbol` placeable. Called once before the first instance.
    fn activate(&mut self, symbol: &FamilySymbol);

    /// Creates one opening instance and returns its id.
    fn create_opening(
        &mut self,
        placement: &OpeningPlacement,
        symbol: &FamilySymbol,
    ) -> Result<u64, PlacementError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyInstance {
    pub id: u64,
    pub symbol_id: u64,
    pub point: Point3<f64>,
    pub host_wall: WallRef,
    pub level_id: u64,
    pub parameters: BTreeMap<String, f64>,
}

impl FamilyInstance {
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }
}

/// In-memory sink recording every created instance.
#[derive(Debug, Clone)]
pub struct InstanceLog {
    width_parameter: String,
    height_parameter: String,
    active_symbols: HashSet<u64>,
    instances: Vec<FamilyInstance>,
    next_id: u64,
}

impl InstanceLog {
    #[must_use]
    pub fn new(width_parameter: impl Into<String>, height_parameter: impl Into<String>) -> Self {
        Self {
            width_parameter: width_parameter.into(),
            height_parameter: height_parameter.into(),
            active_symbols: HashSet::new(),
            instances: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn instances(&self) -> &[FamilyInstance] {
        &self.instances
    }

    #[must_use]
    pub fn is_active(&self, symbol: &FamilySymbol) -> bool {
        symbol.active || self.active_symbols.contains(&symbol.id)
    }
}

impl OpeningSink for InstanceLog {
    fn activate(&mut self, symbol: &FamilySymbol) {
        tracing::debug!(symbol = symbol.id, family = %symbol.family_name, "Activating family symbol");
        self.active_symbols.insert(symbol.id);
    }

    fn create_opening(
        &mut self,
        placement: &OpeningPlacement,
        symbol: &FamilySymbol,
    ) -> Result<u64, PlacementError> {
        if !self.is_active(symbol) {
            return Err(PlacementError::CreateFailed {
                wall: placement.host_wall,
                message: format!("family symbol #{} is not active", symbol.id),
            });
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut parameters = BTreeMap::new();
        parameters.insert(self.width_parameter.clone(), placement.width);
        parameters.insert(self.height_parameter.clone(), placement.height);

        self.instances.push(FamilyInstance {
            id,
            symbol_id: symbol.id,
            point: placement.point,
            host_wall: placement.host_wall,
            level_id: placement.level_id,
            parameters,
        });

        Ok(id)
    }
}
