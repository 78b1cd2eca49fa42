use serde::{Deserialize, Serialize};

use super::{Level, MepCurve, Wall};

#[derive(Debug, Clone, Serialize)]
pub struct FamilySymbol {
    pub id: u64,
    pub family_name: String,
    pub category: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    ThreeD,
    Plan,
    Section,
    Elevation,
    Schedule,
}

#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub id: u64,
    pub name: String,
    pub kind: ViewKind,
    pub is_template: bool,
}

/// One open model: either the architectural host or a mechanical companion.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub active: bool,
    pub levels: Vec<Level>,
    pub walls: Vec<Wall>,
    pub family_symbols: Vec<FamilySymbol>,
    pub views: Vec<View>,
    pub ducts: Vec<MepCurve>,
    pub pipes: Vec<MepCurve>,
}

impl Document {
    #[must_use]
    pub fn new(title: String) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn level(&self, id: u64) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Ducts followed by pipes.
    pub fn linear_curves(&self) -> impl Iterator<Item = &MepCurve> {
        self.ducts.iter().chain(&self.pipes)
    }
}

/// The set of documents open in the host application.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub documents: Vec<Document>,
}

impl Session {
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}
