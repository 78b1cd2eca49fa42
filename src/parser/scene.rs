//! JSON scene files.
//!
//! A scene is a snapshot of the documents open in the host application.
//! Points are `[x, y, z]` arrays in model units:
//!
//! ```json
//! {
//!   "documents": [
//!     {
//!       "title": "Tower_AR",
//!       "active": true,
//!       "levels": [{ "id": 1, "name": "Level 1", "elevation": 0.0 }],
//!       "walls": [{ "id": 10, "level": 1, "start": [2, -5, 0], "end": [2, 5, 0],
//!                   "thickness": 0.3, "height": 3.0 }],
//!       "family_symbols": [{ "id": 50, "family": "Opening" }],
//!       "views": [{ "id": 60, "name": "{3D}", "kind": "three_d" }]
//!     },
//!     {
//!       "title": "Tower_MEP",
//!       "ducts": [{ "id": 100, "diameter": 0.4,
//!                   "centerline": { "type": "line", "start": [0, 0, 1.5], "end": [6, 0, 1.5] } }]
//!     }
//!   ]
//! }
//! ```

use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;

use crate::config::GENERIC_MODEL_CATEGORY;
use crate::error::ParseError;
use crate::model::{
    Centerline, Document, ElementKind, FamilySymbol, Level, MepCurve, Session, View, ViewKind,
    Wall, WallGeometry,
};

#[derive(Debug, Deserialize)]
struct SceneFile {
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    title: String,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    levels: Vec<LevelEntry>,
    #[serde(default)]
    walls: Vec<WallEntry>,
    #[serde(default)]
    family_symbols: Vec<SymbolEntry>,
    #[serde(default)]
    views: Vec<ViewEntry>,
    #[serde(default)]
    ducts: Vec<CurveEntry>,
    #[serde(default)]
    pipes: Vec<CurveEntry>,
}

#[derive(Debug, Deserialize)]
struct LevelEntry {
    id: u64,
    name: String,
    #[serde(default)]
    elevation: f64,
}

#[derive(Debug, Deserialize)]
struct WallEntry {
    id: u64,
    #[serde(default)]
    link: Option<u64>,
    level: u64,
    start: [f64; 3],
    end: [f64; 3],
    thickness: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
struct SymbolEntry {
    id: u64,
    family: String,
    #[serde(default = "generic_model")]
    category: String,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
struct ViewEntry {
    id: u64,
    name: String,
    kind: ViewKind,
    #[serde(default)]
    is_template: bool,
}

#[derive(Debug, Deserialize)]
struct CurveEntry {
    id: u64,
    diameter: f64,
    centerline: CenterlineEntry,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CenterlineEntry {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        start: [f64; 3],
        end: [f64; 3],
        center: [f64; 3],
    },
}

fn generic_model() -> String {
    GENERIC_MODEL_CATEGORY.to_string()
}

/// Reads and parses a scene file.
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidScene`] if the JSON does not describe a scene.
///
/// # Example
///
/// ```no_run
/// use hole_placer::parser::parse_scene_file;
///
/// let session = parse_scene_file("tower.json")?;
/// for document in &session.documents {
///     println!("{}: {} walls", document.title, document.walls.len());
/// }
/// # Ok::<(), hole_placer::error::ParseError>(())
/// ```
pub fn parse_scene_file<P: AsRef<Path>>(path: P) -> Result<Session, ParseError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    parse_scene(&content)
}

/// Parses a scene from a JSON string.
pub fn parse_scene(content: &str) -> Result<Session, ParseError> {
    let scene: SceneFile = serde_json::from_str(content)?;
    let documents = scene.documents.into_iter().map(build_document).collect();
    Ok(Session::new(documents))
}

fn build_document(entry: DocumentEntry) -> Document {
    let levels = entry
        .levels
        .into_iter()
        .map(|l| Level {
            id: l.id,
            name: l.name,
            elevation: l.elevation,
        })
        .collect();

    let walls = entry
        .walls
        .into_iter()
        .map(|w| Wall {
            id: w.id,
            link: w.link,
            level_id: w.level,
            geometry: WallGeometry {
                base_start: Point3::from(w.start),
                base_end: Point3::from(w.end),
                thickness: w.thickness,
                height: w.height,
            },
        })
        .collect();

    let family_symbols = entry
        .family_symbols
        .into_iter()
        .map(|s| FamilySymbol {
            id: s.id,
            family_name: s.family,
            category: s.category,
            active: s.active,
        })
        .collect();

    let views = entry
        .views
        .into_iter()
        .map(|v| View {
            id: v.id,
            name: v.name,
            kind: v.kind,
            is_template: v.is_template,
        })
        .collect();

    Document {
        title: entry.title,
        active: entry.active,
        levels,
        walls,
        family_symbols,
        views,
        ducts: build_curves(entry.ducts, ElementKind::Duct),
        pipes: build_curves(entry.pipes, ElementKind::Pipe),
    }
}

fn build_curves(entries: Vec<CurveEntry>, kind: ElementKind) -> Vec<MepCurve> {
    entries
        .into_iter()
        .map(|c| MepCurve {
            id: c.id,
            kind,
            centerline: match c.centerline {
                CenterlineEntry::Line { start, end } => Centerline::Line {
                    start: Point3::from(start),
                    end: Point3::from(end),
                },
                CenterlineEntry::Arc { start, end, center } => Centerline::Arc {
                    start: Point3::from(start),
                    end: Point3::from(end),
                    center: Point3::from(center),
                },
            },
            diameter: c.diameter,
        })
        .collect()
}
