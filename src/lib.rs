//! # Hole Placer
//!
//! Places opening markers where ducts and pipes from a mechanical model pass
//! through the walls of an architectural model.
//!
//! ## Features
//!
//! - Cast each duct/pipe centerline against the host walls, within the element's own length
//! - Collapse multiple face hits on the same wall into a single crossing
//! - Compute the exact opening point, host wall, level and square size per crossing
//! - Strict lookups for the companion model, hole family and 3D view
//! - Export to CSV and JSON, or browse the results in the terminal
//!
//! ## Example
//!
//! ```no_run
//! use hole_placer::config::{resolve_config, HoleConfig};
//! use hole_placer::geometry::WallIndex;
//! use hole_placer::parser::parse_scene_file;
//! use hole_placer::pipeline::{apply_plan, HostLookup, InstanceLog, Pipeline};
//!
//! let session = parse_scene_file("tower.json").expect("Failed to parse");
//! let config = HoleConfig::default();
//! let resolved = resolve_config(&session, &config).expect("Missing resources");
//!
//! let index = WallIndex::new(&resolved.host.walls);
//! let lookup = HostLookup::new(resolved.host);
//! let plan = Pipeline::new(&index, &lookup).plan(resolved.companion.linear_curves());
//!
//! let mut log = InstanceLog::new(&config.width_parameter, &config.height_parameter);
//! println!("{}", apply_plan(&plan, resolved.symbol, &mut log).report);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod ui;
