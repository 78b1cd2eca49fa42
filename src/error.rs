//! Error types for the hole placer.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::WallRef;

/// Errors that can occur when loading a scene file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the scene file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The scene JSON is invalid or does not match the expected shape.
    #[error("invalid scene: {source}")]
    InvalidScene {
        #[from]
        source: serde_json::Error,
    },
}

/// A required external resource is missing or not unique.
///
/// Detected before any placement is computed; aborts the whole run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No document in the session is flagged as active.
    #[error("no active document found")]
    NoActiveDocument,

    /// No open document has a title ending with the companion suffix.
    #[error("companion model ending with '{suffix}' not found")]
    MissingCompanion { suffix: String },

    /// The hole family is not loaded into the host document.
    #[error("family '{family}' is not loaded into the host document")]
    MissingFamily { family: String },

    /// The host document has no non-template 3D view.
    #[error("host document does not contain a 3D view")]
    MissingView,

    /// A lookup that must match exactly one candidate matched several.
    #[error("expected exactly one {what}, found {count}")]
    Ambiguous { what: &'static str, count: usize },
}

/// An element's centerline cannot be used as a straight ray.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    /// The centerline is an arc rather than a line.
    #[error("element {id} has a curved centerline")]
    NotStraight { id: u64 },

    /// The centerline has zero or non-finite length.
    #[error("element {id} has a degenerate centerline")]
    Degenerate { id: u64 },

    /// The nominal diameter is not a positive finite number.
    #[error("element {id} has invalid diameter {diameter}")]
    InvalidDiameter { id: u64, diameter: f64 },
}

/// A reference returned by the ray query can no longer be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The hit wall is not present in the host model.
    #[error("wall {0} cannot be resolved")]
    Wall(WallRef),

    /// The wall's owning level is not present in the host model.
    #[error("level {level} of wall {wall} cannot be resolved")]
    Level { wall: WallRef, level: u64 },
}

/// Errors raised by an [`OpeningSink`](crate::pipeline::OpeningSink) while creating an instance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The family instance could not be created.
    #[error("failed to create opening on wall {wall}: {message}")]
    CreateFailed { wall: WallRef, message: String },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
