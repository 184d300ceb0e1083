//! Load-time error types.
//!
//! Every failure here is fatal and surfaces once, before playback starts.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single named field could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing")]
    Missing,
    #[error("not a number: {0:?}")]
    Invalid(String),
}

/// The run document could not be parsed as a tree.
#[derive(Debug, Error)]
#[error("malformed run document: {0}")]
pub struct DocumentError(#[from] roxmltree::Error);

/// Missing or invalid world parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world field `{field}` is {source}")]
    Field {
        field: &'static str,
        #[source]
        source: FieldError,
    },
    #[error("world field `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Kinds of static obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// A static obstacle record is missing a field or has a bad value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} #{index}: field `{field}` is {source}")]
pub struct GeometryError {
    pub kind: ShapeKind,
    pub index: usize,
    pub field: &'static str,
    #[source]
    pub source: FieldError,
}

/// Kinds of per-step record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Agent,
    SensorBeam,
    TimeStep,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Agent => write!(f, "agent"),
            RecordKind::SensorBeam => write!(f, "sensor_beam"),
            RecordKind::TimeStep => write!(f, "time_step"),
        }
    }
}

/// Everything that can stop a recorded run from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid world configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid static geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("time step {step}: {kind} #{index}: field `{field}` is {source}")]
    FrameRecord {
        step: usize,
        kind: RecordKind,
        index: usize,
        field: &'static str,
        #[source]
        source: FieldError,
    },
    #[error("run log contains no time steps")]
    NoFrames,
}
