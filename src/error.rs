//! Structured error taxonomy shared by every pipeline stage.

use thiserror::Error;

/// Everything that can go wrong while loading, validating or analysing a net.
///
/// Each stage in the pipeline (parse → validate → explicit → symbolic →
/// deadlock → optimise) fails eagerly into one of these variants; there is no
/// silent recovery anywhere in the core.
#[derive(Debug, Error)]
pub enum PetriError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("malformed PNML: {0}")]
    MalformedPnml(String),

    #[error("validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("matrix orientation cannot be aligned with {n_places} places: shape {rows}x{cols}")]
    Orientation { rows: usize, cols: usize, n_places: usize },

    #[error("fixpoint did not converge within {0} iterations")]
    FixpointDiverged(usize),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PetriError>;
