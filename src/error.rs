//! Error types shared across the selection pipeline

use thiserror::Error;

/// Reasons a user-drawn shape is refused before it reaches analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 distinct vertices, got {found}")]
    TooFewVertices { found: usize },
    #[error("polygon ring crosses itself")]
    SelfIntersecting,
    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,
}

/// Failures of the analysis call itself (not a negative analysis outcome)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("analysis service unavailable: {0}")]
    ServiceUnavailable(String),
}
