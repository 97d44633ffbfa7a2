//! Analysis of selected geometries
//!
//! The controller only depends on [`AnalysisService`]; the bundled
//! implementation fabricates figures after a simulated delay.

mod mock;

pub use mock::MockAnalysisService;

use crate::domain::{AnalysisResult, Geometry};
use crate::error::AnalysisError;
use futures::future::BoxFuture;

/// Where a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Point clicked on the map
    MapClick,
    /// Rectangle or polygon traced on the map
    Drawn,
    /// Place picked from the search suggestions
    Search,
}

/// One analysis call
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub geometry: Geometry,
    pub origin: SelectionOrigin,
}

pub type AnalysisFuture = BoxFuture<'static, Result<AnalysisResult, AnalysisError>>;

/// Source of analysis results
///
/// The returned future must not borrow from `self`; the controller spawns it.
pub trait AnalysisService: Send + Sync + 'static {
    fn analyze(&self, request: AnalysisRequest) -> AnalysisFuture;
}
