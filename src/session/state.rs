use crate::analysis::SelectionOrigin;
use crate::domain::{AnalysisResult, Geometry};
use crate::error::AnalysisError;

/// Where the controller's state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected
    Idle,
    /// Analysis for the current geometry in flight
    Loading,
    /// Result available for the current geometry
    Settled,
    /// Analysis call failed, retry possible
    Failed,
}

/// Single-slot selection state owned by the controller
///
/// Views receive clones through the controller's watch channel and can only
/// read them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    geometry: Option<Geometry>,
    origin: Option<SelectionOrigin>,
    result: Option<AnalysisResult>,
    failure: Option<AnalysisError>,
    loading: bool,
}

impl SelectionState {
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn origin(&self) -> Option<SelectionOrigin> {
        self.origin
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&AnalysisError> {
        self.failure.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.failure.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        }
    }

    /// Adopt a new geometry and wait for its analysis
    pub(super) fn begin(&mut self, geometry: Geometry, origin: SelectionOrigin) {
        self.geometry = Some(geometry);
        self.origin = Some(origin);
        self.result = None;
        self.failure = None;
        self.loading = true;
    }

    pub(super) fn settle(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.failure = None;
        self.loading = false;
    }

    /// Record a failed call; no partial result is kept
    pub(super) fn fail(&mut self, error: AnalysisError) {
        self.result = None;
        self.failure = Some(error);
        self.loading = false;
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}
