//! Message types for a selection session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - RequestId tagging each analysis call

use crate::domain::{AnalysisResult, LatLon};
use crate::error::AnalysisError;
use crate::widget::geometry_input::DrawTool;
use std::fmt;

// ============================================================================
// Map Interaction Types
// ============================================================================

/// Pointer and tool events coming from the map surface
#[derive(Debug, Clone, PartialEq)]
pub enum MapMsg {
    /// Click at a map coordinate
    Click(LatLon),
    /// Rectangle drag started at corner
    DragStart(LatLon),
    /// Rectangle drag released at the opposite corner
    DragEnd(LatLon),
    /// Close the polygon being traced
    FinishShape,
    /// Discard the shape being traced
    CancelShape,
    /// Switch a draw tool on, or off when it is already active
    ToggleDrawTool(DrawTool),
}

// ============================================================================
// Search Types
// ============================================================================

/// Location search box messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMsg {
    /// Search text changed
    Query(String),
    /// Suggestion at index picked
    Choose(usize),
}

// ============================================================================
// Selection/Analysis Types
// ============================================================================

/// Identity of one analysis call, increasing with every submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Selection messages handled by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum SelectMsg {
    /// Analyse the current geometry again after a failure
    Retry,
    /// Drop the current selection
    Clear,
}

/// Results coming back from spawned analysis calls
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisMsg {
    Completed {
        request: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
}

// ============================================================================
// Top-level Message
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Map(MapMsg),
    Search(SearchMsg),
    Select(SelectMsg),
    Analysis(AnalysisMsg),
}

impl From<MapMsg> for Msg {
    fn from(msg: MapMsg) -> Self {
        Msg::Map(msg)
    }
}

impl From<SearchMsg> for Msg {
    fn from(msg: SearchMsg) -> Self {
        Msg::Search(msg)
    }
}

impl From<SelectMsg> for Msg {
    fn from(msg: SelectMsg) -> Self {
        Msg::Select(msg)
    }
}

impl From<AnalysisMsg> for Msg {
    fn from(msg: AnalysisMsg) -> Self {
        Msg::Analysis(msg)
    }
}
