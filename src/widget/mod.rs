//! View-side components of the viewer
//!
//! - `geometry_input`: map interaction and highlighted selection
//! - `map_surface`: trait for the renderer that draws the map
//! - `search_panel`: place search with suggestions
//! - `results_view`: analysis results panel

pub mod geometry_input;
pub mod map_surface;
pub mod results_view;
pub mod search_panel;
